//! Integration tests for the registry repositories and the per-statement
//! executor.
//!
//! Each test receives a fresh database from `sqlx::test`, created on the
//! server named by `DATABASE_URL`.

use assert_matches::assert_matches;
use emblue_core::config::RegistrySettings;
use emblue_core::crypto::TokenCipher;
use emblue_core::types::{Date, PENDING_TO_PROCESS};
use emblue_db::models::migration_log::CreateMigrationLog;
use emblue_db::repositories::{AccountRepo, MigrationLogRepo, TenantRepo};
use emblue_db::resolver::match_tenant;
use emblue_db::{ConnectionProfile, DbError, QueryExecutor, TenantResolver};
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn target(pool: &PgPool) -> PgConnectOptions {
    pool.connect_options().as_ref().clone()
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn client_profile() -> ConnectionProfile {
    let settings = RegistrySettings {
        database: "registry".to_string(),
        user: "hey".to_string(),
        host: "db.internal".to_string(),
        port: 5432,
        password: Some("pg-pass-123".to_string()),
    };
    ConnectionProfile::client(&settings, "client_a")
}

async fn insert_tenant(pool: &PgPool, db_name: &str, hey_key: Option<&str>) {
    sqlx::query(
        "INSERT INTO tenant (hey_key, db_name, db_user, db_host, db_password, db_port) \
         VALUES ($1, $2, 'hey', 'db.internal', 'pw', 5432)",
    )
    .bind(hey_key)
    .bind(db_name)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn insert_returns_no_rows_and_is_committed(pool: PgPool) {
    let rows = QueryExecutor::execute(
        &target(&pool),
        sqlx::query("INSERT INTO em_blue (hostname, emblue_user, password) VALUES ($1, $2, $3)")
            .bind("acme.emblue.com")
            .bind("ops")
            .bind("pw"),
    )
    .await
    .unwrap();

    assert!(rows.is_empty());

    // Visible from an unrelated connection, so the statement was committed.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM em_blue")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn select_returns_every_row(pool: PgPool) {
    for host in ["a.emblue.com", "b.emblue.com"] {
        sqlx::query("INSERT INTO em_blue (hostname, emblue_user, password) VALUES ($1, 'u', 'p')")
            .bind(host)
            .execute(&pool)
            .await
            .unwrap();
    }

    let accounts = AccountRepo::list_all(&target(&pool)).await.unwrap();
    let mut hosts: Vec<_> = accounts.iter().map(|a| a.hostname.as_str()).collect();
    hosts.sort_unstable();
    assert_eq!(hosts, vec!["a.emblue.com", "b.emblue.com"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn bound_values_are_not_interpreted_as_sql(pool: PgPool) {
    let hostile = "x'); DROP TABLE em_blue; --";
    MigrationLogRepo::insert(
        &target(&pool),
        &CreateMigrationLog::pending(date(2024, 3, 1), hostile, "rejected"),
    )
    .await
    .unwrap();

    let logs = MigrationLogRepo::list_by_date(&target(&pool), date(2024, 3, 1))
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].account, hostile);

    AccountRepo::list_all(&target(&pool)).await.unwrap();
}

// ---------------------------------------------------------------------------
// Migration log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn pending_log_rows_round_trip(pool: PgPool) {
    MigrationLogRepo::insert(
        &target(&pool),
        &CreateMigrationLog::pending(date(2024, 3, 2), "acme.emblue.com", "ExecutionLimitExceeded"),
    )
    .await
    .unwrap();

    let logs = MigrationLogRepo::list_by_date(&target(&pool), date(2024, 3, 2))
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, PENDING_TO_PROCESS);
    assert_eq!(logs[0].message.as_deref(), Some("ExecutionLimitExceeded"));

    let other_day = MigrationLogRepo::list_by_date(&target(&pool), date(2024, 3, 3))
        .await
        .unwrap();
    assert!(other_day.is_empty());
}

// ---------------------------------------------------------------------------
// Tenant resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn stored_token_resolves_to_its_tenant(pool: PgPool) {
    let cipher = TokenCipher::new(&TokenCipher::generate_key()).unwrap();

    insert_tenant(&pool, "no_key", None).await;
    insert_tenant(&pool, "empty_key", Some("")).await;
    insert_tenant(&pool, "alpha", Some(cipher.encrypt("key-alpha").as_str())).await;
    insert_tenant(&pool, "beta", Some(cipher.encrypt("key-beta").as_str())).await;

    let tenants = TenantRepo::list_all(&target(&pool)).await.unwrap();
    assert_eq!(tenants.len(), 4);

    let matched = match_tenant(&tenants, "key-beta", &cipher).unwrap();
    assert_eq!(matched.db_name.as_deref(), Some("beta"));
    assert_eq!(matched.db_port.as_deref(), Some("5432"));

    assert!(match_tenant(&tenants, "KEY-BETA", &cipher).is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn resolve_returns_client_profile_for_matching_tenant(pool: PgPool) {
    let key = TokenCipher::generate_key();
    let cipher = TokenCipher::new(&key).unwrap();

    insert_tenant(&pool, "alpha", Some(cipher.encrypt("key-alpha").as_str())).await;
    insert_tenant(&pool, "beta", Some(cipher.encrypt("key-beta").as_str())).await;

    let resolver = TenantResolver::with_registry(
        target(&pool),
        client_profile(),
        TokenCipher::new(&key).unwrap(),
    );
    let resolved = resolver.resolve("key-beta").await.unwrap();

    assert_eq!(resolved.tenant.db_name.as_deref(), Some("beta"));
    assert_eq!(resolved.profile, client_profile());
    assert_eq!(resolved.profile.db_name, "client_a");
    assert_eq!(resolved.profile.db_user, "hey");
    assert_eq!(resolved.profile.db_password.as_deref(), Some("pg-pass-123"));
}

#[sqlx::test(migrations = "./migrations")]
async fn resolve_without_matching_tenant_is_not_found(pool: PgPool) {
    let key = TokenCipher::generate_key();
    let cipher = TokenCipher::new(&key).unwrap();

    insert_tenant(&pool, "no_key", None).await;
    insert_tenant(&pool, "alpha", Some(cipher.encrypt("key-alpha").as_str())).await;

    let resolver = TenantResolver::with_registry(target(&pool), client_profile(), cipher);
    let result = resolver.resolve("key-gamma").await;

    assert_matches!(result, Err(DbError::TenantNotFound));
}

#[sqlx::test(migrations = "./migrations")]
async fn resolve_against_empty_registry_is_not_found(pool: PgPool) {
    let cipher = TokenCipher::new(&TokenCipher::generate_key()).unwrap();
    let resolver = TenantResolver::with_registry(target(&pool), client_profile(), cipher);

    assert_matches!(resolver.resolve("key-alpha").await, Err(DbError::TenantNotFound));
}
