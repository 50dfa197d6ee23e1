//! Repository for the `em_blue_migration_log` table.

use emblue_core::types::Date;
use sqlx::postgres::PgConnectOptions;

use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::migration_log::{CreateMigrationLog, MigrationLog};

/// Column list for `em_blue_migration_log` queries.
const COLUMNS: &str = "date_migrated, account, status, message";

/// Provides append and lookup operations for migration log rows.
pub struct MigrationLogRepo;

impl MigrationLogRepo {
    /// Append a log row. The table is append-only.
    pub async fn insert(
        registry: &PgConnectOptions,
        log: &CreateMigrationLog,
    ) -> Result<(), DbError> {
        let query = format!(
            "INSERT INTO em_blue_migration_log ({COLUMNS}) \
             VALUES ($1, $2, $3, $4)"
        );
        QueryExecutor::execute(
            registry,
            sqlx::query(&query)
                .bind(log.date_migrated)
                .bind(&log.account)
                .bind(&log.status)
                .bind(&log.message),
        )
        .await?;
        Ok(())
    }

    /// List the rows logged for a given date.
    pub async fn list_by_date(
        registry: &PgConnectOptions,
        date: Date,
    ) -> Result<Vec<MigrationLog>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM em_blue_migration_log \
             WHERE date_migrated = $1 \
             ORDER BY account"
        );
        QueryExecutor::fetch_as::<MigrationLog>(registry, sqlx::query(&query).bind(date)).await
    }
}
