//! Repository for the registry `tenant` table.

use sqlx::postgres::PgConnectOptions;

use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::tenant::TenantRecord;

/// Column list for `tenant` queries.
const COLUMNS: &str = "\
    t.hey_key, t.db_name, t.db_user, t.db_host, t.db_password, \
    t.db_port::text AS db_port, t.db_host_for_reading";

/// Provides read access to tenant registry rows.
pub struct TenantRepo;

impl TenantRepo {
    /// List every tenant in storage order.
    pub async fn list_all(registry: &PgConnectOptions) -> Result<Vec<TenantRecord>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM tenant AS t");
        QueryExecutor::fetch_as::<TenantRecord>(registry, sqlx::query(&query)).await
    }
}
