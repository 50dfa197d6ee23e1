//! Repository for the client `em_blue` table.

use sqlx::postgres::PgConnectOptions;

use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::account::EmblueAccount;

/// Column list for `em_blue` queries.
const COLUMNS: &str = "hostname, emblue_user, password";

/// Provides read access to the tenant's emBlue accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// List every configured emBlue account of a client database.
    pub async fn list_all(client: &PgConnectOptions) -> Result<Vec<EmblueAccount>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM em_blue");
        QueryExecutor::fetch_as::<EmblueAccount>(client, sqlx::query(&query)).await
    }
}
