//! Rows of the append-only `em_blue_migration_log` table.

use emblue_core::types::{Date, PENDING_TO_PROCESS};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `em_blue_migration_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MigrationLog {
    pub date_migrated: Date,
    pub account: String,
    pub status: String,
    pub message: Option<String>,
}

/// DTO for appending a migration log row.
#[derive(Debug, Clone)]
pub struct CreateMigrationLog {
    pub date_migrated: Date,
    /// Account hostname.
    pub account: String,
    pub status: String,
    pub message: String,
}

impl CreateMigrationLog {
    /// A row recording that `account` still needs processing for `date`.
    pub fn pending(date: Date, account: &str, message: impl Into<String>) -> Self {
        Self {
            date_migrated: date,
            account: account.to_string(),
            status: PENDING_TO_PROCESS.to_string(),
            message: message.into(),
        }
    }
}
