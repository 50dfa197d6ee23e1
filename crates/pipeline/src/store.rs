//! Account and pending-log seams of the dispatcher.

use std::future::Future;

use emblue_db::models::account::EmblueAccount;
use emblue_db::models::migration_log::CreateMigrationLog;
use emblue_db::repositories::{AccountRepo, MigrationLogRepo};
use emblue_db::{ConnectionProfile, DbError, PgConnectOptions};

/// Supplies the emBlue accounts to process.
pub trait AccountSource: Send + Sync {
    fn accounts(&self) -> impl Future<Output = Result<Vec<EmblueAccount>, DbError>> + Send;
}

/// Records (account, date) pairs whose execution was rejected.
pub trait PendingLog: Send + Sync {
    fn record_pending(
        &self,
        log: &CreateMigrationLog,
    ) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Database-backed store: accounts come from the resolved client database,
/// pending rows go to the registry.
pub struct RegistryStore {
    registry: PgConnectOptions,
    client: PgConnectOptions,
}

impl RegistryStore {
    pub fn new(registry: PgConnectOptions, client: &ConnectionProfile) -> Self {
        Self {
            registry,
            client: client.connect_options(),
        }
    }
}

impl AccountSource for RegistryStore {
    async fn accounts(&self) -> Result<Vec<EmblueAccount>, DbError> {
        AccountRepo::list_all(&self.client).await
    }
}

impl PendingLog for RegistryStore {
    async fn record_pending(&self, log: &CreateMigrationLog) -> Result<(), DbError> {
        MigrationLogRepo::insert(&self.registry, log).await
    }
}
