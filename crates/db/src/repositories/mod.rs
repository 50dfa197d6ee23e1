//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept the target `&PgConnectOptions` as the first argument and run
//! through [`QueryExecutor`](crate::executor::QueryExecutor).

pub mod account_repo;
pub mod migration_log_repo;
pub mod tenant_repo;

pub use account_repo::AccountRepo;
pub use migration_log_repo::MigrationLogRepo;
pub use tenant_repo::TenantRepo;
