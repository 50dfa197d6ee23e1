//! Registry and client database access.
//!
//! Every statement runs on its own short-lived connection through
//! [`QueryExecutor`]; there is no pool. Repositories accept the
//! [`PgConnectOptions`] of the database they target, usually produced by a
//! [`ConnectionProfile`].

pub mod error;
pub mod executor;
pub mod models;
pub mod profile;
pub mod repositories;
pub mod resolver;

pub use error::DbError;
pub use executor::QueryExecutor;
pub use profile::ConnectionProfile;
pub use resolver::{ResolvedTenant, TenantResolver};
pub use sqlx::postgres::PgConnectOptions;
