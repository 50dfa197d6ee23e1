//! Row structs for the registry and client databases.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where rows are written, a create DTO for inserts.

pub mod account;
pub mod migration_log;
pub mod tenant;
