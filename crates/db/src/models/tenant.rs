use std::fmt;

use sqlx::FromRow;

/// A row from the registry `tenant` table.
///
/// Every column is nullable text; `db_port` is cast to text when selected so
/// the model does not depend on how a given registry declares it.
#[derive(Clone, FromRow)]
pub struct TenantRecord {
    /// Fernet token that decrypts to the tenant's public key. Empty or
    /// `NULL` for tenants that cannot be resolved by key.
    pub hey_key: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_host: Option<String>,
    pub db_password: Option<String>,
    pub db_port: Option<String>,
    pub db_host_for_reading: Option<String>,
}

impl TenantRecord {
    /// The stored token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.hey_key.as_deref().filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for TenantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantRecord")
            .field("has_key", &self.token().is_some())
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_host", &self.db_host)
            .field("db_password", &"<redacted>")
            .field("db_port", &self.db_port)
            .field("db_host_for_reading", &self.db_host_for_reading)
            .finish()
    }
}
