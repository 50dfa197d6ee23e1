/// Errors from registry and client database access.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The connection could not be established (unreachable host, bad
    /// credentials, unknown database).
    #[error("Could not connect to database {database} on {host}: {source}")]
    ConnectionFailed {
        host: String,
        database: String,
        source: sqlx::Error,
    },

    /// The statement, commit or row decoding failed on an open connection.
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),

    /// No tenant token decrypts to the caller's key.
    #[error("No tenant matches the configured client key")]
    TenantNotFound,
}
