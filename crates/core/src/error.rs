#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid Fernet key: {0}")]
    InvalidKey(String),
}
