//! Trigger configuration loaded once at process start.
//!
//! Business logic never reads the environment directly: `main` builds a
//! [`TriggerConfig`] and passes it by reference to every component.

use std::fmt;

use crate::error::CoreError;

/// Default PostgreSQL port for the registry and client databases.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default number of days before today included in a run.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

// ---------------------------------------------------------------------------
// Settings groups
// ---------------------------------------------------------------------------

/// Connection settings for the shared tenant registry database.
///
/// The client database reuses `user`, `host`, `port` and `password`; only
/// the database name differs. Without a password the driver falls back to
/// `PGPASSWORD` or `~/.pgpass`.
#[derive(Clone)]
pub struct RegistrySettings {
    pub database: String,
    pub user: String,
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Static AWS credentials for the Step Functions client.
#[derive(Clone)]
pub struct AwsSettings {
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TriggerConfig
// ---------------------------------------------------------------------------

/// Complete configuration for one trigger deployment.
#[derive(Clone)]
pub struct TriggerConfig {
    /// Symmetric key used to decrypt `tenant.hey_key` tokens.
    pub fernet_key: String,
    pub registry: RegistrySettings,
    /// Database name every matched tenant connects to.
    pub client_db: String,
    /// Plaintext key this deployment identifies itself with.
    pub client_key: String,
    pub aws: AwsSettings,
    pub state_machine_arn: String,
    /// Optional prefix for deterministic execution names.
    pub execution_name: Option<String>,
    pub lookback_days: u32,
}

impl fmt::Debug for TriggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerConfig")
            .field("fernet_key", &"<redacted>")
            .field("registry", &self.registry)
            .field("client_db", &self.client_db)
            .field("client_key", &"<redacted>")
            .field("aws", &self.aws)
            .field("state_machine_arn", &self.state_machine_arn)
            .field("execution_name", &self.execution_name)
            .field("lookback_days", &self.lookback_days)
            .finish()
    }
}

impl TriggerConfig {
    /// Load configuration from process environment variables.
    ///
    /// | Env Var               | Default   |
    /// |-----------------------|-----------|
    /// | `FERNET_KEY`          | required  |
    /// | `TENANT_DB`           | required  |
    /// | `TENANT_USER`         | required  |
    /// | `TENANT_HOST`         | required  |
    /// | `TENANT_PASSWORD`     | unset     |
    /// | `TENANT_PORT`         | `5432`    |
    /// | `CLIENT_DB`           | required  |
    /// | `CLIENT_KEY`          | required  |
    /// | `REGION`              | required  |
    /// | `ACCESS_KEY`          | required  |
    /// | `SECRET_KEY`          | required  |
    /// | `STATE_FUNCTION_ARN`  | required  |
    /// | `STATE_FUNCTION_NAME` | unset     |
    /// | `LOOKBACK_DAYS`       | `7`       |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            get(name).ok_or_else(|| CoreError::Config(format!("{name} must be set")))
        };

        let port = match get("TENANT_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| CoreError::Config(format!("TENANT_PORT must be a valid u16: {e}")))?,
            None => DEFAULT_DB_PORT,
        };

        let lookback_days = match get("LOOKBACK_DAYS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                CoreError::Config(format!("LOOKBACK_DAYS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_LOOKBACK_DAYS,
        };

        Ok(Self {
            fernet_key: required("FERNET_KEY")?,
            registry: RegistrySettings {
                database: required("TENANT_DB")?,
                user: required("TENANT_USER")?,
                host: required("TENANT_HOST")?,
                port,
                password: get("TENANT_PASSWORD"),
            },
            client_db: required("CLIENT_DB")?,
            client_key: required("CLIENT_KEY")?,
            aws: AwsSettings {
                region: required("REGION")?,
                access_key: required("ACCESS_KEY")?,
                secret_key: required("SECRET_KEY")?,
            },
            state_machine_arn: required("STATE_FUNCTION_ARN")?,
            execution_name: get("STATE_FUNCTION_NAME"),
            lookback_days,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
