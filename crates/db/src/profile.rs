use std::fmt;

use emblue_core::config::RegistrySettings;
use sqlx::postgres::PgConnectOptions;

/// Credentials for one database, recomputed on every resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub db_name: String,
    pub db_user: String,
    pub db_host: String,
    pub db_password: Option<String>,
    pub db_port: u16,
}

impl ConnectionProfile {
    /// Profile for the shared tenant registry.
    pub fn registry(settings: &RegistrySettings) -> Self {
        Self::for_database(settings, &settings.database)
    }

    /// Profile for a tenant's client database.
    ///
    /// User, host, port and password are shared with the registry.
    pub fn client(settings: &RegistrySettings, client_db: &str) -> Self {
        Self::for_database(settings, client_db)
    }

    fn for_database(settings: &RegistrySettings, db_name: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
            db_user: settings.user.clone(),
            db_host: settings.host.clone(),
            db_password: settings.password.clone(),
            db_port: settings.port,
        }
    }

    /// Without a password, `PGPASSWORD` and `~/.pgpass` still apply.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);

        match &self.db_password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_host", &self.db_host)
            .field("db_password", &self.db_password.as_ref().map(|_| "<redacted>"))
            .field("db_port", &self.db_port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RegistrySettings {
        RegistrySettings {
            database: "registry".to_string(),
            user: "hey".to_string(),
            host: "db.internal".to_string(),
            port: 5433,
            password: Some("pg-pass-123".to_string()),
        }
    }

    #[test]
    fn client_profile_shares_registry_credentials() {
        let registry = ConnectionProfile::registry(&settings());
        let client = ConnectionProfile::client(&settings(), "client_a");
        assert_eq!(registry.db_name, "registry");
        assert_eq!(client.db_name, "client_a");
        assert_eq!(client.db_user, registry.db_user);
        assert_eq!(client.db_host, registry.db_host);
        assert_eq!(client.db_password, registry.db_password);
        assert_eq!(client.db_port, 5433);
    }

    #[test]
    fn connect_options_carry_profile_fields() {
        let options = ConnectionProfile::client(&settings(), "client_a").connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "hey");
        assert_eq!(options.get_database(), Some("client_a"));
    }

    #[test]
    fn missing_password_is_left_to_the_driver() {
        let settings = RegistrySettings {
            password: None,
            ..settings()
        };
        let profile = ConnectionProfile::registry(&settings);
        assert!(profile.db_password.is_none());
        assert_eq!(profile.connect_options().get_database(), Some("registry"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", ConnectionProfile::registry(&settings()));
        assert!(!rendered.contains("pg-pass-123"));
    }
}
