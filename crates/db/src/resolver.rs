//! Multi-tenant credential resolution.
//!
//! The registry `tenant` table stores a Fernet token per tenant. A caller
//! identifies itself with a plaintext key; the tenant whose token decrypts
//! to exactly that key selects the client connection profile.

use emblue_core::config::TriggerConfig;
use emblue_core::crypto::TokenCipher;
use sqlx::postgres::PgConnectOptions;

use crate::error::DbError;
use crate::models::tenant::TenantRecord;
use crate::profile::ConnectionProfile;
use crate::repositories::TenantRepo;

/// The tenant matched for a caller key and the profile to reach its data.
#[derive(Debug, Clone)]
pub struct ResolvedTenant {
    pub tenant: TenantRecord,
    pub profile: ConnectionProfile,
}

/// Resolves caller keys against the tenant registry.
pub struct TenantResolver {
    registry: PgConnectOptions,
    client: ConnectionProfile,
    cipher: TokenCipher,
}

impl TenantResolver {
    pub fn new(config: &TriggerConfig, cipher: TokenCipher) -> Self {
        Self::with_registry(
            ConnectionProfile::registry(&config.registry).connect_options(),
            ConnectionProfile::client(&config.registry, &config.client_db),
            cipher,
        )
    }

    /// Resolver reading tenants from an explicit registry target.
    pub fn with_registry(
        registry: PgConnectOptions,
        client: ConnectionProfile,
        cipher: TokenCipher,
    ) -> Self {
        Self {
            registry,
            client,
            cipher,
        }
    }

    /// Connection target of the shared registry database.
    pub fn registry_target(&self) -> &PgConnectOptions {
        &self.registry
    }

    /// Find the tenant whose stored token decrypts to `caller_key`.
    ///
    /// Reads every tenant row from the registry. The returned profile always
    /// targets the configured client database with the shared registry
    /// credentials; the matched tenant's own connection columns are carried
    /// along for reference only.
    pub async fn resolve(&self, caller_key: &str) -> Result<ResolvedTenant, DbError> {
        let tenants = TenantRepo::list_all(&self.registry).await?;

        let tenant = match_tenant(&tenants, caller_key, &self.cipher).ok_or_else(|| {
            tracing::error!(tenants = tenants.len(), "No tenant matches the client key");
            DbError::TenantNotFound
        })?;

        tracing::info!(
            tenant_db = tenant.db_name.as_deref().unwrap_or("-"),
            client_db = %self.client.db_name,
            "Resolved tenant for client key"
        );

        Ok(ResolvedTenant {
            tenant: tenant.clone(),
            profile: self.client.clone(),
        })
    }
}

/// Return the first tenant, in slice order, whose token decrypts to exactly
/// `caller_key`.
///
/// Rows without a token are skipped. Rows whose token cannot be decrypted
/// are logged and skipped. Comparison is byte-for-byte: no trimming and no
/// case folding of the plaintext.
pub fn match_tenant<'t>(
    tenants: &'t [TenantRecord],
    caller_key: &str,
    cipher: &TokenCipher,
) -> Option<&'t TenantRecord> {
    let mut matches = tenants
        .iter()
        .enumerate()
        .filter(|(row, tenant)| token_matches(*row, tenant, caller_key, cipher))
        .map(|(_, tenant)| tenant);

    let first = matches.next()?;

    let duplicates = matches.count();
    if duplicates > 0 {
        tracing::warn!(
            duplicates,
            "Client key matches more than one tenant, using the first"
        );
    }

    Some(first)
}

fn token_matches(row: usize, tenant: &TenantRecord, caller_key: &str, cipher: &TokenCipher) -> bool {
    let Some(token) = tenant.token() else {
        return false;
    };

    match cipher.decrypt(token) {
        Ok(plaintext) => plaintext == caller_key,
        Err(e) => {
            tracing::warn!(row, error = %e, "Skipping tenant with undecryptable key");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
