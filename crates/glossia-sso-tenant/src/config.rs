//! Statically configured SSO tenants from deployment configuration.

use crate::errors::{Result, TenantError};
use crate::types::SsoTenantConfig;

/// Process-wide global tenant configuration
///
/// When enabled, this configuration takes precedence over per-organization
/// tenants for its fixed domain. It is read-only at runtime and owns no
/// organization.
#[derive(Debug, Clone)]
pub struct GlobalSsoConfig {
    /// Whether the global tenant is active
    pub enabled: bool,

    /// Fixed domain the global tenant answers for
    pub domain: String,

    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Provider authorization endpoint
    pub authorization_uri: String,

    /// Provider token endpoint
    pub token_uri: String,

    /// Provider signing key set (JWKS) endpoint
    pub jwk_set_uri: String,
}

impl GlobalSsoConfig {
    /// Load the global tenant configuration from environment variables
    ///
    /// Returns a disabled configuration when `SSO_GLOBAL_ENABLED` is unset
    /// or false. When enabled, every provider field is required.
    pub fn from_env() -> Result<Self> {
        let enabled = match std::env::var("SSO_GLOBAL_ENABLED") {
            Ok(value) => value.parse::<bool>().map_err(|_| {
                TenantError::InvalidConfig(format!("SSO_GLOBAL_ENABLED is not a boolean: {}", value))
            })?,
            Err(_) => false,
        };

        if !enabled {
            return Ok(Self::disabled());
        }

        Ok(GlobalSsoConfig {
            enabled: true,
            domain: required_var("SSO_GLOBAL_DOMAIN")?,
            client_id: required_var("SSO_GLOBAL_CLIENT_ID")?,
            client_secret: required_var("SSO_GLOBAL_CLIENT_SECRET")?,
            authorization_uri: required_var("SSO_GLOBAL_AUTHORIZATION_URI")?,
            token_uri: required_var("SSO_GLOBAL_TOKEN_URI")?,
            jwk_set_uri: required_var("SSO_GLOBAL_JWK_SET_URI")?,
        })
    }

    /// A configuration that never matches any domain
    pub fn disabled() -> Self {
        GlobalSsoConfig {
            enabled: false,
            domain: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            authorization_uri: String::new(),
            token_uri: String::new(),
            jwk_set_uri: String::new(),
        }
    }

    /// Resolved view of the global tenant for the login flow.
    pub fn to_config(&self) -> SsoTenantConfig {
        SsoTenantConfig {
            domain: self.domain.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            authorization_uri: self.authorization_uri.clone(),
            token_uri: self.token_uri.clone(),
            jwk_set_uri: self.jwk_set_uri.clone(),
            organization_id: None,
        }
    }
}

/// Whether per-organization tenants are enabled for this deployment
pub fn local_tenants_enabled_from_env() -> Result<bool> {
    match std::env::var("SSO_LOCAL_ENABLED") {
        Ok(value) => value.parse::<bool>().map_err(|_| {
            TenantError::InvalidConfig(format!("SSO_LOCAL_ENABLED is not a boolean: {}", value))
        }),
        Err(_) => Ok(true),
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        TenantError::InvalidConfig(format!("{} is required when the global tenant is enabled", name))
    })
}
