//! Tenant type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One configured SSO identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsoTenant {
    /// Unique tenant ID
    pub id: Uuid,

    /// Display name shown in administration
    pub name: String,

    /// Unique lookup key, matched against the provider domain on the callback
    pub domain: String,

    /// Owning organization. `None` for the statically configured global tenant.
    pub organization_id: Option<Uuid>,

    /// OAuth client ID registered with the provider
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Provider authorization endpoint
    pub authorization_uri: String,

    /// Provider token endpoint
    pub token_uri: String,

    /// Provider signing key set (JWKS) endpoint
    pub jwk_set_uri: String,

    /// Redirect URI prefix, stored without a trailing slash
    pub redirect_uri_base: String,

    /// Whether login through this tenant is allowed
    pub enabled: bool,
}

impl SsoTenant {
    /// Resolved view of this tenant for the login flow.
    pub fn to_config(&self) -> SsoTenantConfig {
        SsoTenantConfig {
            domain: self.domain.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            authorization_uri: self.authorization_uri.clone(),
            token_uri: self.token_uri.clone(),
            jwk_set_uri: self.jwk_set_uri.clone(),
            organization_id: self.organization_id,
        }
    }
}

/// Resolved provider configuration handed to the login flow
#[derive(Debug, Clone)]
pub struct SsoTenantConfig {
    /// Tenant domain, recorded on provisioned accounts as the auth type
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

    /// Owning organization. `None` when resolved from the global tenant.
    pub organization_id: Option<Uuid>,
}

/// Administrative request to create or update an organization's provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProviderRequest {
    /// Display name
    pub name: Option<String>,

    /// Explicit domain. Derived from `authorization_uri` when absent.
    pub domain: Option<String>,

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

    /// Redirect URI; a trailing slash is stripped before storage
    pub redirect_uri: String,

    /// Whether login through this tenant is allowed
    pub enabled: bool,
}
