//! Tenant directory: provider configuration lookup and administration.

use crate::config::GlobalSsoConfig;
use crate::errors::{Result, TenantError};
use crate::traits::TenantStore;
use crate::types::{CreateProviderRequest, SsoTenant, SsoTenantConfig};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

/// Resolves SSO provider configurations for login attempts and carries
/// the administrative save-or-update path.
///
/// Resolution tries a fixed chain of sources in priority order: the
/// statically configured global tenant first, then the per-organization
/// tenant store. The first applicable source wins.
pub struct TenantDirectory<S: TenantStore> {
    store: Arc<S>,
    global: GlobalSsoConfig,
    local_enabled: bool,
}

impl<S: TenantStore> TenantDirectory<S> {
    /// Create a directory over a tenant store and deployment configuration
    pub fn new(store: Arc<S>, global: GlobalSsoConfig, local_enabled: bool) -> Self {
        Self {
            store,
            global,
            local_enabled,
        }
    }

    /// Resolve the enabled provider configuration for a domain
    ///
    /// The global tenant wins whenever it is enabled and its domain
    /// matches, regardless of any per-organization tenant sharing the
    /// domain. Per-organization tenants are consulted only when local
    /// tenants are enabled for the deployment, and only enabled tenants
    /// match.
    pub async fn resolve_by_domain(&self, domain: &str) -> Result<SsoTenantConfig> {
        if let Some(config) = self.resolve_global(domain) {
            debug!(domain = %domain, "Resolved domain to the global tenant");
            return Ok(config);
        }

        if let Some(config) = self.resolve_local(domain).await? {
            debug!(domain = %domain, "Resolved domain to an organization tenant");
            return Ok(config);
        }

        Err(TenantError::DomainNotFoundOrDisabled(domain.to_string()))
    }

    fn resolve_global(&self, domain: &str) -> Option<SsoTenantConfig> {
        if self.global.enabled && self.global.domain == domain {
            Some(self.global.to_config())
        } else {
            None
        }
    }

    async fn resolve_local(&self, domain: &str) -> Result<Option<SsoTenantConfig>> {
        if !self.local_enabled {
            return Ok(None);
        }

        let tenant = self.store.find_enabled_by_domain(domain).await?;
        Ok(tenant.map(|t| t.to_config()))
    }

    /// Get a tenant by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<SsoTenant> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(TenantError::TenantNotFound)
    }

    /// Get a tenant by domain, regardless of its enabled flag
    pub async fn get_by_domain(&self, domain: &str) -> Result<SsoTenant> {
        self.store
            .find_by_domain(domain)
            .await?
            .ok_or(TenantError::TenantNotFound)
    }

    /// Find the tenant owned by an organization
    pub async fn find_by_organization(&self, organization_id: Uuid) -> Result<Option<SsoTenant>> {
        self.store.find_by_organization(organization_id).await
    }

    /// Get the tenant owned by an organization
    pub async fn get_by_organization(&self, organization_id: Uuid) -> Result<SsoTenant> {
        self.find_by_organization(organization_id)
            .await?
            .ok_or(TenantError::TenantNotFound)
    }

    /// List all tenants
    pub async fn find_all(&self) -> Result<Vec<SsoTenant>> {
        self.store.find_all().await
    }

    /// Create or update the provider configuration for an organization
    ///
    /// Each organization owns at most one tenant; a second save overwrites
    /// every provider field of the existing one. The domain is taken from
    /// the request when given, otherwise derived from the authorization
    /// URI.
    pub async fn save_or_update(
        &self,
        request: CreateProviderRequest,
        organization_id: Uuid,
    ) -> Result<SsoTenant> {
        let tenant = match self.store.find_by_organization(organization_id).await? {
            Some(existing) => apply_request(existing, request)?,
            None => {
                let tenant = apply_request(
                    SsoTenant {
                        id: Uuid::new_v4(),
                        name: String::new(),
                        domain: String::new(),
                        organization_id: Some(organization_id),
                        client_id: String::new(),
                        client_secret: String::new(),
                        authorization_uri: String::new(),
                        token_uri: String::new(),
                        jwk_set_uri: String::new(),
                        redirect_uri_base: String::new(),
                        enabled: false,
                    },
                    request,
                )?;
                info!(organization_id = %organization_id, domain = %tenant.domain, "Creating SSO tenant");
                tenant
            }
        };

        self.store.save(tenant).await
    }
}

fn apply_request(mut tenant: SsoTenant, request: CreateProviderRequest) -> Result<SsoTenant> {
    tenant.domain = match request.domain {
        Some(domain) => domain,
        None => extract_domain(&request.authorization_uri)?,
    };
    tenant.name = request.name.unwrap_or_default();
    tenant.client_id = request.client_id;
    tenant.client_secret = request.client_secret;
    tenant.authorization_uri = request.authorization_uri;
    tenant.token_uri = request.token_uri;
    tenant.jwk_set_uri = request.jwk_set_uri;
    tenant.redirect_uri_base = strip_trailing_slash(&request.redirect_uri);
    tenant.enabled = request.enabled;
    Ok(tenant)
}

/// Derive a tenant domain from an authorization URI: the host, with the
/// port appended when it is not the scheme default, and a leading `www.`
/// stripped.
fn extract_domain(authorization_uri: &str) -> Result<String> {
    let uri = Url::parse(authorization_uri)
        .map_err(|_| TenantError::InvalidAuthorizationUri(authorization_uri.to_string()))?;

    let host = uri
        .host_str()
        .ok_or_else(|| TenantError::InvalidAuthorizationUri(authorization_uri.to_string()))?;

    let domain = match uri.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(domain
        .strip_prefix("www.")
        .map(str::to_string)
        .unwrap_or(domain))
}

fn strip_trailing_slash(redirect_uri: &str) -> String {
    redirect_uri
        .strip_suffix('/')
        .unwrap_or(redirect_uri)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::RwLock;

    struct MemoryTenantStore {
        tenants: RwLock<Vec<SsoTenant>>,
    }

    impl MemoryTenantStore {
        fn new() -> Self {
            Self {
                tenants: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TenantStore for MemoryTenantStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<SsoTenant>> {
            Ok(self
                .tenants
                .read()
                .await
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn find_by_domain(&self, domain: &str) -> Result<Option<SsoTenant>> {
            Ok(self
                .tenants
                .read()
                .await
                .iter()
                .find(|t| t.domain == domain)
                .cloned())
        }

        async fn find_enabled_by_domain(&self, domain: &str) -> Result<Option<SsoTenant>> {
            Ok(self
                .tenants
                .read()
                .await
                .iter()
                .find(|t| t.domain == domain && t.enabled)
                .cloned())
        }

        async fn find_by_organization(&self, organization_id: Uuid) -> Result<Option<SsoTenant>> {
            Ok(self
                .tenants
                .read()
                .await
                .iter()
                .find(|t| t.organization_id == Some(organization_id))
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<SsoTenant>> {
            Ok(self.tenants.read().await.clone())
        }

        async fn save(&self, tenant: SsoTenant) -> Result<SsoTenant> {
            let mut tenants = self.tenants.write().await;
            tenants.retain(|t| t.id != tenant.id);
            tenants.push(tenant.clone());
            Ok(tenant)
        }
    }

    fn provider_request(authorization_uri: &str) -> CreateProviderRequest {
        CreateProviderRequest {
            name: Some("Acme IdP".to_string()),
            domain: None,
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            authorization_uri: authorization_uri.to_string(),
            token_uri: "https://idp.acme.com/token".to_string(),
            jwk_set_uri: "https://idp.acme.com/jwks".to_string(),
            redirect_uri: "https://app.glossia.dev/callback/".to_string(),
            enabled: true,
        }
    }

    fn global_config(domain: &str) -> GlobalSsoConfig {
        GlobalSsoConfig {
            enabled: true,
            domain: domain.to_string(),
            client_id: "global-client".to_string(),
            client_secret: "global-secret".to_string(),
            authorization_uri: "https://sso.glossia.dev/authorize".to_string(),
            token_uri: "https://sso.glossia.dev/token".to_string(),
            jwk_set_uri: "https://sso.glossia.dev/jwks".to_string(),
        }
    }

    #[test]
    fn test_extract_domain_plain_host() {
        assert_eq!(
            extract_domain("https://idp.acme.com/authorize").unwrap(),
            "idp.acme.com"
        );
    }

    #[test]
    fn test_extract_domain_keeps_non_default_port() {
        assert_eq!(
            extract_domain("https://idp.acme.com:8443/authorize").unwrap(),
            "idp.acme.com:8443"
        );
    }

    #[test]
    fn test_extract_domain_drops_default_port() {
        assert_eq!(
            extract_domain("https://idp.acme.com:443/authorize").unwrap(),
            "idp.acme.com"
        );
    }

    #[test]
    fn test_extract_domain_strips_www() {
        assert_eq!(
            extract_domain("https://www.acme.com/authorize").unwrap(),
            "acme.com"
        );
    }

    #[test]
    fn test_extract_domain_rejects_malformed_uri() {
        let result = extract_domain("not a uri");
        assert!(matches!(result, Err(TenantError::InvalidAuthorizationUri(_))));
    }

    #[tokio::test]
    async fn test_save_or_update_creates_then_overwrites() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), true);
        let organization_id = Uuid::new_v4();

        let created = directory
            .save_or_update(
                provider_request("https://idp.acme.com/authorize"),
                organization_id,
            )
            .await
            .unwrap();
        assert_eq!(created.domain, "idp.acme.com");
        assert_eq!(created.redirect_uri_base, "https://app.glossia.dev/callback");
        assert_eq!(created.organization_id, Some(organization_id));

        let mut request = provider_request("https://idp.acme.com/authorize");
        request.client_id = "rotated-client".to_string();
        let updated = directory
            .save_or_update(request, organization_id)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.client_id, "rotated-client");
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_or_update_prefers_explicit_domain() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), true);

        let mut request = provider_request("https://idp.acme.com/authorize");
        request.domain = Some("login.acme.com".to_string());
        let tenant = directory
            .save_or_update(request, Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(tenant.domain, "login.acme.com");
    }

    #[tokio::test]
    async fn test_resolve_prefers_global_tenant_over_local() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory = TenantDirectory::new(
            Arc::clone(&store),
            global_config("sso.glossia.dev"),
            true,
        );

        // Local tenant sharing the global domain must not shadow it.
        let mut request = provider_request("https://sso.glossia.dev/authorize");
        request.domain = Some("sso.glossia.dev".to_string());
        directory
            .save_or_update(request, Uuid::new_v4())
            .await
            .unwrap();

        let config = directory.resolve_by_domain("sso.glossia.dev").await.unwrap();
        assert_eq!(config.client_id, "global-client");
        assert_eq!(config.organization_id, None);
    }

    #[tokio::test]
    async fn test_resolve_falls_through_disabled_global() {
        let store = Arc::new(MemoryTenantStore::new());
        let mut global = global_config("idp.acme.com");
        global.enabled = false;
        let directory = TenantDirectory::new(Arc::clone(&store), global, true);

        directory
            .save_or_update(provider_request("https://idp.acme.com/authorize"), Uuid::new_v4())
            .await
            .unwrap();

        let config = directory.resolve_by_domain("idp.acme.com").await.unwrap();
        assert_eq!(config.client_id, "client");
    }

    #[tokio::test]
    async fn test_resolve_skips_disabled_local_tenant() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), true);

        let mut request = provider_request("https://idp.acme.com/authorize");
        request.enabled = false;
        directory
            .save_or_update(request, Uuid::new_v4())
            .await
            .unwrap();

        let result = directory.resolve_by_domain("idp.acme.com").await;
        assert!(matches!(
            result,
            Err(TenantError::DomainNotFoundOrDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_respects_local_toggle() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), false);

        directory
            .save_or_update(provider_request("https://idp.acme.com/authorize"), Uuid::new_v4())
            .await
            .unwrap();

        let result = directory.resolve_by_domain("idp.acme.com").await;
        assert!(matches!(
            result,
            Err(TenantError::DomainNotFoundOrDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_domain_ignores_enabled_flag() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), true);

        let mut request = provider_request("https://idp.acme.com/authorize");
        request.enabled = false;
        let saved = directory
            .save_or_update(request, Uuid::new_v4())
            .await
            .unwrap();

        let tenant = directory.get_by_domain("idp.acme.com").await.unwrap();
        assert_eq!(tenant.id, saved.id);
        assert_eq!(directory.get_by_id(saved.id).await.unwrap().id, saved.id);
    }

    #[tokio::test]
    async fn test_get_by_organization_missing() {
        let store = Arc::new(MemoryTenantStore::new());
        let directory =
            TenantDirectory::new(Arc::clone(&store), GlobalSsoConfig::disabled(), true);

        let result = directory.get_by_organization(Uuid::new_v4()).await;
        assert!(matches!(result, Err(TenantError::TenantNotFound)));
    }
}
