//! Tenant store trait definition.

use crate::errors::Result;
use crate::types::SsoTenant;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence interface for SSO tenants
///
/// Implementations must enforce the uniqueness invariants: at most one
/// tenant per domain, and at most one tenant per organization.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Find a tenant by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SsoTenant>>;

    /// Find a tenant by domain, regardless of its enabled flag
    async fn find_by_domain(&self, domain: &str) -> Result<Option<SsoTenant>>;

    /// Find an enabled tenant by domain
    async fn find_enabled_by_domain(&self, domain: &str) -> Result<Option<SsoTenant>>;

    /// Find the tenant owned by an organization
    async fn find_by_organization(&self, organization_id: Uuid) -> Result<Option<SsoTenant>>;

    /// List all tenants
    async fn find_all(&self) -> Result<Vec<SsoTenant>>;

    /// Persist a tenant, overwriting any previous version with the same ID
    async fn save(&self, tenant: SsoTenant) -> Result<SsoTenant>;
}
