//! Collaborator trait definitions for the login flow.
//!
//! Persistence and session issuance live outside this crate; the flow
//! consumes them through these interfaces.

use crate::errors::{Result, StoreResult};
use crate::types::{NewAccount, OrganizationRole, UserAccount};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence interface for user accounts
///
/// Implementations must enforce uniqueness of `username` and of the
/// (`third_party_auth_type`, `third_party_auth_id`) pair, reporting
/// violations as [`crate::AccountStoreError::AlreadyExists`]. That check
/// is the serialization point for concurrent logins of the same identity.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find the account linked to an external identity
    async fn find_by_external_identity(
        &self,
        auth_type: &str,
        auth_id: &str,
    ) -> StoreResult<Option<UserAccount>>;

    /// Find an active account by email
    async fn find_active_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>>;

    /// Create an account, enforcing the uniqueness invariants
    async fn create(&self, account: NewAccount) -> StoreResult<UserAccount>;
}

/// Sign-up collaborator: persists a new account and redeems the
/// invitation code when present
#[async_trait]
pub trait SignUpService: Send + Sync {
    /// Persist the account and redeem the invitation
    async fn sign_up(
        &self,
        account: NewAccount,
        invitation_code: Option<&str>,
    ) -> StoreResult<UserAccount>;
}

/// Grants membership roles on organizations
#[async_trait]
pub trait RoleGranter: Send + Sync {
    /// Grant a role to an account on an organization
    async fn grant_role(
        &self,
        account_id: Uuid,
        organization_id: Uuid,
        role: OrganizationRole,
    ) -> Result<()>;
}

/// Mints the application's own session tokens
#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Mint an opaque session token for an account
    async fn mint_token(&self, account_id: Uuid) -> Result<String>;
}
