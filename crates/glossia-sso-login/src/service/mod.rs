//! Login service: callback orchestration and reconciliation.

mod callback;
mod reconcile;

pub(crate) use reconcile::derive_account_name;

use crate::traits::{AccountStore, RoleGranter, SessionIssuer, SignUpService};
use glossia_sso_oauth::{IdTokenVerifier, TokenExchangeClient};
use glossia_sso_tenant::{TenantDirectory, TenantStore};
use std::sync::Arc;

/// Orchestrates one OAuth/OIDC login attempt
///
/// Stateless per request: every call walks the same linear chain of
/// stages and touches shared state only through the tenant and account
/// stores.
pub struct LoginService<T, A, U, R, J>
where
    T: TenantStore,
    A: AccountStore,
    U: SignUpService,
    R: RoleGranter,
    J: SessionIssuer,
{
    pub(crate) tenants: TenantDirectory<T>,
    pub(crate) accounts: Arc<A>,
    pub(crate) sign_up: Arc<U>,
    pub(crate) roles: Arc<R>,
    pub(crate) sessions: Arc<J>,
    pub(crate) exchange: TokenExchangeClient,
    pub(crate) verifier: IdTokenVerifier,
}

impl<T, A, U, R, J> LoginService<T, A, U, R, J>
where
    T: TenantStore,
    A: AccountStore,
    U: SignUpService,
    R: RoleGranter,
    J: SessionIssuer,
{
    /// Create a login service over its collaborators
    pub fn new(
        tenants: TenantDirectory<T>,
        accounts: Arc<A>,
        sign_up: Arc<U>,
        roles: Arc<R>,
        sessions: Arc<J>,
    ) -> Self {
        Self {
            tenants,
            accounts,
            sign_up,
            roles,
            sessions,
            exchange: TokenExchangeClient::new(),
            verifier: IdTokenVerifier::new(),
        }
    }
}
