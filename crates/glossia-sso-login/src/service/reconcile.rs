//! Identity-to-account reconciliation.

use super::LoginService;
use crate::errors::{AccountStoreError, LoginError, Result};
use crate::traits::{AccountStore, RoleGranter, SessionIssuer, SignUpService};
use crate::types::{AccountType, NewAccount, OrganizationRole, UserAccount};
use glossia_sso_oauth::VerifiedIdentity;
use glossia_sso_tenant::{SsoTenantConfig, TenantStore};
use tracing::{info, warn};

impl<T, A, U, R, J> LoginService<T, A, U, R, J>
where
    T: TenantStore,
    A: AccountStore,
    U: SignUpService,
    R: RoleGranter,
    J: SessionIssuer,
{
    /// Map a verified external identity to a local account, creating one
    /// on first login
    ///
    /// Idempotent for a given (domain, sub): a repeated login returns the
    /// same account without touching the store beyond the lookup. An
    /// active account already holding the identity's email under a
    /// different identity fails the attempt instead of merging.
    pub(crate) async fn reconcile(
        &self,
        identity: &VerifiedIdentity,
        tenant: &SsoTenantConfig,
        invitation_code: Option<&str>,
    ) -> Result<UserAccount> {
        let email = identity
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                info!(domain = %tenant.domain, "Third party identity has no email claim. Missing email scope?");
                LoginError::ThirdPartyAuthNoEmail
            })?;

        if let Some(existing) = self
            .accounts
            .find_by_external_identity(&tenant.domain, &identity.sub)
            .await?
        {
            return Ok(existing);
        }

        if self.accounts.find_active_by_email(email).await?.is_some() {
            warn!(domain = %tenant.domain, "SSO identity collides with an existing active account");
            return Err(LoginError::UsernameAlreadyExists);
        }

        let account = NewAccount {
            username: email.to_string(),
            name: derive_account_name(identity, email),
            email: email.to_string(),
            third_party_auth_id: Some(identity.sub.clone()),
            third_party_auth_type: Some(tenant.domain.clone()),
            account_type: AccountType::ThirdParty,
        };

        let account = match self.sign_up.sign_up(account, invitation_code).await {
            Ok(account) => account,
            Err(AccountStoreError::AlreadyExists) => {
                // Lost the provisioning race to a concurrent login for the
                // same identity; the winner's account must now be visible.
                return self
                    .accounts
                    .find_by_external_identity(&tenant.domain, &identity.sub)
                    .await?
                    .ok_or(LoginError::UsernameAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(organization_id) = tenant.organization_id {
            self.roles
                .grant_role(account.id, organization_id, OrganizationRole::Member)
                .await?;
        }

        info!(account_id = %account.id, domain = %tenant.domain, "Provisioned account for first SSO login");

        Ok(account)
    }
}

/// Pick a display name from the identity claims: the `name` claim wins,
/// then `given_name` and `family_name` together, then the email local
/// part.
pub(crate) fn derive_account_name(identity: &VerifiedIdentity, email: &str) -> String {
    if let Some(name) = &identity.name {
        return name.clone();
    }

    if let (Some(given), Some(family)) = (&identity.given_name, &identity.family_name) {
        return format!("{} {}", given, family);
    }

    email.split('@').next().unwrap_or(email).to_string()
}
