//! OAuth callback orchestration.

use super::LoginService;
use crate::errors::{LoginError, Result};
use crate::traits::{AccountStore, RoleGranter, SessionIssuer, SignUpService};
use crate::types::{AuthenticationResponse, OAuthCallbackParams};
use glossia_sso_tenant::TenantStore;
use tracing::info;

impl<T, A, U, R, J> LoginService<T, A, U, R, J>
where
    T: TenantStore,
    A: AccountStore,
    U: SignUpService,
    R: RoleGranter,
    J: SessionIssuer,
{
    /// Handle one OAuth/OIDC callback from an identity provider
    ///
    /// Linear chain: provider error check, tenant resolution, code
    /// exchange, identity token verification, reconciliation, session
    /// token issuance. Any stage failure short-circuits the rest. The
    /// only write is account creation inside reconciliation, so a failure
    /// before that point leaves no residue.
    pub async fn handle_oauth_callback(
        &self,
        params: OAuthCallbackParams,
    ) -> Result<AuthenticationResponse> {
        if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
            let description = params.error_description.clone().unwrap_or_default();
            info!(error = %error, description = %description, "Third party auth failed");
            return Err(LoginError::ProviderError {
                error: error.to_string(),
                description,
            });
        }

        let tenant = self.tenants.resolve_by_domain(&params.provider_domain).await?;

        let token_response = self
            .exchange
            .exchange(&tenant, &params.code, &params.redirect_url)
            .await?;

        let identity = self
            .verifier
            .verify(&token_response.id_token, &tenant.jwk_set_uri)
            .await?;

        let account = self
            .reconcile(&identity, &tenant, params.invitation_code.as_deref())
            .await?;

        let access_token = self.sessions.mint_token(account.id).await?;

        info!(account_id = %account.id, domain = %tenant.domain, "SSO login succeeded");

        Ok(AuthenticationResponse { access_token })
    }
}
