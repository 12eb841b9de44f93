//! Authorization-code-for-token exchange client.

use crate::errors::{OAuthFlowError, Result};
use crate::types::TokenResponse;
use glossia_sso_tenant::SsoTenantConfig;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Bounded timeout for the token endpoint; the exchange sits on a
/// user-interactive path.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the authorization-code-for-token exchange
pub struct TokenExchangeClient {
    http_client: Client,
}

impl TokenExchangeClient {
    /// Create a new exchange client
    pub fn new() -> Self {
        Self {
            http_client: crate::http_client(EXCHANGE_TIMEOUT),
        }
    }

    /// Exchange an authorization code for tokens at the tenant's token
    /// endpoint
    ///
    /// A single form-encoded POST; there are no retries. A failed exchange
    /// is terminal for the login attempt and the user re-initiates login.
    pub async fn exchange(
        &self,
        tenant: &SsoTenantConfig,
        code: &str,
        redirect_url: &str,
    ) -> Result<TokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("redirect_uri", redirect_url);
        params.insert("client_id", &tenant.client_id);
        params.insert("client_secret", &tenant.client_secret);
        params.insert("scope", "openid");

        let response = self
            .http_client
            .post(&tenant.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(token_uri = %tenant.token_uri, "Token endpoint unreachable: {}", e);
                OAuthFlowError::TokenExchangeFailed(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(token_uri = %tenant.token_uri, status = %status, "Token endpoint returned error status");
            return Err(OAuthFlowError::TokenExchangeFailed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            warn!(token_uri = %tenant.token_uri, "Failed to parse token response: {}", e);
            OAuthFlowError::TokenExchangeFailed(format!("invalid token response: {}", e))
        })
    }
}

impl Default for TokenExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}
