//! # glossia-sso-oauth
//!
//! OAuth code exchange and OIDC identity token verification for Glossia SSO.
//!
//! This crate covers the two network stages of the login flow: exchanging
//! an authorization code for tokens at a tenant's token endpoint, and
//! verifying the returned identity token against the tenant's published
//! signing key set.
//!
//! # Security Note
//! Identity tokens are never persisted. Only the verified claims survive
//! the request, and only RSA-family signatures are accepted. Signature
//! verification failures are logged with detail but reported to callers
//! as a single opaque error.

#![warn(clippy::all)]

pub mod client;
pub mod errors;
pub mod jwks;
pub mod types;
pub mod validation;

pub use client::TokenExchangeClient;
pub use errors::{OAuthFlowError, Result};
pub use types::{IdTokenClaims, JwksCacheEntry, JwksKey, JwksKeySet, TokenResponse, VerifiedIdentity};
pub use validation::IdTokenVerifier;

/// Seconds since the unix epoch
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

pub(crate) fn http_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
