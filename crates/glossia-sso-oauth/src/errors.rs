//! OAuth flow error types.

use thiserror::Error;

/// Errors from the code exchange and identity token verification stages
#[derive(Debug, Error)]
pub enum OAuthFlowError {
    /// Code-for-token exchange failed (transport error, error status, or
    /// unparsable response)
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// Identity token is not a three-segment signed JWT
    #[error("Malformed identity token")]
    MalformedToken,

    /// Identity token expiry is in the past
    #[error("Identity token expired at {expired_at}, current time {current_time}")]
    IdTokenExpired {
        /// Unix timestamp when the token expired
        expired_at: u64,
        /// Current unix timestamp
        current_time: u64,
    },

    /// Key-set retrieval, signature verification, or claim decoding failed
    ///
    /// Deliberately opaque: the underlying cause is logged at the verifier
    /// boundary and never surfaced to the caller.
    #[error("User info retrieval failed")]
    UserInfoRetrievalFailed,
}

/// Result type for OAuth flow operations
pub type Result<T> = std::result::Result<T, OAuthFlowError>;
