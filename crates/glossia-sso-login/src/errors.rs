//! Login flow error types.

use thiserror::Error;

/// Account store errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    /// A uniqueness invariant was violated (username, or the
    /// third-party auth type/ID pair)
    ///
    /// This is the storage-layer serialization point for concurrent
    /// provisioning of the same identity.
    #[error("Account already exists")]
    AlreadyExists,

    /// Backend error
    #[error("Store error: {0}")]
    Backend(String),
}

/// Result type for account store operations
pub type StoreResult<T> = std::result::Result<T, AccountStoreError>;

/// Login flow errors
///
/// All variants are terminal for the current login attempt; nothing is
/// retried here, a human re-initiates login.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The identity provider itself reported an error on the callback
    #[error("Third party authentication failed: {description} {error}")]
    ProviderError {
        /// Error code passed through by the provider
        error: String,
        /// Human-readable description passed through by the provider
        description: String,
    },

    /// The verified identity carries no email claim
    #[error("Third party did not provide an email address")]
    ThirdPartyAuthNoEmail,

    /// An active account already uses this email under a different
    /// identity
    ///
    /// A security-relevant rejection: an SSO identity must never merge
    /// into an existing account it does not own.
    #[error("Username already exists")]
    UsernameAlreadyExists,

    /// Tenant resolution error
    #[error("Tenant error: {0}")]
    Tenant(#[from] glossia_sso_tenant::TenantError),

    /// Token exchange or identity verification error
    #[error("OAuth error: {0}")]
    OAuth(#[from] glossia_sso_oauth::OAuthFlowError),

    /// Account store error
    #[error("Account store error: {0}")]
    AccountStore(#[from] AccountStoreError),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for login flow operations
pub type Result<T> = std::result::Result<T, LoginError>;
