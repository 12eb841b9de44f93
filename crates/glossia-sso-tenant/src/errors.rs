//! Tenant directory error types.

use thiserror::Error;

/// Tenant directory errors
#[derive(Debug, Error)]
pub enum TenantError {
    /// No enabled provider configuration exists for the domain
    #[error("SSO domain not found or disabled: {0}")]
    DomainNotFoundOrDisabled(String),

    /// Tenant not found
    #[error("Tenant not found")]
    TenantNotFound,

    /// Authorization URI could not be parsed when deriving the domain
    #[error("Invalid authorization uri: {0}")]
    InvalidAuthorizationUri(String),

    /// Deployment configuration is incomplete or unparsable
    #[error("Invalid SSO configuration: {0}")]
    InvalidConfig(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for tenant directory operations
pub type Result<T> = std::result::Result<T, TenantError>;
