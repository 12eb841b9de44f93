//! Login flow type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an account authenticates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Password-based account managed locally
    Local,
    /// Account provisioned by a third-party identity provider
    ThirdParty,
}

/// Membership role granted on an organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRole {
    /// Regular member
    Member,
    /// Organization owner
    Owner,
}

/// Local user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique account ID
    pub id: Uuid,

    /// Unique username; equals the email for SSO-provisioned accounts
    pub username: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Subject identifier at the external provider
    pub third_party_auth_id: Option<String>,

    /// Tenant domain the identity came from
    pub third_party_auth_type: Option<String>,

    /// How this account authenticates
    pub account_type: AccountType,
}

/// Payload for creating an account; the store assigns the ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Unique username
    pub username: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Subject identifier at the external provider
    pub third_party_auth_id: Option<String>,

    /// Tenant domain the identity came from
    pub third_party_auth_type: Option<String>,

    /// How this account authenticates
    pub account_type: AccountType,
}

/// Parameters of one OAuth callback from the provider
#[derive(Debug, Clone)]
pub struct OAuthCallbackParams {
    /// Tenant domain the login was initiated for
    pub provider_domain: String,

    /// Authorization code returned by the provider
    pub code: String,

    /// Redirect URL the code was issued for
    pub redirect_url: String,

    /// Error code, when the provider aborted the authorization
    pub error: Option<String>,

    /// Error description accompanying `error`
    pub error_description: Option<String>,

    /// Invitation code carried through the login, redeemed on sign-up
    pub invitation_code: Option<String>,
}

/// Successful login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Session token minted for the reconciled account
    pub access_token: String,
}
