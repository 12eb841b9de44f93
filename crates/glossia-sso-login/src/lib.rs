//! # glossia-sso-login
//!
//! SSO login orchestration for Glossia.
//!
//! Drives one OAuth/OIDC callback through its stages: tenant resolution,
//! code-for-token exchange, identity token verification, and
//! reconciliation of the verified identity against local accounts
//! (provisioning one on first login). Each stage's failure is terminal
//! for the attempt and carries a typed error.
//!
//! Persistence, invitation redemption, role membership, and session token
//! issuance are consumed through traits; this crate performs no I/O of
//! its own beyond the provider network calls.

#![warn(clippy::all)]

pub mod errors;
mod service;
pub mod traits;
pub mod types;


pub use errors::{AccountStoreError, LoginError, Result, StoreResult};
pub use service::LoginService;
pub use traits::{AccountStore, RoleGranter, SessionIssuer, SignUpService};
pub use types::{
    AccountType, AuthenticationResponse, NewAccount, OAuthCallbackParams, OrganizationRole,
    UserAccount,
};
