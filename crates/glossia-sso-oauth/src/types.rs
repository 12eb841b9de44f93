//! OAuth and OIDC wire types.

use serde::{Deserialize, Serialize};

/// Token endpoint response
///
/// Ephemeral: consumed for its identity token and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed OIDC identity token
    pub id_token: String,

    /// Scope granted by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Identity claims decoded from a verified identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Subject (provider's user ID)
    pub sub: String,

    /// Expiration time (unix timestamp)
    pub exp: u64,

    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Verified external identity
///
/// Exists only for the duration of one login request.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// Subject identifier at the provider
    pub sub: String,

    /// Full name claim
    pub name: Option<String>,

    /// Given name claim
    pub given_name: Option<String>,

    /// Family name claim
    pub family_name: Option<String>,

    /// Email claim
    pub email: Option<String>,

    /// Token expiry (unix timestamp)
    pub expires_at: u64,
}

impl From<IdTokenClaims> for VerifiedIdentity {
    fn from(claims: IdTokenClaims) -> Self {
        VerifiedIdentity {
            sub: claims.sub,
            name: claims.name,
            given_name: claims.given_name,
            family_name: claims.family_name,
            email: claims.email,
            expires_at: claims.exp,
        }
    }
}

/// JSON Web Key Set published by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwksKeySet {
    /// Array of JWK keys
    pub keys: Vec<JwksKey>,
}

impl JwksKeySet {
    /// Find key by Key ID (kid)
    pub fn find_key(&self, kid: &str) -> Option<&JwksKey> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// Individual JSON Web Key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwksKey {
    /// Key type (e.g., "RSA")
    pub kty: String,

    /// Key ID
    pub kid: Option<String>,

    /// Key use (e.g., "sig" for signature)
    #[serde(rename = "use")]
    pub use_: Option<String>,

    /// Algorithm (e.g., "RS256")
    pub alg: Option<String>,

    /// RSA modulus (base64url encoded)
    pub n: String,

    /// RSA public exponent (base64url encoded)
    pub e: String,
}

/// JWKS cache entry with expiration
#[derive(Debug, Clone)]
pub struct JwksCacheEntry {
    /// The cached key set
    pub jwks: JwksKeySet,

    /// Unix timestamp when the key set was fetched
    pub fetched_at: u64,

    /// Time-to-live in seconds
    pub ttl: u64,
}

impl JwksCacheEntry {
    /// Check if the cache entry is still valid
    pub fn is_valid(&self, current_time: u64) -> bool {
        current_time < self.fetched_at + self.ttl
    }
}
