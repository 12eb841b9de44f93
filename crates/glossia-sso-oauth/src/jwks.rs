//! JWKS (JSON Web Key Set) fetching and caching.

use crate::current_timestamp;
use crate::errors::{OAuthFlowError, Result};
use crate::types::{JwksCacheEntry, JwksKeySet};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// How long a fetched key set stays usable before it is re-fetched
pub(crate) const JWKS_CACHE_TTL_SECS: u64 = 3600;

/// Process-wide key-set cache, keyed by JWKS URI
pub(crate) type JwksCache = Arc<RwLock<HashMap<String, JwksCacheEntry>>>;

/// Fetch a key set from a tenant's JWKS endpoint
pub(crate) async fn fetch_jwks(client: &Client, jwk_set_uri: &str) -> Result<JwksKeySet> {
    let response = client.get(jwk_set_uri).send().await.map_err(|e| {
        warn!(jwk_set_uri = %jwk_set_uri, "Failed to fetch key set: {}", e);
        OAuthFlowError::UserInfoRetrievalFailed
    })?;

    if !response.status().is_success() {
        warn!(jwk_set_uri = %jwk_set_uri, status = %response.status(), "Key set endpoint returned error status");
        return Err(OAuthFlowError::UserInfoRetrievalFailed);
    }

    response.json::<JwksKeySet>().await.map_err(|e| {
        warn!(jwk_set_uri = %jwk_set_uri, "Failed to parse key set: {}", e);
        OAuthFlowError::UserInfoRetrievalFailed
    })
}

/// Fetch a key set, preferring a still-valid cached copy
pub(crate) async fn fetch_jwks_cached(
    client: &Client,
    cache: &JwksCache,
    jwk_set_uri: &str,
) -> Result<JwksKeySet> {
    let current_time = current_timestamp();

    {
        let cache_read = cache.read().await;
        if let Some(entry) = cache_read.get(jwk_set_uri) {
            if entry.is_valid(current_time) {
                return Ok(entry.jwks.clone());
            }
        }
    }

    let jwks = fetch_jwks(client, jwk_set_uri).await?;

    {
        let mut cache_write = cache.write().await;
        cache_write.insert(
            jwk_set_uri.to_string(),
            JwksCacheEntry {
                jwks: jwks.clone(),
                fetched_at: current_time,
                ttl: JWKS_CACHE_TTL_SECS,
            },
        );
    }

    Ok(jwks)
}

/// Force-refresh a key set, replacing any cached copy
pub(crate) async fn fetch_jwks_fresh(
    client: &Client,
    cache: &JwksCache,
    jwk_set_uri: &str,
) -> Result<JwksKeySet> {
    {
        let mut cache_write = cache.write().await;
        cache_write.remove(jwk_set_uri);
    }

    let jwks = fetch_jwks(client, jwk_set_uri).await?;

    {
        let mut cache_write = cache.write().await;
        cache_write.insert(
            jwk_set_uri.to_string(),
            JwksCacheEntry {
                jwks: jwks.clone(),
                fetched_at: current_timestamp(),
                ttl: JWKS_CACHE_TTL_SECS,
            },
        );
    }

    Ok(jwks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JwksKey;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn jwks_body() -> serde_json::Value {
        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": "key-1",
                "n": "test_n",
                "e": "AQAB"
            }]
        })
    }

    #[tokio::test]
    async fn test_cached_fetch_hits_endpoint_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let cache: JwksCache = Arc::new(RwLock::new(HashMap::new()));
        let uri = format!("{}/jwks", server.uri());

        let first = fetch_jwks_cached(&client, &cache, &uri).await.unwrap();
        let second = fetch_jwks_cached(&client, &cache, &uri).await.unwrap();

        assert_eq!(first.keys.len(), 1);
        assert_eq!(second.keys.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_entry_is_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let cache: JwksCache = Arc::new(RwLock::new(HashMap::new()));
        let uri = format!("{}/jwks", server.uri());

        {
            let mut cache_write = cache.write().await;
            cache_write.insert(
                uri.clone(),
                JwksCacheEntry {
                    jwks: JwksKeySet { keys: vec![] },
                    fetched_at: 1000,
                    ttl: JWKS_CACHE_TTL_SECS,
                },
            );
        }

        let jwks = fetch_jwks_cached(&client, &cache, &uri).await.unwrap();
        assert_eq!(jwks.keys.len(), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_replaces_cached_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let cache: JwksCache = Arc::new(RwLock::new(HashMap::new()));
        let uri = format!("{}/jwks", server.uri());

        {
            let mut cache_write = cache.write().await;
            cache_write.insert(
                uri.clone(),
                JwksCacheEntry {
                    jwks: JwksKeySet {
                        keys: vec![JwksKey {
                            kty: "RSA".to_string(),
                            kid: Some("stale-key".to_string()),
                            use_: Some("sig".to_string()),
                            alg: Some("RS256".to_string()),
                            n: "stale_n".to_string(),
                            e: "AQAB".to_string(),
                        }],
                    },
                    fetched_at: current_timestamp(),
                    ttl: JWKS_CACHE_TTL_SECS,
                },
            );
        }

        let jwks = fetch_jwks_fresh(&client, &cache, &uri).await.unwrap();
        assert_eq!(jwks.find_key("key-1").unwrap().kid.as_deref(), Some("key-1"));
        assert!(jwks.find_key("stale-key").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_maps_to_opaque_error() {
        let client = Client::new();
        let result = fetch_jwks(&client, "http://127.0.0.1:1/jwks").await;
        assert!(matches!(
            result,
            Err(OAuthFlowError::UserInfoRetrievalFailed)
        ));
    }
}
