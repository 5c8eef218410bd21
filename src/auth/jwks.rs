// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing key set (JWKS) fetching and caching.
//!
//! ## Lifecycle
//!
//! - The key set is fetched at most once per process, either eagerly at
//!   startup ([`KeyCache::initialize`]) or lazily by the first verification
//! - Concurrent first access is single-flight: one network fetch, every other
//!   caller awaits its outcome
//! - The outcome is never refreshed. A failed fetch is sticky and leaves the
//!   process unready; keys rotated while the process stays warm are not seen
//!   until the next cold start

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{Algorithm, DecodingKey};
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use super::error::AuthError;

/// Timeout for the one-time JWKS request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Public keys published by the token issuer, keyed by `kid`.
#[derive(Debug, Clone)]
pub struct SigningKeySet {
    jwks: JwkSet,
}

impl SigningKeySet {
    pub fn new(jwks: JwkSet) -> Self {
        Self { jwks }
    }

    /// Number of key records in the set.
    pub fn len(&self) -> usize {
        self.jwks.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jwks.keys.is_empty()
    }

    /// Find the key record for a key identifier.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.jwks
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid))
    }

    /// Reconstruct the public key and its algorithm for a key identifier.
    pub fn decoding_key(&self, kid: &str) -> Result<(DecodingKey, Algorithm), AuthError> {
        let jwk = self.find(kid).ok_or(AuthError::UnknownSigningKey)?;
        jwk_to_decoding_key(jwk)
    }
}

enum KeySource {
    /// Fetched from the issuer's key-distribution endpoint.
    Endpoint { url: String, client: reqwest::Client },
    /// Supplied in-process; the cell is already initialized.
    Preloaded,
}

struct Inner {
    source: KeySource,
    cell: OnceCell<Result<SigningKeySet, String>>,
}

/// Process-wide, initialize-once cache of the signing key set.
///
/// Cheap to clone; clones share the same cell.
#[derive(Clone)]
pub struct KeyCache {
    inner: Arc<Inner>,
}

impl KeyCache {
    /// Create a cache that fetches from `jwks_url` on first use.
    pub fn new(jwks_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::KeySetUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                source: KeySource::Endpoint {
                    url: jwks_url.into(),
                    client,
                },
                cell: OnceCell::new(),
            }),
        })
    }

    /// Create a cache around keys that are already known.
    pub fn preloaded(jwks: JwkSet) -> Self {
        Self {
            inner: Arc::new(Inner {
                source: KeySource::Preloaded,
                cell: OnceCell::new_with(Some(Ok(SigningKeySet::new(jwks)))),
            }),
        }
    }

    /// The JWKS endpoint, if this cache fetches remotely.
    pub fn jwks_url(&self) -> Option<&str> {
        match &self.inner.source {
            KeySource::Endpoint { url, .. } => Some(url),
            KeySource::Preloaded => None,
        }
    }

    /// Whether the key set has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(self.inner.cell.get(), Some(Ok(_)))
    }

    /// Eagerly load the key set. Returns the number of keys.
    ///
    /// Intended for startup: an error here means the process is unready.
    pub async fn initialize(&self) -> Result<usize, AuthError> {
        self.key_set().await.map(SigningKeySet::len)
    }

    /// Get the key set, fetching it on first access.
    pub async fn key_set(&self) -> Result<&SigningKeySet, AuthError> {
        self.inner
            .cell
            .get_or_init(|| self.fetch())
            .await
            .as_ref()
            .map_err(|msg| AuthError::KeySetUnavailable(msg.clone()))
    }

    async fn fetch(&self) -> Result<SigningKeySet, String> {
        let KeySource::Endpoint { url, client } = &self.inner.source else {
            return Err("no key source configured".to_string());
        };

        info!(jwks_url = %url, "Fetching signing key set");

        let result = async {
            let response = client.get(url).send().await.map_err(|e| e.to_string())?;

            if !response.status().is_success() {
                return Err(format!("HTTP {} from JWKS endpoint", response.status()));
            }

            response.json::<JwkSet>().await.map_err(|e| e.to_string())
        }
        .await;

        match result {
            Ok(jwks) => {
                info!(keys = jwks.keys.len(), "Signing key set loaded");
                Ok(SigningKeySet::new(jwks))
            }
            Err(e) => {
                error!(error = %e, "Signing key set fetch failed; authorizer is unready");
                Err(e)
            }
        }
    }
}

/// Convert a JWK to a DecodingKey and the algorithm it implies.
fn jwk_to_decoding_key(jwk: &Jwk) -> Result<(DecodingKey, Algorithm), AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => {
            let key = DecodingKey::from_rsa_components(&rsa.n, &rsa.e).map_err(|e| {
                warn!(error = %e, "Unusable RSA key record");
                AuthError::BadSignature
            })?;

            let alg = match jwk.common.key_algorithm {
                Some(KeyAlgorithm::RS384) => Algorithm::RS384,
                Some(KeyAlgorithm::RS512) => Algorithm::RS512,
                Some(KeyAlgorithm::PS256) => Algorithm::PS256,
                Some(KeyAlgorithm::PS384) => Algorithm::PS384,
                Some(KeyAlgorithm::PS512) => Algorithm::PS512,
                _ => Algorithm::RS256,
            };

            Ok((key, alg))
        }
        AlgorithmParameters::EllipticCurve(ec) => {
            let key = DecodingKey::from_ec_components(&ec.x, &ec.y).map_err(|e| {
                warn!(error = %e, "Unusable EC key record");
                AuthError::BadSignature
            })?;

            let alg = match jwk.common.key_algorithm {
                Some(KeyAlgorithm::ES384) => Algorithm::ES384,
                _ => Algorithm::ES256,
            };

            Ok((key, alg))
        }
        _ => {
            warn!("Unsupported key type in signing key set");
            Err(AuthError::BadSignature)
        }
    }
}
