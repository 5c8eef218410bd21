// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification against the cached signing key set.
//!
//! Each step is a hard precondition for the next:
//!
//! 1. Structure: three dot-separated base64url segments and a header naming
//!    a `kid`
//! 2. Key lookup in the [`KeyCache`]
//! 3. Signature over `header.payload`, using the key record's algorithm
//! 4. `exp` then `aud`
//!
//! Claims are never read before step 3 succeeds.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Validation};
use tracing::debug;

use super::{AuthError, KeyCache, TokenClaims};

/// Optional prefix on the presented credential.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Remove a leading `Bearer ` if present. Tokens without it pass through.
pub fn strip_bearer_prefix(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}

/// Verifies Cognito ID tokens for one app client.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: KeyCache,
    audience: String,
}

impl TokenVerifier {
    /// Create a verifier that accepts tokens issued for `audience`.
    pub fn new(keys: KeyCache, audience: impl Into<String>) -> Self {
        Self {
            keys,
            audience: audience.into(),
        }
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn keys(&self) -> &KeyCache {
        &self.keys
    }

    /// Verify a compact JWS and return its claims.
    pub async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, signature] = segments[..] else {
            return Err(AuthError::MalformedToken);
        };
        let decodes = |segment: &str| URL_SAFE_NO_PAD.decode(segment).is_ok();
        if !decodes(payload) || !decodes(signature) {
            return Err(AuthError::MalformedToken);
        }

        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.as_deref().ok_or(AuthError::MalformedToken)?;

        let (decoding_key, algorithm) = self.keys.key_set().await?.decoding_key(kid)?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_audience(&[&self.audience]);

        let token_data =
            decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
                debug!(kid, error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidKeyFormat => AuthError::BadSignature,
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    ErrorKind::InvalidAudience => AuthError::WrongAudience,
                    ErrorKind::MissingRequiredClaim(claim) if claim == "aud" => {
                        AuthError::WrongAudience
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }
}
