// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification errors.

/// Token verification error type.
///
/// Every variant except [`AuthError::KeySetUnavailable`] is a verdict about
/// the presented token and collapses to an opaque `Unauthorized` at the
/// invocation boundary. The detail is only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was present in the invocation
    MissingToken,
    /// Token is not a three-segment base64url JWS, or its header is unusable
    MalformedToken,
    /// Header `kid` does not name a key in the signing key set
    UnknownSigningKey,
    /// Signature does not verify against the matched key
    BadSignature,
    /// Token `exp` is in the past
    Expired,
    /// Token `aud` is not the configured app client id
    WrongAudience,
    /// The signing key set could not be fetched at cold start
    KeySetUnavailable(String),
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::UnknownSigningKey => "unknown_key",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "expired",
            AuthError::WrongAudience => "wrong_audience",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }

    /// Whether this error is a judgement on the caller's token (a denial)
    /// rather than a failure of the authorizer itself.
    pub fn is_denial(&self) -> bool {
        !matches!(self, AuthError::KeySetUnavailable(_))
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "No token present in the request"),
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::UnknownSigningKey => write!(f, "Public key not found in the signing key set"),
            AuthError::BadSignature => write!(f, "Signature verification failed"),
            AuthError::Expired => write!(f, "Token is expired"),
            AuthError::WrongAudience => write!(f, "Token was not issued for this audience"),
            AuthError::KeySetUnavailable(msg) => write!(f, "Signing key set unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}
