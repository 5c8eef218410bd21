// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::auth::AuthError;
use crate::policy::PolicyError;

/// Error returned to the hosting layer for one invocation.
///
/// `Unauthorized` is deliberately opaque; API Gateway maps it to a 401. Every
/// other variant is an authorizer failure and maps to a 500.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizerError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unsupported request type: {0}")]
    UnsupportedRequestType(String),

    #[error("Invalid method ARN: {0}")]
    InvalidMethodArn(String),

    #[error("Signing key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("Policy construction failed: {0}")]
    Policy(#[from] PolicyError),
}

impl AuthorizerError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthorizerError::Unauthorized => "unauthorized",
            AuthorizerError::UnsupportedRequestType(_) => "unsupported_request_type",
            AuthorizerError::InvalidMethodArn(_) => "invalid_method_arn",
            AuthorizerError::KeySetUnavailable(_) => "key_set_unavailable",
            AuthorizerError::Policy(PolicyError::InvalidVerb(_)) => "invalid_verb",
            AuthorizerError::Policy(PolicyError::InvalidResourcePath(_)) => "invalid_resource_path",
            AuthorizerError::Policy(PolicyError::EmptyPolicy) => "empty_policy",
        }
    }

    /// Whether the caller was denied, as opposed to the authorizer failing.
    pub fn is_denial(&self) -> bool {
        matches!(self, AuthorizerError::Unauthorized)
    }
}

/// Why a caller was denied. Logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// The token failed verification
    Token(AuthError),
    /// The token is valid but none of its groups maps to a profile
    UnrecognizedGroup,
}

impl Denial {
    pub fn code(&self) -> &'static str {
        match self {
            Denial::Token(e) => e.error_code(),
            Denial::UnrecognizedGroup => "unrecognized_group",
        }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::Token(e) => write!(f, "{e}"),
            Denial::UnrecognizedGroup => write!(f, "Unknown user group"),
        }
    }
}
