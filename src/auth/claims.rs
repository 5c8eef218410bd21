// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified token claims.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Claims decoded from a Cognito ID token.
///
/// Only ever constructed by the verifier after the signature, expiry and
/// audience checks have passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (Cognito user pool `sub`)
    pub sub: String,

    /// Cognito username; used as the policy principal
    #[serde(rename = "cognito:username", default)]
    pub username: Option<String>,

    /// Expiration timestamp
    pub exp: i64,

    /// Audience (the app client id)
    pub aud: String,

    /// Group memberships in the order the issuer listed them
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
}

impl TokenClaims {
    /// The identifier used as the policy principal.
    ///
    /// Falls back to `sub` for tokens that carry no `cognito:username`.
    pub fn principal_id(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.sub)
    }

    /// Whether the caller is a member of `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Token expiry as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
