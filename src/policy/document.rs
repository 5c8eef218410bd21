// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorizer Response Document
//!
//! Wire types returned to API Gateway. Field casing follows the custom
//! authorizer contract:
//!
//! ```json
//! {
//!   "principalId": "jane.doe",
//!   "policyDocument": {
//!     "Version": "2012-10-17",
//!     "Statement": [
//!       { "Action": "execute-api:Invoke", "Effect": "Allow", "Resource": ["arn:..."] }
//!     ]
//!   },
//!   "context": { "username": "jane.doe" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// IAM policy language version. Always `2012-10-17`.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The only action an authorizer policy grants or denies.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// IAM condition block, e.g. `{"IpAddress": {"aws:SourceIp": ["203.0.113.0/24"]}}`.
pub type Conditions = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One statement of the policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Conditions>,
}

impl Statement {
    /// An invoke statement with no resources yet.
    pub fn empty(effect: Effect) -> Self {
        Self {
            action: INVOKE_ACTION.to_string(),
            effect,
            resource: Vec::new(),
            condition: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

/// Scalar value exposed to the integration as `$context.authorizer.<key>`.
///
/// API Gateway rejects arrays and objects here, so they are not representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value.into())
    }
}

/// The authorization decision for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, ContextValue>,
}

impl AuthorizerResponse {
    /// Statements with the given effect, in document order.
    pub fn statements(&self, effect: Effect) -> impl Iterator<Item = &Statement> {
        self.policy_document
            .statement
            .iter()
            .filter(move |s| s.effect == effect)
    }
}
