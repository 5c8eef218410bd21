// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorizer Invocation Event
//!
//! The subset of the API Gateway custom authorizer event this crate reads.
//!
//! ## Event Types
//!
//! - `TOKEN`: the credential is in `authorizationToken`
//! - `REQUEST`: the credential is in the `Authorization` header
//!
//! Both carry `methodArn`:
//! `arn:aws:execute-api:{region}:{accountId}:{apiId}/{stage}/{verb}/{path...}`

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::AuthorizerError;
use crate::policy::ApiScope;

/// Header carrying the credential in `REQUEST` events.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Token,
    Request,
}

impl RequestType {
    pub fn parse(s: &str) -> Result<Self, AuthorizerError> {
        match s {
            "TOKEN" => Ok(RequestType::Token),
            "REQUEST" => Ok(RequestType::Request),
            other => Err(AuthorizerError::UnsupportedRequestType(other.to_string())),
        }
    }
}

/// API Gateway custom authorizer event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// `TOKEN` or `REQUEST`; anything else is rejected
    #[serde(rename = "type")]
    pub request_type: String,

    /// Credential of a `TOKEN` event
    #[serde(default)]
    pub authorization_token: Option<String>,

    /// Request headers of a `REQUEST` event
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// ARN of the method being invoked
    pub method_arn: String,
}

impl AuthorizerRequest {
    /// A `TOKEN` event.
    pub fn token(authorization_token: impl Into<String>, method_arn: impl Into<String>) -> Self {
        Self {
            request_type: "TOKEN".to_string(),
            authorization_token: Some(authorization_token.into()),
            headers: None,
            method_arn: method_arn.into(),
        }
    }

    /// The raw credential, prefix included.
    ///
    /// `Ok(None)` means the event type is supported but carries no credential.
    /// Header names are matched case-insensitively.
    pub fn credential(&self) -> Result<Option<&str>, AuthorizerError> {
        match RequestType::parse(&self.request_type)? {
            RequestType::Token => Ok(self.authorization_token.as_deref()),
            RequestType::Request => Ok(self.headers.as_ref().and_then(|headers| {
                headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
                    .map(|(_, value)| value.as_str())
            })),
        }
    }
}

/// A parsed `methodArn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArn {
    pub scope: ApiScope,
    pub verb: String,
    pub resource: String,
}

impl MethodArn {
    pub fn parse(arn: &str) -> Result<Self, AuthorizerError> {
        let invalid = || AuthorizerError::InvalidMethodArn(arn.to_string());

        let parts: Vec<&str> = arn.splitn(6, ':').collect();
        let [prefix, _partition, service, region, account_id, resource] = parts[..] else {
            return Err(invalid());
        };
        if prefix != "arn" || service != "execute-api" {
            return Err(invalid());
        }

        let mut segments = resource.splitn(4, '/');
        let rest_api_id = segments.next().unwrap_or_default();
        let stage = segments.next().unwrap_or_default();
        if rest_api_id.is_empty() || stage.is_empty() || region.is_empty() || account_id.is_empty()
        {
            return Err(invalid());
        }

        Ok(Self {
            scope: ApiScope::new(region, account_id, rest_api_id, stage),
            verb: segments.next().unwrap_or_default().to_string(),
            resource: segments.next().unwrap_or_default().to_string(),
        })
    }
}
