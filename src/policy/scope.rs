// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use super::HttpVerb;

/// The REST API stage a policy applies to.
///
/// Fixed for the lifetime of a [`PolicyBuilder`](super::PolicyBuilder).
/// A `*` in any field is an IAM wildcard and only matches within its own
/// ARN segment, never across `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiScope {
    pub region: String,
    pub account_id: String,
    pub rest_api_id: String,
    pub stage: String,
}

impl ApiScope {
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        rest_api_id: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            rest_api_id: rest_api_id.into(),
            stage: stage.into(),
        }
    }

    /// Render the execute-api ARN for `verb` on `resource`.
    ///
    /// `resource` is expected without its leading `/`.
    pub fn method_arn(&self, verb: HttpVerb, resource: &str) -> String {
        format!(
            "arn:aws:execute-api:{}:{}:{}/{}/{}/{}",
            self.region, self.account_id, self.rest_api_id, self.stage, verb, resource
        )
    }
}
