// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request policy builder.
//!
//! Methods are validated and rendered to resource ARNs as they are added.
//! [`PolicyBuilder::build`] groups them into statements in a fixed order:
//!
//! 1. one combined `Allow` for every unconditioned allow
//! 2. one `Allow` per conditioned allow, in insertion order
//! 3. one combined `Deny` for every unconditioned deny
//! 4. one `Deny` per conditioned deny, in insertion order
//!
//! Empty groups are omitted. Duplicate methods are kept as added.

use std::collections::BTreeMap;

use super::document::{
    AuthorizerResponse, Conditions, ContextValue, Effect, PolicyDocument, Statement,
    POLICY_VERSION,
};
use super::{ApiScope, HttpVerb, PolicyError};

/// A method accepted into the builder.
#[derive(Debug, Clone)]
struct Method {
    resource_arn: String,
    conditions: Option<Conditions>,
}

/// Accumulates allow/deny methods for one principal and renders the policy.
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    principal_id: String,
    scope: ApiScope,
    allow_methods: Vec<Method>,
    deny_methods: Vec<Method>,
    context: BTreeMap<String, ContextValue>,
}

impl PolicyBuilder {
    pub fn new(principal_id: impl Into<String>, scope: ApiScope) -> Self {
        Self {
            principal_id: principal_id.into(),
            scope,
            allow_methods: Vec::new(),
            deny_methods: Vec::new(),
            context: BTreeMap::new(),
        }
    }

    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    pub fn scope(&self) -> &ApiScope {
        &self.scope
    }

    /// Allow every verb on every resource of the stage.
    pub fn allow_all_methods(&mut self) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Allow, HttpVerb::All, "*", None)
    }

    /// Deny every verb on every resource of the stage.
    pub fn deny_all_methods(&mut self) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Deny, HttpVerb::All, "*", None)
    }

    pub fn allow_method(
        &mut self,
        verb: impl AsRef<str>,
        resource: &str,
    ) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Allow, verb, resource, None)
    }

    pub fn deny_method(
        &mut self,
        verb: impl AsRef<str>,
        resource: &str,
    ) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Deny, verb, resource, None)
    }

    /// Allow a method under an IAM condition block. The method gets its own
    /// statement.
    pub fn allow_method_with_conditions(
        &mut self,
        verb: impl AsRef<str>,
        resource: &str,
        conditions: Conditions,
    ) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Allow, verb, resource, Some(conditions))
    }

    /// Deny a method under an IAM condition block. The method gets its own
    /// statement.
    pub fn deny_method_with_conditions(
        &mut self,
        verb: impl AsRef<str>,
        resource: &str,
        conditions: Conditions,
    ) -> Result<&mut Self, PolicyError> {
        self.add_method(Effect::Deny, verb, resource, Some(conditions))
    }

    /// Attach a key/value to the response `context`.
    pub fn with_context(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> &mut Self {
        self.context.insert(key.into(), value.into());
        self
    }

    fn add_method(
        &mut self,
        effect: Effect,
        verb: impl AsRef<str>,
        resource: &str,
        conditions: Option<Conditions>,
    ) -> Result<&mut Self, PolicyError> {
        let verb: HttpVerb = verb.as_ref().parse()?;

        if !is_valid_resource_path(resource) {
            return Err(PolicyError::InvalidResourcePath(resource.to_string()));
        }
        let resource = resource.strip_prefix('/').unwrap_or(resource);

        let method = Method {
            resource_arn: self.scope.method_arn(verb, resource),
            // An empty condition block constrains nothing.
            conditions: conditions.filter(|c| !c.is_empty()),
        };

        match effect {
            Effect::Allow => self.allow_methods.push(method),
            Effect::Deny => self.deny_methods.push(method),
        }
        Ok(self)
    }

    /// Render the decision. Fails with [`PolicyError::EmptyPolicy`] if no
    /// method was added.
    pub fn build(self) -> Result<AuthorizerResponse, PolicyError> {
        if self.allow_methods.is_empty() && self.deny_methods.is_empty() {
            return Err(PolicyError::EmptyPolicy);
        }

        let mut statement = statements_for(Effect::Allow, &self.allow_methods);
        statement.extend(statements_for(Effect::Deny, &self.deny_methods));

        Ok(AuthorizerResponse {
            principal_id: self.principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement,
            },
            context: self.context,
        })
    }
}

/// Path characters allowed by API Gateway resource ARNs in a policy.
fn is_valid_resource_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '-' | '*'))
}

fn statements_for(effect: Effect, methods: &[Method]) -> Vec<Statement> {
    let mut combined = Statement::empty(effect);
    let mut conditional = Vec::new();

    for method in methods {
        match &method.conditions {
            None => combined.resource.push(method.resource_arn.clone()),
            Some(conditions) => {
                let mut statement = Statement::empty(effect);
                statement.resource.push(method.resource_arn.clone());
                statement.condition = Some(conditions.clone());
                conditional.push(statement);
            }
        }
    }

    let mut statements = Vec::with_capacity(conditional.len() + 1);
    if !combined.resource.is_empty() {
        statements.push(combined);
    }
    statements.extend(conditional);
    statements
}
