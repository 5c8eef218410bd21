// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Group-to-profile mapping.
//!
//! ## Profiles
//!
//! | Group             | Profile         | Access |
//! |-------------------|-----------------|--------|
//! | `admins`          | `administrator` | every method of the stage |
//! | `readers`         | `reader`        | search, list and get; artifact and model-version downloads |
//! | `model-approvers` | `approver`      | reader access plus registered-model and model-version writes |
//!
//! The table is consulted in the order above, so a caller in several groups
//! gets the first match. A caller in none of them gets no profile.

use super::document::{Conditions, Effect};
use super::{HttpVerb, PolicyBuilder, PolicyError};

/// Path prefix of the MLflow UI's REST calls.
pub const MLFLOW_API_PREFIX: &str = "/ajax-api/2.0/mlflow";

/// One allow or deny to be added to a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodGrant {
    pub effect: Effect,
    pub verb: HttpVerb,
    pub path: String,
    pub conditions: Option<Conditions>,
}

impl MethodGrant {
    pub fn allow(verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            effect: Effect::Allow,
            verb,
            path: path.into(),
            conditions: None,
        }
    }

    pub fn deny(verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            effect: Effect::Deny,
            verb,
            path: path.into(),
            conditions: None,
        }
    }

    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    fn apply(&self, builder: &mut PolicyBuilder) -> Result<(), PolicyError> {
        match (self.effect, &self.conditions) {
            (Effect::Allow, None) => builder.allow_method(self.verb, &self.path)?,
            (Effect::Deny, None) => builder.deny_method(self.verb, &self.path)?,
            (Effect::Allow, Some(c)) => {
                builder.allow_method_with_conditions(self.verb, &self.path, c.clone())?
            }
            (Effect::Deny, Some(c)) => {
                builder.deny_method_with_conditions(self.verb, &self.path, c.clone())?
            }
        };
        Ok(())
    }
}

/// A named, fixed bundle of method grants.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    grants: Vec<MethodGrant>,
}

impl Profile {
    pub fn new(name: impl Into<String>, grants: Vec<MethodGrant>) -> Self {
        Self {
            name: name.into(),
            grants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grants(&self) -> &[MethodGrant] {
        &self.grants
    }

    /// Every method of the stage.
    pub fn administrator() -> Self {
        Self::new("administrator", vec![MethodGrant::allow(HttpVerb::All, "*")])
    }

    /// Read-only browsing of experiments, runs, artifacts and model versions.
    pub fn reader() -> Self {
        Self::new(
            "reader",
            vec![
                MethodGrant::allow(HttpVerb::Post, format!("{MLFLOW_API_PREFIX}/runs/search")),
                MethodGrant::allow(
                    HttpVerb::Post,
                    format!("{MLFLOW_API_PREFIX}/experiments/search"),
                ),
                MethodGrant::allow(HttpVerb::Get, format!("{MLFLOW_API_PREFIX}/*")),
                MethodGrant::allow(HttpVerb::Get, "/get-artifact"),
                MethodGrant::allow(HttpVerb::Get, "/model-versions/*"),
            ],
        )
    }

    /// Reader access plus registering models and transitioning model versions.
    pub fn approver() -> Self {
        Self::new(
            "approver",
            vec![
                MethodGrant::allow(HttpVerb::Post, format!("{MLFLOW_API_PREFIX}/runs/search")),
                MethodGrant::allow(
                    HttpVerb::Post,
                    format!("{MLFLOW_API_PREFIX}/experiments/search"),
                ),
                MethodGrant::allow(
                    HttpVerb::Post,
                    format!("{MLFLOW_API_PREFIX}/registered-models/*"),
                ),
                MethodGrant::allow(
                    HttpVerb::All,
                    format!("{MLFLOW_API_PREFIX}/model-versions/*"),
                ),
                MethodGrant::allow(HttpVerb::Get, format!("{MLFLOW_API_PREFIX}/*")),
                MethodGrant::allow(HttpVerb::Get, "/get-artifact"),
                MethodGrant::allow(HttpVerb::Get, "/model-versions/*"),
            ],
        )
    }

    /// Add every grant to `builder`, in order.
    pub fn apply(&self, builder: &mut PolicyBuilder) -> Result<(), PolicyError> {
        self.grants.iter().try_for_each(|grant| grant.apply(builder))
    }
}

/// Ordered group-name → profile lookup.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    entries: Vec<(String, Profile)>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The MLflow gateway's groups, in precedence order.
    pub fn mlflow() -> Self {
        Self::new()
            .with_group("admins", Profile::administrator())
            .with_group("readers", Profile::reader())
            .with_group("model-approvers", Profile::approver())
    }

    /// Append a group with lower precedence than every existing entry.
    pub fn with_group(mut self, group: impl Into<String>, profile: Profile) -> Self {
        self.entries.push((group.into(), profile));
        self
    }

    /// The highest-precedence profile for any of `groups`.
    pub fn select<S: AsRef<str>>(&self, groups: &[S]) -> Option<&Profile> {
        self.entries
            .iter()
            .find(|(group, _)| groups.iter().any(|g| g.as_ref() == group))
            .map(|(_, profile)| profile)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
