// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Policy Construction
//!
//! Renders an authorization decision as an execute-api IAM policy.
//!
//! - [`PolicyBuilder`] - per-request accumulator of allow/deny methods
//! - [`ApiScope`] - region, account, API id and stage the ARNs are scoped to
//! - [`ProfileTable`] - group name → declarative [`Profile`]
//! - [`document`] - the response wire types

pub mod builder;
pub mod document;
pub mod error;
pub mod profile;
pub mod scope;
pub mod verb;

pub use builder::PolicyBuilder;
pub use document::{AuthorizerResponse, Conditions, ContextValue, Effect, Statement};
pub use error::PolicyError;
pub use profile::{MethodGrant, Profile, ProfileTable};
pub use scope::ApiScope;
pub use verb::HttpVerb;
