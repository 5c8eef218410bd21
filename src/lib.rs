// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway Authorizer - API Gateway custom authorizer for the MLflow proxy
//!
//! This crate verifies Cognito-issued ID tokens and turns the caller's group
//! membership into an execute-api IAM policy scoped to one REST API stage.
//!
//! ## Modules
//!
//! - `auth` - Token verification (JWKS cache, signature, expiry, audience)
//! - `policy` - Policy builder, response document, group profiles
//! - `authorizer` - Per-invocation orchestration
//! - `request` - Authorizer event and method ARN parsing
//! - `config` - Startup configuration from the environment
//! - `telemetry` - Tracing subscriber setup

pub mod auth;
pub mod authorizer;
pub mod config;
pub mod error;
pub mod policy;
pub mod request;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use authorizer::Authorizer;
pub use error::{AuthorizerError, Denial};
