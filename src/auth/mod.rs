// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Token Verification
//!
//! Verifies Cognito user pool ID tokens presented to the API Gateway
//! authorizer.
//!
//! ## Flow
//!
//! 1. The invocation carries `Authorization: Bearer <Cognito ID token>`
//!    (the `Bearer ` prefix is optional)
//! 2. The authorizer:
//!    - Loads the user pool JWKS once per process
//!    - Verifies JWT signature, expiry and audience
//!    - Extracts:
//!      - `cognito:username` → policy principal
//!      - `cognito:groups` → profile selection
//!
//! ## Security
//!
//! - Claims are only read after the signature verifies
//! - The JWKS is fetched once and never refreshed while the process is warm
//! - No clock skew tolerance on `exp`
//! - Rejection detail is logged, never returned to the caller

pub mod claims;
pub mod error;
pub mod jwks;
pub mod verifier;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use jwks::{KeyCache, SigningKeySet};
pub use verifier::{strip_bearer_prefix, TokenVerifier};
