// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Invocation Handling
//!
//! One [`Authorizer`] is built at startup and shared by every invocation. It
//! holds only immutable configuration and the [`KeyCache`]; each invocation
//! gets its own [`PolicyBuilder`].
//!
//! ## Outcomes
//!
//! - A verified token whose groups map to a profile → [`AuthorizerResponse`]
//! - Any verification failure, or no matching profile → opaque
//!   [`AuthorizerError::Unauthorized`]; the reason is logged
//! - Misconfigured profiles, unreadable events, unavailable keys → the other
//!   [`AuthorizerError`] variants

use tracing::{debug, error, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::auth::{strip_bearer_prefix, AuthError, KeyCache, TokenClaims, TokenVerifier};
use crate::config::AuthorizerConfig;
use crate::error::{AuthorizerError, Denial};
use crate::policy::{ApiScope, AuthorizerResponse, PolicyBuilder, PolicyError, ProfileTable};
use crate::request::{AuthorizerRequest, MethodArn};

/// Log the reason and collapse it to `Unauthorized`.
fn deny(reason: Denial) -> AuthorizerError {
    info!(reason = reason.code(), "Request denied: {reason}");
    AuthorizerError::Unauthorized
}

pub struct Authorizer {
    verifier: TokenVerifier,
    profiles: ProfileTable,
    region: Option<String>,
}

impl Authorizer {
    pub fn new(verifier: TokenVerifier, profiles: ProfileTable) -> Self {
        Self {
            verifier,
            profiles,
            region: None,
        }
    }

    /// Build the authorizer for the MLflow gateway groups from startup config.
    pub fn from_config(config: &AuthorizerConfig) -> Result<Self, AuthError> {
        let keys = KeyCache::new(config.keys_url.as_str())?;
        let mut authorizer = Self::new(
            TokenVerifier::new(keys, &config.app_client_id),
            ProfileTable::mlflow(),
        );
        authorizer.region = Some(config.region.clone());
        Ok(authorizer)
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    /// Decide one invocation.
    pub async fn authorize(
        &self,
        request: &AuthorizerRequest,
    ) -> Result<AuthorizerResponse, AuthorizerError> {
        let span = info_span!(
            "authorize",
            request_id = %Uuid::new_v4(),
            request_type = %request.request_type,
            verb = field::Empty,
            resource = field::Empty,
        );
        self.authorize_inner(request).instrument(span).await
    }

    async fn authorize_inner(
        &self,
        request: &AuthorizerRequest,
    ) -> Result<AuthorizerResponse, AuthorizerError> {
        let credential = request
            .credential()?
            .ok_or_else(|| deny(Denial::Token(AuthError::MissingToken)))?;

        let claims = self
            .verifier
            .verify(strip_bearer_prefix(credential))
            .await
            .map_err(|e| match e {
                AuthError::KeySetUnavailable(msg) => {
                    error!(error = %msg, "Cannot verify tokens without a signing key set");
                    AuthorizerError::KeySetUnavailable(msg)
                }
                e => deny(Denial::Token(e)),
            })?;

        let method = MethodArn::parse(&request.method_arn)?;
        Span::current()
            .record("verb", method.verb.as_str())
            .record("resource", method.resource.as_str());
        if let Some(region) = &self.region {
            if *region != method.scope.region {
                warn!(
                    configured = %region,
                    invoked = %method.scope.region,
                    "Method ARN region differs from the deployment region"
                );
            }
        }

        match self.decide(&claims, method.scope) {
            Ok(Some(response)) => {
                let expires_at = claims.expires_at().map(|t| t.to_rfc3339());
                debug!(
                    principal = %response.principal_id,
                    expires_at = expires_at.as_deref().unwrap_or_default(),
                    "Request authorized"
                );
                Ok(response)
            }
            Ok(None) => Err(deny(Denial::UnrecognizedGroup)),
            Err(e) => {
                error!(error = %e, "Profile produced an invalid policy");
                Err(e.into())
            }
        }
    }

    /// Render the policy for verified `claims`.
    ///
    /// Returns `Ok(None)` when no group maps to a profile: the caller gets no
    /// decision at all rather than a default.
    pub fn decide(
        &self,
        claims: &TokenClaims,
        scope: ApiScope,
    ) -> Result<Option<AuthorizerResponse>, PolicyError> {
        let Some(profile) = self.profiles.select(claims.groups.as_slice()) else {
            return Ok(None);
        };
        info!(profile = profile.name(), "Profile selected");

        let mut builder = PolicyBuilder::new(claims.principal_id(), scope);
        profile.apply(&mut builder)?;
        builder
            .with_context("username", claims.principal_id())
            .with_context("profile", profile.name());

        builder.build().map(Some)
    }
}
