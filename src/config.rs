// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once, at startup. A missing
//! or invalid value is a startup failure, never a per-request one.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APP_CLIENT_ID` | Cognito app client id; the expected token audience | Required |
//! | `COGNITO_KEYS_URL` | User pool JWKS endpoint | Required |
//! | `REGION` | Deployment region | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::str::FromStr;

use url::Url;

pub const APP_CLIENT_ID_ENV: &str = "APP_CLIENT_ID";

/// The user pool JWKS endpoint, e.g.
/// `https://cognito-idp.{region}.amazonaws.com/{userPoolId}/.well-known/jwks.json`.
///
/// Must be `https`; plain `http` is accepted for loopback hosts only.
pub const COGNITO_KEYS_URL_ENV: &str = "COGNITO_KEYS_URL";

pub const REGION_ENV: &str = "REGION";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("{0} must use https")]
    InsecureUrl(&'static str),

    #[error("LOG_FORMAT must be `json` or `pretty`, got `{0}`")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Startup configuration of the authorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerConfig {
    pub app_client_id: String,
    pub keys_url: Url,
    pub region: String,
    pub log_format: LogFormat,
}

impl AuthorizerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let app_client_id = required(APP_CLIENT_ID_ENV)?;
        let region = required(REGION_ENV)?;
        let keys_url = parse_keys_url(&required(COGNITO_KEYS_URL_ENV)?)?;
        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(v) if !v.trim().is_empty() => v.trim().parse()?,
            _ => LogFormat::default(),
        };

        Ok(Self {
            app_client_id,
            keys_url,
            region,
            log_format,
        })
    }
}

fn parse_keys_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var: COGNITO_KEYS_URL_ENV,
        reason: e.to_string(),
    })?;

    let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
    match url.scheme() {
        "https" => Ok(url),
        "http" if loopback => Ok(url),
        _ => Err(ConfigError::InsecureUrl(COGNITO_KEYS_URL_ENV)),
    }
}
