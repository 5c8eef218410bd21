// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local runner for the authorizer.
//!
//! Reads one authorizer event as JSON from the file named by the first
//! argument (or stdin), prints the decision, and exits non-zero on denial
//! or failure:
//!
//! ```text
//! APP_CLIENT_ID=... COGNITO_KEYS_URL=https://... REGION=eu-west-1 \
//!     gateway-authorizer event.json
//! ```

use std::process::ExitCode;

use gateway_authorizer::config::AuthorizerConfig;
use gateway_authorizer::request::AuthorizerRequest;
use gateway_authorizer::telemetry::init_tracing;
use gateway_authorizer::Authorizer;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

const EXIT_DENIED: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_UNREADY: u8 = 3;
const EXIT_FAILED: u8 = 4;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AuthorizerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let authorizer = match Authorizer::from_config(&config) {
        Ok(authorizer) => authorizer,
        Err(e) => {
            error!(error = %e, "Failed to build authorizer");
            return ExitCode::from(EXIT_UNREADY);
        }
    };

    // Cold start: load the signing keys before taking any request.
    match authorizer.verifier().keys().initialize().await {
        Ok(keys) => info!(keys, region = %config.region, "Authorizer ready"),
        Err(e) => {
            error!(error = %e, "Authorizer unready");
            return ExitCode::from(EXIT_UNREADY);
        }
    }

    let request = match read_event(std::env::args().nth(1)).await {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to read authorizer event");
            return ExitCode::from(EXIT_FAILED);
        }
    };

    match authorizer.authorize(&request).await {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize decision");
                ExitCode::from(EXIT_FAILED)
            }
        },
        Err(e) => {
            eprintln!("{e}");
            if e.is_denial() {
                ExitCode::from(EXIT_DENIED)
            } else {
                error!(code = e.error_code(), "Authorizer failed");
                ExitCode::from(EXIT_FAILED)
            }
        }
    }
}

async fn read_event(
    path: Option<String>,
) -> Result<AuthorizerRequest, Box<dyn std::error::Error + Send + Sync>> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };
    Ok(serde_json::from_str(&raw)?)
}
