// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

/// Policy construction errors.
///
/// These indicate a misconfigured profile, not a hostile caller, and are
/// surfaced as internal failures rather than denials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Invalid HTTP verb {0}. Allowed verbs: GET, POST, PUT, PATCH, HEAD, DELETE, OPTIONS, *")]
    InvalidVerb(String),

    #[error("Invalid resource path: {0}. Path should match ^[/.a-zA-Z0-9-*]+$")]
    InvalidResourcePath(String),

    #[error("No statements defined for the policy")]
    EmptyPolicy,
}
