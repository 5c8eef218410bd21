// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP verbs accepted in execute-api resource ARNs.

use std::str::FromStr;

use super::PolicyError;

/// HTTP verb of an API Gateway method, or `*` for every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Head,
    Delete,
    Options,
    All,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Head => "HEAD",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::All => "*",
        }
    }
}

impl FromStr for HttpVerb {
    type Err = PolicyError;

    /// Parse a verb. Matching is exact: `get` is not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpVerb::Get),
            "POST" => Ok(HttpVerb::Post),
            "PUT" => Ok(HttpVerb::Put),
            "PATCH" => Ok(HttpVerb::Patch),
            "HEAD" => Ok(HttpVerb::Head),
            "DELETE" => Ok(HttpVerb::Delete),
            "OPTIONS" => Ok(HttpVerb::Options),
            "*" => Ok(HttpVerb::All),
            other => Err(PolicyError::InvalidVerb(other.to_string())),
        }
    }
}

impl AsRef<str> for HttpVerb {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
