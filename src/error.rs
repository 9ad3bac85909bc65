// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::TxnType;

/// Failure of a write call against the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API base URL '{0}'")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build a status error, preferring the `message` the server put in the
    /// body over the generic reason phrase.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Request failed with status {} {}", status.as_u16(), reason),
            None => format!("Request failed with status {}", status.as_u16()),
        });
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Extract `message` from a JSON error body. Validation errors often carry
/// a list of messages; those are joined with `"; "`.
pub fn server_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    match v.get("message")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    Busy,
    #[error("choose a {0} category")]
    MissingCategory(TxnType),
    #[error("category '{0}' not found")]
    UnknownCategory(String),
    #[error("category '{category}' cannot hold {kind} transactions")]
    CategoryTypeMismatch { category: String, kind: TxnType },
    #[error("invalid amount '{0}', expected a number")]
    InvalidAmount(String),
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("category name is required")]
    MissingName,
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine platform-specific config dir")]
    NoConfigDir,
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {source}", .path.display())]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
