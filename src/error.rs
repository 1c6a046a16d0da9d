//! Error types for the bootstrap workflow.
//!
//! Two kinds of failure reach the user: a configuration value is missing or
//! unreadable ([`ConfigError`]), or a remote call did not complete with the
//! expected status ([`RemoteCallError`]). Both are fatal; nothing is retried.

use reqwest::StatusCode;
use thiserror::Error;

use crate::github::Stage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot get value for key {key}: set --{flag}, ${env} or `{key}` in the config file")]
    Missing {
        key: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Application name must not be blank")]
    BlankAppName,

    #[error("Failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid API base URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No successful status code from {url}: {status}{}", body_suffix(.body))]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{step} failed. Got status code: {status} (expected {expected})")]
    UnexpectedStatus {
        step: &'static str,
        expected: StatusCode,
        status: StatusCode,
    },

    #[error("Failed to encode request for {url}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{step} returned an empty SHA")]
    EmptySha { step: &'static str },
}

/// Response body appended to a status error, so the single error line names
/// what the server complained about.
fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl RemoteCallError {
    /// HTTP status attached to this failure, if the server answered at all.
    #[cfg(test)]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteCallError),

    #[error("{operation} called while repository is {actual:?}; expected {expected:?}")]
    OutOfOrder {
        operation: &'static str,
        expected: Stage,
        actual: Stage,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
