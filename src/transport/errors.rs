//! Transport-level error types.
//!
//! These describe failures to build, deliver or decode a single request and carry
//! no knowledge of repository or security semantics.

use super::Method;

/// Errors raised while executing a request against the remote server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success HTTP status.
    #[error("{method} {path} returned HTTP {status}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("{method} {path} failed: {source}")]
    Network {
        method: Method,
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The response body was not the JSON shape the caller asked for.
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Wrap a delivery failure.
    pub fn network<E>(method: Method, path: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            method,
            path: path.into(),
            source: Box::new(error),
        }
    }

    /// Wrap a decoding failure.
    pub fn decode(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Path of the request that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Status { path, .. } | Self::Network { path, .. } | Self::Decode { path, .. } => {
                path
            }
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised while constructing a request.
#[derive(Debug, thiserror::Error)]
pub enum RequestBuildError {
    /// The request path is unusable.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body for {path}: {source}")]
    Body {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
