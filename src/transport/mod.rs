//! Transport abstraction for talking to the XL Deploy REST API.
//!
//! The transport layer delivers one [`ApiRequest`] and hands back the decoded JSON
//! body. It owns authentication, the base URL and the mapping of HTTP failures to
//! [`TransportError`]; everything about repositories, metadata and users lives in
//! the service layer above it.
//!
//! # Implementations
//!
//! - [`HttpTransport`] - `reqwest` client with basic authentication
//! - [`InMemoryTransport`] - in-process emulation of the server for tests and
//!   offline development
//!
//! # Example Usage
//!
//! ```rust
//! use xld_client::transport::{ApiRequest, InMemoryTransport, Method, Transport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = InMemoryTransport::new();
//! let request = ApiRequest::new(Method::Get, "deployit/repository/exists/Environments/dev")?;
//! let answer = transport.execute(request).await?;
//! assert_eq!(answer["boolean"], false);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod http;
pub mod in_memory;

pub use errors::{RequestBuildError, TransportError};
pub use http::HttpTransport;
pub use in_memory::{Fault, InMemoryTransport};

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, relative to the server base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    /// Build a request for `path` (no leading slash, no query string).
    pub fn new(method: Method, path: impl Into<String>) -> Result<Self, RequestBuildError> {
        let path = path.into();
        Self::validate_path(&path)?;
        Ok(Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        })
    }

    /// Shorthand for a GET request.
    pub fn get(path: impl Into<String>) -> Result<Self, RequestBuildError> {
        Self::new(Method::Get, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestBuildError> {
        let value = serde_json::to_value(body).map_err(|source| RequestBuildError::Body {
            path: self.path.clone(),
            source,
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn validate_path(path: &str) -> Result<(), RequestBuildError> {
        let reason = if path.trim().is_empty() {
            Some("path is empty")
        } else if path.starts_with('/') {
            Some("path must be relative to the base URL")
        } else if path.contains(['?', '#']) {
            Some("query parameters must be added with with_query")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(RequestBuildError::InvalidPath {
                path: path.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Core trait for delivering requests to the remote server.
///
/// Implementations execute exactly one request per call: no retries, caching or
/// request rewriting. A JSON response body is returned as-is; an empty body is
/// returned as [`Value::Null`].
pub trait Transport: Send + Sync {
    /// Execute `request` and return the JSON response body.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Status`] for any non-2xx answer
    /// - [`TransportError::Network`] when no answer was received
    /// - [`TransportError::Decode`] when the body is not valid JSON
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}
