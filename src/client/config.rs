//! Client configuration.
//!
//! A [`ClientConfig`] carries the server URL and credentials, the REST roots of
//! each service, and the policies applied when a metadata or existence lookup
//! fails.

use crate::error::{XldError, XldResult};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default XL Deploy context root.
pub const DEFAULT_CONTEXT_ROOT: &str = "deployit";

/// REST roots of the services used by the client, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePaths {
    pub metadata: String,
    pub repository: String,
    pub security: String,
}

impl ServicePaths {
    /// Derive all service roots from a context root such as `deployit`.
    pub fn with_context_root(context_root: &str) -> Self {
        let root = context_root.trim_matches('/');
        let join = |service: &str| {
            if root.is_empty() {
                service.to_string()
            } else {
                format!("{}/{}", root, service)
            }
        };
        Self {
            metadata: join("metadata"),
            repository: join("repository"),
            security: join("security"),
        }
    }
}

impl Default for ServicePaths {
    fn default() -> Self {
        Self::with_context_root(DEFAULT_CONTEXT_ROOT)
    }
}

/// What to do when the type metadata needed for reconciliation cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Propagate the metadata error to the caller.
    #[default]
    Strict,
    /// Continue with an empty schema, which drops every property.
    Permissive,
}

/// What `create_ci` does when the existence probe itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownExistencePolicy {
    /// Treat the CI as absent and attempt a create.
    #[default]
    AssumeAbsent,
    /// Abort with [`XldError::ExistenceUnknown`].
    Fail,
}

/// Configuration for an [`XldClient`](crate::XldClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:4516`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub paths: ServicePaths,
    pub schema_policy: SchemaPolicy,
    pub unknown_existence_policy: UnknownExistencePolicy,
    /// Per-request timeout applied by the HTTP transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4516".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            paths: ServicePaths::default(),
            schema_policy: SchemaPolicy::default(),
            unknown_existence_policy: UnknownExistencePolicy::default(),
            timeout: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("paths", &self.paths)
            .field("schema_policy", &self.schema_policy)
            .field("unknown_existence_policy", &self.unknown_existence_policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration from `XLD_URL`, `XLD_USERNAME`, `XLD_PASSWORD` and
    /// `XLD_CONTEXT_ROOT`, falling back to the defaults for unset variables.
    pub fn from_env() -> XldResult<Self> {
        let mut config = Self::default();
        if let Ok(url) = env::var("XLD_URL") {
            config.base_url = url;
        }
        if let Ok(username) = env::var("XLD_USERNAME") {
            config.username = username;
        }
        if let Ok(password) = env::var("XLD_PASSWORD") {
            config.password = password;
        }
        if let Ok(context_root) = env::var("XLD_CONTEXT_ROOT") {
            config.paths = ServicePaths::with_context_root(&context_root);
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> XldResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(XldError::configuration("base URL cannot be empty"));
        }

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            XldError::configuration(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(XldError::configuration(format!(
                "unsupported URL scheme '{}' in '{}'",
                other, self.base_url
            ))),
        }
    }
}
