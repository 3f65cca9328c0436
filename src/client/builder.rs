//! Builder pattern for configuring client instances.
//!
//! ```rust
//! use xld_client::{SchemaPolicy, XldClient};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = XldClient::builder()
//!     .base_url("https://xld.example.com:4516")
//!     .credentials("deployer", "secret")
//!     .schema_policy(SchemaPolicy::Permissive)
//!     .build()?;
//! assert_eq!(client.config().paths.repository, "deployit/repository");
//! # Ok(())
//! # }
//! ```

use super::config::{ClientConfig, SchemaPolicy, ServicePaths, UnknownExistencePolicy};
use super::XldClient;
use crate::error::XldResult;
use crate::transport::{HttpTransport, Transport};
use std::time::Duration;

/// Fluent builder for [`XldClient`].
#[derive(Debug, Clone, Default)]
pub struct XldClientBuilder {
    config: ClientConfig,
}

impl XldClientBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. [`ClientConfig::from_env`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = username.into();
        self.config.password = password.into();
        self
    }

    /// Derive all service roots from a context root (default `deployit`).
    pub fn context_root(mut self, context_root: &str) -> Self {
        self.config.paths = ServicePaths::with_context_root(context_root);
        self
    }

    pub fn paths(mut self, paths: ServicePaths) -> Self {
        self.config.paths = paths;
        self
    }

    pub fn schema_policy(mut self, policy: SchemaPolicy) -> Self {
        self.config.schema_policy = policy;
        self
    }

    pub fn unknown_existence_policy(mut self, policy: UnknownExistencePolicy) -> Self {
        self.config.unknown_existence_policy = policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate the configuration and create an HTTP client.
    pub fn build(self) -> XldResult<XldClient<HttpTransport>> {
        XldClient::new(self.config)
    }

    /// Validate the configuration and create a client over `transport`.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> XldResult<XldClient<T>> {
        self.config.validate()?;
        Ok(XldClient::with_transport(transport, self.config))
    }
}
