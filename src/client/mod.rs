//! The XL Deploy client and its configuration.
//!
//! [`XldClient`] owns a [`Transport`] and a [`ClientConfig`] and hands out the
//! service facades. The facades borrow the client and hold no state of their
//! own, so one client can serve any number of concurrent callers.

pub mod builder;
pub mod config;

pub use builder::XldClientBuilder;
pub use config::{ClientConfig, SchemaPolicy, ServicePaths, UnknownExistencePolicy};

use crate::error::XldResult;
use crate::metadata::MetadataService;
use crate::repository::RepositoryService;
use crate::security::SecurityService;
use crate::transport::{ApiRequest, HttpTransport, Transport, TransportError};
use serde::de::DeserializeOwned;

/// Entry point for all API operations.
#[derive(Debug, Clone)]
pub struct XldClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl XldClient<HttpTransport> {
    /// Create a client talking HTTP to the server described by `config`.
    pub fn new(config: ClientConfig) -> XldResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport, config })
    }

    /// Start building a client.
    pub fn builder() -> XldClientBuilder {
        XldClientBuilder::new()
    }
}

impl<T: Transport> XldClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Type metadata operations.
    pub fn metadata(&self) -> MetadataService<'_, T> {
        MetadataService::new(self)
    }

    /// Configuration item repository operations.
    pub fn repository(&self) -> RepositoryService<'_, T> {
        RepositoryService::new(self)
    }

    /// User and password operations.
    pub fn security(&self) -> SecurityService<'_, T> {
        SecurityService::new(self)
    }

    /// Execute `request` and decode the response body into `R`.
    pub(crate) async fn send<R: DeserializeOwned>(&self, request: ApiRequest) -> XldResult<R> {
        let path = request.path().to_string();
        let body = self.transport.execute(request).await?;
        serde_json::from_value(body).map_err(|source| TransportError::decode(path, source).into())
    }
}
