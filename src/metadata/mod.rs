//! Type metadata lookup.
//!
//! Every call goes to the server; nothing is cached, so a type redefined on the
//! server is picked up by the next reconciliation.
//!
//! # Key Types
//!
//! - [`MetadataService`] - fetches [`TypeSchema`] definitions
//! - [`TypeSchema`] / [`PropertyDescriptor`] - the type definition and its properties
//! - [`PropertyKind`] - declared kind of a property

pub mod types;

pub use types::{ControlTask, PropertyDescriptor, PropertyKind, PropertyKinds, TypeSchema};

use crate::client::XldClient;
use crate::error::XldResult;
use crate::transport::{ApiRequest, Transport};
use log::debug;

/// Read-through access to the metadata service.
#[derive(Debug)]
pub struct MetadataService<'a, T: Transport> {
    client: &'a XldClient<T>,
}

impl<'a, T: Transport> MetadataService<'a, T> {
    pub(crate) fn new(client: &'a XldClient<T>) -> Self {
        Self { client }
    }

    /// Fetch the full definition of `type_name`.
    ///
    /// # Errors
    ///
    /// [`XldError::NotFound`](crate::XldError::NotFound) for unknown types, or any
    /// transport failure.
    pub async fn get_schema(&self, type_name: &str) -> XldResult<TypeSchema> {
        let path = format!("{}/type/{}", self.client.config().paths.metadata, type_name);
        debug!("Fetching type metadata for '{}'", type_name);
        self.client.send(ApiRequest::get(path)?).await
    }

    /// Fetch `type_name` and project its properties to a name to kind mapping.
    pub async fn get_property_kinds(&self, type_name: &str) -> XldResult<PropertyKinds> {
        let schema = self.get_schema(type_name).await?;
        Ok(schema.property_kinds())
    }
}
