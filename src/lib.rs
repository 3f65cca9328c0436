//! XL Deploy REST API client library for Rust.
//!
//! Provides an async client for the XL Deploy metadata, repository and security
//! services, with property filtering against server-side type definitions.
//!
//! # Core Components
//!
//! - [`XldClient`] - Entry point holding the transport and configuration
//! - [`repository::RepositoryService`] - Read, create, update and list configuration items
//! - [`metadata::MetadataService`] - Type definitions and declared property kinds
//! - [`security::SecurityService`] - User lookup, creation and password changes
//! - [`properties`] - Typed property values and the read/write reconcilers
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xld_client::{ClientConfig, XldClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = XldClient::new(ClientConfig::from_env()?)?;
//!
//! for entry in client.repository().list_cis("Environments").await? {
//!     let ci = client.repository().get_ci(&entry.id).await?;
//!     println!("{} ({}): {} properties", ci.id, ci.ci_type, ci.properties.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod existence;
pub mod metadata;
pub mod properties;
pub mod repository;
pub mod security;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::{
    ClientConfig, SchemaPolicy, ServicePaths, UnknownExistencePolicy, XldClient, XldClientBuilder,
};
pub use error::{XldError, XldResult};
pub use existence::Existence;
pub use metadata::{PropertyKind, PropertyKinds, TypeSchema};
pub use properties::{Properties, PropertyValue, reconcile_for_read, reconcile_for_write};
pub use repository::{Ci, CiId, CiListEntry, validate_id};
pub use security::User;
pub use transport::{HttpTransport, InMemoryTransport, Transport, TransportError};
