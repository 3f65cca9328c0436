//! Configuration item repository operations.
//!
//! The repository facade combines the id validator, metadata lookup and the
//! property reconciler:
//!
//! - reads filter the raw payload down to the properties declared by the CI's type
//! - writes validate the id, filter the properties by declared kind and choose
//!   between create (POST) and update (PUT) from an existence probe
//!
//! # Example Usage
//!
//! ```rust
//! use xld_client::{ClientConfig, XldClient};
//! use xld_client::metadata::{PropertyDescriptor, PropertyKind, TypeSchema};
//! use xld_client::properties::{Properties, PropertyValue};
//! use xld_client::transport::InMemoryTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = InMemoryTransport::new();
//! transport
//!     .register_type(TypeSchema {
//!         type_name: "udm.Dictionary".to_string(),
//!         properties: vec![PropertyDescriptor {
//!             name: "entries".to_string(),
//!             kind: PropertyKind::MapStringString,
//!             ..PropertyDescriptor::default()
//!         }],
//!         ..TypeSchema::default()
//!     })
//!     .await;
//! let client = XldClient::with_transport(transport, ClientConfig::default());
//!
//! let mut properties = Properties::new();
//! properties.insert(
//!     "entries".to_string(),
//!     PropertyValue::from(serde_json::json!({"db.host": "localhost"})),
//! );
//! let ci = client
//!     .repository()
//!     .create_ci("Environments/dev-dict", "udm.Dictionary", &properties)
//!     .await?;
//! assert!(ci.token.is_some());
//! # Ok(())
//! # }
//! ```

pub mod ci;
pub mod id;

pub use ci::{Ci, CiListEntry};
pub use id::{CiId, ROOT_NAMESPACES, validate_id};

use crate::client::{SchemaPolicy, UnknownExistencePolicy, XldClient};
use crate::error::{XldError, XldResult};
use crate::existence::Existence;
use crate::metadata::PropertyKinds;
use crate::properties::{Properties, reconcile_for_read, reconcile_for_write};
use crate::transport::{ApiRequest, Method, Transport};
use ci::ExistsResponse;
use log::{debug, info, trace, warn};
use serde_json::{Map, Value};

/// Facade over the repository service.
#[derive(Debug)]
pub struct RepositoryService<'a, T: Transport> {
    client: &'a XldClient<T>,
}

impl<'a, T: Transport> RepositoryService<'a, T> {
    pub(crate) fn new(client: &'a XldClient<T>) -> Self {
        Self { client }
    }

    fn root(&self) -> &str {
        &self.client.config().paths.repository
    }

    /// Fetch a CI, keeping only the properties its type declares.
    ///
    /// # Errors
    ///
    /// - [`XldError::NotFound`] when the CI does not exist
    /// - any transport failure while fetching the CI
    /// - metadata failures, unless the client uses [`SchemaPolicy::Permissive`]
    pub async fn get_ci(&self, id: &str) -> XldResult<Ci> {
        debug!("Getting CI '{}'", id);

        let request = ApiRequest::get(format!("{}/ci/{}", self.root(), id))?;
        let mut ci: Ci = self.client.send(request).await?;

        let kinds = self.property_kinds(&ci.ci_type).await?;
        ci.properties = reconcile_for_read(&kinds, &ci.properties);

        trace!("CI '{}' has {} declared properties", id, ci.properties.len());
        Ok(ci)
    }

    /// Ask the server whether `id` exists.
    ///
    /// Invalid ids fail before any request is made. Transport failures are
    /// returned as errors rather than read as "absent".
    pub async fn ci_exists(&self, id: &str) -> XldResult<bool> {
        self.ci_existence(id).await?.into_result()
    }

    /// Probe whether `id` exists, reporting probe failures as [`Existence::Unknown`].
    ///
    /// # Errors
    ///
    /// Only [`XldError::InvalidIdentifier`]; every other failure is folded into
    /// the returned [`Existence`].
    pub async fn ci_existence(&self, id: &str) -> XldResult<Existence> {
        validate_id(id)?;

        let probe = async {
            let request = ApiRequest::get(format!("{}/exists/{}", self.root(), id))?;
            let answer: ExistsResponse = self.client.send(request).await?;
            Ok::<bool, XldError>(answer.exists)
        };

        Ok(match probe.await {
            Ok(exists) => Existence::from(exists),
            Err(error) => {
                debug!("Existence probe for '{}' failed: {}", id, error);
                Existence::Unknown(error)
            }
        })
    }

    /// Create or update a CI.
    ///
    /// Properties that the type does not declare, or whose value does not fit the
    /// declared kind, are dropped. The CI is updated with PUT when it exists and
    /// created with POST otherwise; a failed existence probe is resolved by the
    /// client's [`UnknownExistencePolicy`].
    pub async fn create_ci(&self, id: &str, ci_type: &str, properties: &Properties) -> XldResult<Ci> {
        let id = CiId::new(id)?;
        let kinds = self.property_kinds(ci_type).await?;
        let accepted = reconcile_for_write(&kinds, properties);

        let method = match self.ci_existence(id.as_str()).await? {
            Existence::Present => Method::Put,
            Existence::Absent => Method::Post,
            Existence::Unknown(error) => match self.client.config().unknown_existence_policy {
                UnknownExistencePolicy::AssumeAbsent => {
                    warn!(
                        "Could not determine whether '{}' exists ({}), attempting create",
                        id, error
                    );
                    Method::Post
                }
                UnknownExistencePolicy::Fail => {
                    return Err(XldError::existence_unknown(id.into_string(), error));
                }
            },
        };

        info!(
            "{} CI '{}' of type '{}' with {} of {} properties",
            if method == Method::Put { "Updating" } else { "Creating" },
            id,
            ci_type,
            accepted.len(),
            properties.len()
        );

        let mut body: Map<String, Value> = accepted
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        body.insert("id".to_string(), Value::String(id.to_string()));
        body.insert("type".to_string(), Value::String(ci_type.to_string()));

        let request = ApiRequest::new(method, format!("{}/ci/{}", self.root(), id))?
            .with_body(&body)?;
        let mut stored: Ci = self.client.send(request).await?;
        stored.properties = reconcile_for_read(&kinds, &stored.properties);

        Ok(stored)
    }

    /// Build a validated, reconciled CI without sending it.
    pub async fn new_ci(&self, id: &str, ci_type: &str, properties: &Properties) -> XldResult<Ci> {
        let id = CiId::new(id)?;
        let kinds = self.property_kinds(ci_type).await?;
        Ok(Ci::new(
            id.into_string(),
            ci_type,
            reconcile_for_write(&kinds, properties),
        ))
    }

    /// Store `ci` with [`create_ci`](Self::create_ci) semantics.
    pub async fn save_ci(&self, ci: &Ci) -> XldResult<Ci> {
        self.create_ci(&ci.id, &ci.ci_type, &ci.properties).await
    }

    /// List the CIs below `ancestor`, in the order the server returns them.
    pub async fn list_cis(&self, ancestor: &str) -> XldResult<Vec<CiListEntry>> {
        debug!("Listing CIs below '{}'", ancestor);

        let request = ApiRequest::get(format!("{}/query", self.root()))?
            .with_query("ancestor", format!("/{}", ancestor));
        self.client.send(request).await
    }

    /// Property kinds for `ci_type`, honouring the client's [`SchemaPolicy`].
    async fn property_kinds(&self, ci_type: &str) -> XldResult<PropertyKinds> {
        match self.client.metadata().get_property_kinds(ci_type).await {
            Ok(kinds) => Ok(kinds),
            Err(error) => match self.client.config().schema_policy {
                SchemaPolicy::Strict => Err(error),
                SchemaPolicy::Permissive => {
                    warn!(
                        "Metadata for type '{}' unavailable ({}), all properties will be dropped",
                        ci_type, error
                    );
                    Ok(PropertyKinds::new())
                }
            },
        }
    }
}
