//! Configuration item representation.

use crate::properties::Properties;
use serde::{Deserialize, Serialize};

/// A configuration item as stored in the repository.
///
/// The `$`-prefixed system fields are assigned by the server and are only present
/// on items that already exist. On the wire, properties sit next to `id` and
/// `type` at the top level of the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ci {
    pub id: String,
    #[serde(rename = "type")]
    pub ci_type: String,
    #[serde(rename = "$token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "$createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "$lastModifiedBy", default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(rename = "$lastModifiedAt", default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
    #[serde(flatten)]
    pub properties: Properties,
}

impl Ci {
    /// A CI that has not been stored yet.
    pub fn new(id: impl Into<String>, ci_type: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            ci_type: ci_type.into(),
            token: None,
            created_by: None,
            created_at: None,
            last_modified_by: None,
            last_modified_at: None,
            properties,
        }
    }

    /// Parent path of the id, i.e. everything before the last `/`.
    pub fn path(&self) -> Option<&str> {
        self.id.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Name of the CI, i.e. the last segment of the id.
    pub fn name(&self) -> &str {
        self.id.rsplit_once('/').map_or(self.id.as_str(), |(_, name)| name)
    }
}

/// One row of a repository query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiListEntry {
    #[serde(rename = "ref")]
    pub id: String,
    #[serde(rename = "type")]
    pub ci_type: String,
}

/// Answer of the existence endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct ExistsResponse {
    #[serde(rename = "boolean")]
    pub exists: bool,
}
