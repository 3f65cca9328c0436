//! CiId value object for configuration item identifiers.
//!
//! An id is accepted when it mentions one of the repository roots anywhere in the
//! string. This is a substring test, not a prefix test: `Foo/Environments/Bar`
//! is valid.

use crate::error::{XldError, XldResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Repository roots a CI id must refer to.
pub const ROOT_NAMESPACES: [&str; 3] = ["Environments", "Infrastructure", "Applications"];

/// Check that `id` mentions one of the [`ROOT_NAMESPACES`].
///
/// # Errors
///
/// [`XldError::InvalidIdentifier`] carrying the offending id.
pub fn validate_id(id: &str) -> XldResult<()> {
    if ROOT_NAMESPACES.iter().any(|root| id.contains(root)) {
        Ok(())
    } else {
        Err(XldError::invalid_identifier(id))
    }
}

/// A validated configuration item identifier.
///
/// ```rust
/// use xld_client::repository::CiId;
///
/// let id = CiId::new("Environments/dev/dictionary").unwrap();
/// assert_eq!(id.as_str(), "Environments/dev/dictionary");
/// assert!(CiId::new("Configuration/mail").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CiId(String);

impl CiId {
    /// Create a CiId, rejecting ids outside the repository roots.
    pub fn new(value: impl Into<String>) -> XldResult<Self> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Everything before the last `/`, if there is one.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// The last path segment.
    pub fn name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for CiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CiId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CiId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CiId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<String> for CiId {
    type Error = XldError;

    fn try_from(value: String) -> XldResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CiId {
    type Error = XldError;

    fn try_from(value: &str) -> XldResult<Self> {
        Self::new(value)
    }
}
