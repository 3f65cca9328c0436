//! Type metadata as published by the server's metadata service.
//!
//! A [`TypeSchema`] describes a CI type: its place in the type hierarchy and the
//! ordered list of property descriptors. Only the `name` and `kind` of each
//! property take part in reconciliation; the rest is carried for callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Property name to declared kind, as used by the reconciler.
pub type PropertyKinds = HashMap<String, PropertyKind>;

/// A CI type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeSchema {
    /// Dotted type name, e.g. `udm.Dictionary`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Virtual types cannot be instantiated
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub icon: Option<String>,
    /// Repository root this type lives under
    pub root: Option<String>,
    pub description: Option<String>,
    /// Property descriptors in declaration order
    pub properties: Vec<PropertyDescriptor>,
    pub interfaces: Vec<String>,
    pub super_types: Vec<String>,
    pub deployable_type: Option<String>,
    pub container_type: Option<String>,
    #[serde(rename = "control-tasks")]
    pub control_tasks: Vec<ControlTask>,
}

impl TypeSchema {
    /// Project the property descriptors into a name to kind mapping.
    ///
    /// Duplicate names resolve to the last declaration.
    pub fn property_kinds(&self) -> PropertyKinds {
        self.properties
            .iter()
            .map(|p| (p.name.clone(), p.kind))
            .collect()
    }

    /// Look up a property descriptor by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().rev().find(|p| p.name == name)
    }
}

/// Definition of a single CI property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Fully qualified name, `<type>.<name>`
    pub fqn: Option<String>,
    pub label: Option<String>,
    pub kind: PropertyKind,
    pub description: Option<String>,
    pub category: Option<String>,
    pub as_containment: bool,
    pub inspection: bool,
    pub required: bool,
    pub required_inspection: bool,
    pub password: bool,
    pub transient: bool,
    pub size: Option<String>,
    /// Target type for CI references
    pub referenced_type: Option<String>,
    pub default: Option<Value>,
}

impl Default for PropertyDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            fqn: None,
            label: None,
            kind: PropertyKind::String,
            description: None,
            category: None,
            as_containment: false,
            inspection: false,
            required: false,
            required_inspection: false,
            password: false,
            transient: false,
            size: None,
            referenced_type: None,
            default: None,
        }
    }
}

/// Control task exposed by a CI type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ControlTask {
    pub name: String,
    pub fqn: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
}

/// Declared server-side property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    Boolean,
    Integer,
    String,
    Enum,
    Date,
    Ci,
    SetOfString,
    SetOfCi,
    ListOfString,
    ListOfCi,
    MapStringString,
    /// Any kind this client does not know about
    #[serde(other)]
    Unknown,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Boolean => "BOOLEAN",
            PropertyKind::Integer => "INTEGER",
            PropertyKind::String => "STRING",
            PropertyKind::Enum => "ENUM",
            PropertyKind::Date => "DATE",
            PropertyKind::Ci => "CI",
            PropertyKind::SetOfString => "SET_OF_STRING",
            PropertyKind::SetOfCi => "SET_OF_CI",
            PropertyKind::ListOfString => "LIST_OF_STRING",
            PropertyKind::ListOfCi => "LIST_OF_CI",
            PropertyKind::MapStringString => "MAP_STRING_STRING",
            PropertyKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
