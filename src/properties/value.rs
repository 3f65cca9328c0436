//! Dynamically-typed CI property values.
//!
//! Values arrive either from callers building a CI or from server payloads. Both
//! are classified into a closed set of variants; anything outside that set is kept
//! verbatim as [`PropertyValue::Unsupported`] so that read paths stay lossless.

use crate::metadata::PropertyKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Property name to value mapping carried by a CI.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Bool(bool),
    Integer(i64),
    /// Set or list of strings, including CI references
    StringSet(Vec<String>),
    StringMap(BTreeMap<String, String>),
    /// Any other JSON value (floats, nested objects, mixed arrays, null)
    Unsupported(Value),
}

/// Runtime category of a value, used to pick the accepted declared kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    String,
    Boolean,
    Integer,
    StringSet,
    StringMap,
    Other,
}

impl ValueCategory {
    /// Declared kinds a value of this category may be written to.
    pub fn accepted_kinds(&self) -> &'static [PropertyKind] {
        match self {
            ValueCategory::String => &[PropertyKind::String, PropertyKind::Ci],
            ValueCategory::Boolean => &[PropertyKind::Boolean],
            ValueCategory::Integer => &[PropertyKind::Integer],
            ValueCategory::StringMap => &[PropertyKind::MapStringString],
            ValueCategory::StringSet => &[PropertyKind::SetOfString, PropertyKind::SetOfCi],
            ValueCategory::Other => &[],
        }
    }

    /// Whether a value of this category may be written to a property of `kind`.
    pub fn accepts(&self, kind: PropertyKind) -> bool {
        self.accepted_kinds().contains(&kind)
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueCategory::String => "string",
            ValueCategory::Boolean => "boolean",
            ValueCategory::Integer => "integer",
            ValueCategory::StringSet => "string set",
            ValueCategory::StringMap => "string map",
            ValueCategory::Other => "other",
        };
        f.write_str(name)
    }
}

impl PropertyValue {
    pub fn category(&self) -> ValueCategory {
        match self {
            PropertyValue::String(_) => ValueCategory::String,
            PropertyValue::Bool(_) => ValueCategory::Boolean,
            PropertyValue::Integer(_) => ValueCategory::Integer,
            PropertyValue::StringSet(_) => ValueCategory::StringSet,
            PropertyValue::StringMap(_) => ValueCategory::StringMap,
            PropertyValue::Unsupported(_) => ValueCategory::Other,
        }
    }

    /// Convert back to the JSON representation sent on the wire.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Integer(i) => Value::from(*i),
            PropertyValue::StringSet(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            PropertyValue::StringMap(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect::<Map<String, Value>>(),
            ),
            PropertyValue::Unsupported(value) => value.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_set(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StringSet(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_string_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            PropertyValue::StringMap(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => PropertyValue::String(s),
            Value::Bool(b) => PropertyValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Unsupported(Value::Number(n)),
            },
            Value::Array(items) if items.iter().all(Value::is_string) => {
                PropertyValue::StringSet(items.into_iter().filter_map(into_string).collect())
            }
            Value::Object(entries) if entries.values().all(Value::is_string) => {
                PropertyValue::StringMap(
                    entries
                        .into_iter()
                        .filter_map(|(k, v)| into_string(v).map(|s| (k, s)))
                        .collect(),
                )
            }
            other => PropertyValue::Unsupported(other),
        }
    }
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(i64::from(value))
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::StringSet(value)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(value: Vec<&str>) -> Self {
        PropertyValue::StringSet(value.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for PropertyValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        PropertyValue::StringMap(value)
    }
}

impl From<HashMap<String, String>> for PropertyValue {
    fn from(value: HashMap<String, String>) -> Self {
        PropertyValue::StringMap(value.into_iter().collect())
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PropertyValue::from)
    }
}
