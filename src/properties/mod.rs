//! CI property values and their reconciliation against type metadata.
//!
//! # Key Types
//!
//! - [`PropertyValue`] - closed set of value variants plus an explicit unsupported case
//! - [`Properties`] - name to value mapping carried by a CI
//! - [`reconcile_for_write`] / [`reconcile_for_read`] - schema filters for each direction
//!
//! # Examples
//!
//! ```rust
//! use xld_client::metadata::{PropertyKind, PropertyKinds};
//! use xld_client::properties::{Properties, PropertyValue, reconcile_for_write};
//!
//! let mut kinds = PropertyKinds::new();
//! kinds.insert("port".to_string(), PropertyKind::Integer);
//!
//! let mut input = Properties::new();
//! input.insert("port".to_string(), PropertyValue::from(22));
//! input.insert("port-label".to_string(), PropertyValue::from("ssh"));
//!
//! let accepted = reconcile_for_write(&kinds, &input);
//! assert_eq!(accepted.len(), 1);
//! ```

pub mod reconcile;
pub mod value;

pub use reconcile::{reconcile_for_read, reconcile_for_write};
pub use value::{Properties, PropertyValue, ValueCategory};
