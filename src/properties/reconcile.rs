//! Reconciliation of CI properties against type metadata.
//!
//! Writing and reading apply different rules:
//!
//! - [`reconcile_for_write`] keeps an entry only when its name is declared and its
//!   runtime category matches the declared kind
//! - [`reconcile_for_read`] keeps every declared entry verbatim, whatever its value
//!
//! Neither direction ever fails. Entries that do not fit are dropped, which lets
//! callers pass a superset of properties for a type.

use super::value::{Properties, ValueCategory};
use crate::metadata::PropertyKinds;
use log::{debug, warn};

/// Filter caller-supplied properties down to what the server will accept.
pub fn reconcile_for_write(kinds: &PropertyKinds, input: &Properties) -> Properties {
    let mut accepted = Properties::new();

    for (name, value) in input {
        let category = value.category();

        if category == ValueCategory::Other {
            warn!(
                "Dropping property '{}': unexpected value type {}",
                name,
                value.to_json()
            );
            continue;
        }

        match kinds.get(name) {
            Some(kind) if category.accepts(*kind) => {
                accepted.insert(name.clone(), value.clone());
            }
            Some(kind) => {
                debug!(
                    "Dropping property '{}': {} value does not fit declared kind {}",
                    name, category, kind
                );
            }
            None => {
                debug!("Dropping property '{}': not declared by the type", name);
            }
        }
    }

    accepted
}

/// Keep the payload entries whose names are declared by the type.
pub fn reconcile_for_read(kinds: &PropertyKinds, payload: &Properties) -> Properties {
    payload
        .iter()
        .filter(|(name, _)| kinds.contains_key(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
