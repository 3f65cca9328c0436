//! # CI Property Reconciler
//!
//! A command-line utility that shows which properties of a CI would be sent to
//! the server, given the type definition returned by the metadata service.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin ci-reconciler udm.Dictionary.json properties.json
//! ```
//!
//! The first file is the JSON answer of `deployit/metadata/type/{type}`. The
//! second file is a JSON object of property names to values, e.g.
//!
//! ```json
//! {"entries": {"db.host": "localhost"}, "restrictToContainers": "nope", "color": "red"}
//! ```
//!
//! ## Output Example
//!
//! ```text
//! Type: udm.Dictionary (7 declared properties)
//!
//! Accepted:
//! {
//!   "entries": {
//!     "db.host": "localhost"
//!   }
//! }
//!
//! Dropped:
//!   - color (string, not declared)
//!   - restrictToContainers (string, declared as SET_OF_CI)
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Reconciliation succeeded
//! - `1`: An input file could not be read or parsed

use std::env;
use std::fs;
use std::path::Path;
use std::process;
use xld_client::metadata::{PropertyKinds, TypeSchema};
use xld_client::properties::{Properties, reconcile_for_write};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <type-metadata.json> <properties.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} udm.Dictionary.json properties.json", args[0]);
        process::exit(1);
    }

    let schema = match load_json::<TypeSchema>(Path::new(&args[1])) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("❌ Failed to load type metadata: {}", e);
            process::exit(1);
        }
    };

    let input = match load_json::<Properties>(Path::new(&args[2])) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("❌ Failed to load properties: {}", e);
            process::exit(1);
        }
    };

    let kinds = schema.property_kinds();
    let accepted = reconcile_for_write(&kinds, &input);

    println!(
        "Type: {} ({} declared properties)",
        schema.type_name,
        kinds.len()
    );
    println!();
    println!("Accepted:");
    match serde_json::to_string_pretty(&accepted) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("❌ Failed to render accepted properties: {}", e);
            process::exit(1);
        }
    }

    print_dropped(&kinds, &input, &accepted);
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_dropped(kinds: &PropertyKinds, input: &Properties, accepted: &Properties) {
    let dropped: Vec<String> = input
        .iter()
        .filter(|(name, _)| !accepted.contains_key(*name))
        .map(|(name, value)| match kinds.get(name) {
            Some(kind) => format!("{} ({}, declared as {})", name, value.category(), kind),
            None => format!("{} ({}, not declared)", name, value.category()),
        })
        .collect();

    if dropped.is_empty() {
        return;
    }

    println!();
    println!("Dropped:");
    for line in dropped {
        println!("  - {}", line);
    }
}
