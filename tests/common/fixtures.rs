//! Server payloads shared by the integration tests.

use serde_json::{Value, json};
use xld_client::metadata::TypeSchema;

pub const DICTIONARY_ID: &str = "Environments/testDictionary1";
pub const DICTIONARY_TOKEN: &str = "7f5eeb79-73f9-4312-a4d3-0363402c109d";

/// Metadata service answer for `udm.Dictionary`.
pub fn dictionary_metadata() -> Value {
    json!({
        "type": "udm.Dictionary",
        "virtual": false,
        "icon": "icons/types/udm.Dictionary.svg",
        "root": "Environments",
        "description": "A Dictionary contains key-value pairs that can be replaced",
        "properties": [
            {
                "name": "entries",
                "fqn": "udm.Dictionary.entries",
                "label": "Entries",
                "kind": "MAP_STRING_STRING",
                "description": "The dictionary entries",
                "category": "Common",
                "asContainment": false,
                "inspection": false,
                "required": false,
                "requiredInspection": false,
                "password": false,
                "transient": false,
                "size": "DEFAULT",
                "referencedType": null,
                "default": null
            },
            {
                "name": "encryptedEntries",
                "fqn": "udm.Dictionary.encryptedEntries",
                "label": "Encrypted Entries",
                "kind": "MAP_STRING_STRING",
                "description": "The encrypted dictionary entries",
                "category": "Common",
                "asContainment": false,
                "inspection": false,
                "required": false,
                "requiredInspection": false,
                "password": true,
                "transient": false,
                "size": "DEFAULT",
                "referencedType": null,
                "default": null
            },
            {
                "name": "restrictToContainers",
                "fqn": "udm.Dictionary.restrictToContainers",
                "label": "Restrict to containers",
                "kind": "SET_OF_CI",
                "description": "Only apply this dictionary to the containers mentioned",
                "category": "Restrictions",
                "asContainment": false,
                "inspection": false,
                "required": false,
                "requiredInspection": false,
                "password": false,
                "transient": false,
                "size": "DEFAULT",
                "referencedType": "udm.Container",
                "default": null
            },
            {
                "name": "restrictToApplications",
                "fqn": "udm.Dictionary.restrictToApplications",
                "label": "Restrict to applications",
                "kind": "SET_OF_CI",
                "description": "Only apply this dictionary to the applications mentioned",
                "category": "Restrictions",
                "asContainment": false,
                "inspection": false,
                "required": false,
                "requiredInspection": false,
                "password": false,
                "transient": false,
                "size": "DEFAULT",
                "referencedType": "udm.Application",
                "default": null
            }
        ],
        "interfaces": ["udm.ConfigurationItem"],
        "superTypes": ["xld.BaseDictionary", "udm.BaseConfigurationItem"]
    })
}

pub fn dictionary_schema() -> TypeSchema {
    serde_json::from_value(dictionary_metadata()).expect("dictionary metadata decodes")
}

/// Repository answer for [`DICTIONARY_ID`], including one property the type
/// does not declare.
pub fn dictionary_ci() -> Value {
    json!({
        "id": DICTIONARY_ID,
        "type": "udm.Dictionary",
        "$token": DICTIONARY_TOKEN,
        "$createdBy": "admin",
        "$createdAt": "2016-09-27T09:42:58.212+0200",
        "$lastModifiedBy": "admin",
        "$lastModifiedAt": "2016-09-27T09:42:58.212+0200",
        "entries": {"test": "test", "bank": "rabo"},
        "encryptedEntries": {"test": "test", "bank": "rabo"},
        "restrictToContainers": ["Infrastructure/testHost"],
        "restrictToApplications": ["Applications/testApp", "Applications/testApp2"],
        "legacyFlag": true
    })
}

/// CIs in the order the server lists them below `Environments`.
pub fn environment_listing() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Environments/Wian", "udm.Dictionary"),
        ("Environments/Wian2", "udm.Dictionary"),
        ("Environments/merged_test1_test2", "udm.Dictionary"),
        ("Environments/test1", "udm.Dictionary"),
        ("Environments/test2", "udm.Dictionary"),
        ("Environments/test2env", "udm.Environment"),
    ]
}
