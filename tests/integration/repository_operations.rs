//! Repository facade tests against the emulated server.

use crate::common::{TestServer, fixtures};
use serde_json::{Value, json};
use xld_client::properties::{Properties, PropertyValue, reconcile_for_write};
use xld_client::transport::{ApiRequest, Fault, Method, Transport, TransportError};
use xld_client::{
    ClientConfig, Existence, SchemaPolicy, ServicePaths, UnknownExistencePolicy, XldClient, XldError,
};

fn dictionary_input() -> Properties {
    let mut input = Properties::new();
    input.insert(
        "entries".to_string(),
        PropertyValue::from(json!({"db.host": "localhost", "db.port": "5432"})),
    );
    input.insert(
        "restrictToContainers".to_string(),
        PropertyValue::from(vec!["Infrastructure/testHost"]),
    );
    // declared as a map, given a string
    input.insert("encryptedEntries".to_string(), PropertyValue::from("oops"));
    input.insert("color".to_string(), PropertyValue::from("red"));
    input.insert("ratio".to_string(), PropertyValue::from(json!(0.5)));
    input
}

#[tokio::test]
async fn test_get_ci_keeps_declared_properties_only() {
    let server = TestServer::with_dictionary_type().await;
    server.transport.insert_ci(fixtures::dictionary_ci()).await;

    let ci = server
        .client
        .repository()
        .get_ci(fixtures::DICTIONARY_ID)
        .await
        .unwrap();

    assert_eq!(ci.id, fixtures::DICTIONARY_ID);
    assert_eq!(ci.ci_type, "udm.Dictionary");
    assert_eq!(ci.token.as_deref(), Some(fixtures::DICTIONARY_TOKEN));
    assert_eq!(ci.created_at.as_deref(), Some("2016-09-27T09:42:58.212+0200"));
    assert_eq!(ci.last_modified_by.as_deref(), Some("admin"));

    let names: Vec<&str> = ci.properties.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "encryptedEntries",
            "entries",
            "restrictToApplications",
            "restrictToContainers"
        ]
    );
    assert_eq!(
        ci.properties["restrictToApplications"].to_json(),
        json!(["Applications/testApp", "Applications/testApp2"])
    );
    assert_eq!(
        ci.properties["entries"].as_string_map().map(|m| m["bank"].as_str()),
        Some("rabo")
    );
}

#[tokio::test]
async fn test_get_missing_ci_is_not_found() {
    let server = TestServer::with_dictionary_type().await;

    let error = server
        .client
        .repository()
        .get_ci("Environments/missing")
        .await
        .unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_get_ci_schema_policy() {
    let server = TestServer::new();
    server.transport.insert_ci(fixtures::dictionary_ci()).await;

    let error = server
        .client
        .repository()
        .get_ci(fixtures::DICTIONARY_ID)
        .await
        .unwrap_err();
    assert!(error.is_not_found());

    let config = ClientConfig {
        schema_policy: SchemaPolicy::Permissive,
        ..ClientConfig::default()
    };
    let permissive = XldClient::with_transport(server.transport.clone(), config);
    let ci = permissive
        .repository()
        .get_ci(fixtures::DICTIONARY_ID)
        .await
        .unwrap();
    assert_eq!(ci.token.as_deref(), Some(fixtures::DICTIONARY_TOKEN));
    assert!(ci.properties.is_empty());
}

#[tokio::test]
async fn test_ci_exists() {
    let server = TestServer::new();
    server.transport.insert_ci(fixtures::dictionary_ci()).await;
    let repository = server.client.repository();

    assert!(repository.ci_exists(fixtures::DICTIONARY_ID).await.unwrap());
    assert!(!repository.ci_exists("Environments/missing").await.unwrap());
}

#[tokio::test]
async fn test_ci_exists_rejects_invalid_id_without_request() {
    let server = TestServer::new();

    let error = server.client.repository().ci_exists("Foobar").await.unwrap_err();

    assert!(matches!(error, XldError::InvalidIdentifier { ref id } if id == "Foobar"));
    assert!(server.transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_ci_exists_surfaces_transport_failure() {
    let server = TestServer::new();
    server
        .transport
        .inject_fault(
            Method::Get,
            "deployit/repository/exists/Environments/dict",
            Fault::Status(500),
        )
        .await;
    let repository = server.client.repository();

    let error = repository.ci_exists("Environments/dict").await.unwrap_err();
    assert!(matches!(error, XldError::Transport(_)));

    let existence = repository.ci_existence("Environments/dict").await.unwrap();
    assert!(existence.is_unknown());
}

#[tokio::test]
async fn test_create_ci_posts_reconciled_properties() {
    let server = TestServer::with_dictionary_type().await;

    let created = server
        .client
        .repository()
        .create_ci("Environments/dict", "udm.Dictionary", &dictionary_input())
        .await
        .unwrap();

    let posts: Vec<_> = server
        .transport
        .requests()
        .await
        .into_iter()
        .filter(|r| r.method() == Method::Post)
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path(), "deployit/repository/ci/Environments/dict");
    assert_eq!(
        posts[0].body(),
        Some(&json!({
            "id": "Environments/dict",
            "type": "udm.Dictionary",
            "entries": {"db.host": "localhost", "db.port": "5432"},
            "restrictToContainers": ["Infrastructure/testHost"]
        }))
    );

    assert_eq!(created.id, "Environments/dict");
    assert!(created.token.is_some());
    assert_eq!(created.created_by.as_deref(), Some("admin"));
    assert_eq!(created.properties.len(), 2);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let server = TestServer::with_dictionary_type().await;
    let repository = server.client.repository();

    let created = repository
        .create_ci("Environments/dict", "udm.Dictionary", &dictionary_input())
        .await
        .unwrap();
    let fetched = repository.get_ci("Environments/dict").await.unwrap();

    assert_eq!(fetched, created);

    let kinds = fixtures::dictionary_schema().property_kinds();
    assert_eq!(
        fetched.properties,
        reconcile_for_write(&kinds, &dictionary_input())
    );
}

#[tokio::test]
async fn test_create_existing_ci_updates_with_put() {
    let server = TestServer::with_dictionary_type().await;
    server.transport.insert_ci(fixtures::dictionary_ci()).await;

    let mut input = Properties::new();
    input.insert(
        "entries".to_string(),
        PropertyValue::from(json!({"bank": "ing"})),
    );
    let updated = server
        .client
        .repository()
        .create_ci(fixtures::DICTIONARY_ID, "udm.Dictionary", &input)
        .await
        .unwrap();

    assert_eq!(server.count_requests(Method::Post, "deployit/repository").await, 0);
    assert_eq!(server.count_requests(Method::Put, "deployit/repository/ci/").await, 1);
    assert_ne!(updated.token.as_deref(), Some(fixtures::DICTIONARY_TOKEN));
    assert_eq!(updated.created_at.as_deref(), Some("2016-09-27T09:42:58.212+0200"));
    assert_eq!(updated.properties["entries"].to_json(), json!({"bank": "ing"}));
    assert!(!updated.properties.contains_key("restrictToContainers"));
}

#[tokio::test]
async fn test_create_ci_invalid_id_sends_nothing() {
    let server = TestServer::with_dictionary_type().await;

    let error = server
        .client
        .repository()
        .create_ci("Configuration/smtp", "udm.Dictionary", &Properties::new())
        .await
        .unwrap_err();

    assert!(matches!(error, XldError::InvalidIdentifier { .. }));
    assert!(server.transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_create_ci_unknown_type_sends_no_write() {
    let server = TestServer::new();

    let error = server
        .client
        .repository()
        .create_ci("Environments/dict", "udm.Missing", &dictionary_input())
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(server.count_requests(Method::Post, "deployit/repository").await, 0);
    assert_eq!(server.count_requests(Method::Put, "deployit/repository").await, 0);
}

#[tokio::test]
async fn test_unknown_existence_assumes_absent_by_default() {
    let server = TestServer::with_dictionary_type().await;
    server
        .transport
        .inject_fault(
            Method::Get,
            "deployit/repository/exists/Environments/dict",
            Fault::Unreachable,
        )
        .await;

    let created = server
        .client
        .repository()
        .create_ci("Environments/dict", "udm.Dictionary", &dictionary_input())
        .await
        .unwrap();

    assert!(created.token.is_some());
    assert_eq!(server.count_requests(Method::Post, "deployit/repository/ci/").await, 1);
}

#[tokio::test]
async fn test_unknown_existence_fails_when_configured() {
    let config = ClientConfig {
        unknown_existence_policy: UnknownExistencePolicy::Fail,
        ..ClientConfig::default()
    };
    let server = TestServer::with_config(config);
    server
        .transport
        .register_type(fixtures::dictionary_schema())
        .await;
    server
        .transport
        .inject_fault(
            Method::Get,
            "deployit/repository/exists/Environments/dict",
            Fault::Status(502),
        )
        .await;

    let error = server
        .client
        .repository()
        .create_ci("Environments/dict", "udm.Dictionary", &dictionary_input())
        .await
        .unwrap_err();

    match error {
        XldError::ExistenceUnknown { resource, source } => {
            assert_eq!(resource, "Environments/dict");
            assert!(matches!(*source, XldError::Transport(_)));
        }
        other => panic!("expected ExistenceUnknown, got {:?}", other),
    }
    assert_eq!(server.count_requests(Method::Post, "deployit/repository").await, 0);
}

#[tokio::test]
async fn test_new_ci_and_save_ci() {
    let server = TestServer::with_dictionary_type().await;
    let repository = server.client.repository();

    let draft = repository
        .new_ci("Environments/dict", "udm.Dictionary", &dictionary_input())
        .await
        .unwrap();
    assert_eq!(draft.token, None);
    assert_eq!(draft.name(), "dict");
    assert_eq!(draft.properties.len(), 2);
    assert!(server.count_requests(Method::Post, "deployit").await == 0);

    let saved = repository.save_ci(&draft).await.unwrap();
    assert_eq!(saved.properties, draft.properties);
    assert!(matches!(
        repository.ci_existence("Environments/dict").await.unwrap(),
        Existence::Present
    ));
}

#[tokio::test]
async fn test_list_cis_preserves_server_order() {
    let server = TestServer::new();
    for (id, ci_type) in fixtures::environment_listing() {
        server
            .transport
            .insert_ci(json!({"id": id, "type": ci_type}))
            .await;
    }
    server
        .transport
        .insert_ci(json!({"id": "Infrastructure/host", "type": "overthere.SshHost"}))
        .await;

    let entries = server
        .client
        .repository()
        .list_cis("Environments")
        .await
        .unwrap();

    let listed: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.id.as_str(), e.ci_type.as_str()))
        .collect();
    assert_eq!(listed, fixtures::environment_listing());

    let requests = server.transport.requests().await;
    assert_eq!(requests[0].path(), "deployit/repository/query");
    assert_eq!(requests[0].query_param("ancestor"), Some("/Environments"));
}

/// Transport answering every request with the same JSON body.
#[derive(Debug)]
struct CannedTransport {
    answer: Value,
}

impl Transport for CannedTransport {
    async fn execute(&self, _request: ApiRequest) -> Result<Value, TransportError> {
        Ok(self.answer.clone())
    }
}

#[tokio::test]
async fn test_list_cis_neither_sorts_nor_deduplicates() {
    let transport = CannedTransport {
        answer: json!([
            {"ref": "Environments/z", "type": "udm.Dictionary"},
            {"ref": "Environments/a", "type": "udm.Environment"},
            {"ref": "Environments/z", "type": "udm.Dictionary"}
        ]),
    };
    let client = XldClient::with_transport(transport, ClientConfig::default());

    let entries = client.repository().list_cis("Environments").await.unwrap();

    let listed: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.id.as_str(), e.ci_type.as_str()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Environments/z", "udm.Dictionary"),
            ("Environments/a", "udm.Environment"),
            ("Environments/z", "udm.Dictionary"),
        ]
    );
}

#[tokio::test]
async fn test_custom_context_root() {
    let config = ClientConfig {
        paths: ServicePaths::with_context_root("xl"),
        ..ClientConfig::default()
    };
    let server = TestServer::with_config(config);
    server
        .transport
        .insert_ci(json!({"id": "Environments/dict", "type": "udm.Dictionary"}))
        .await;

    assert!(
        server
            .client
            .repository()
            .ci_exists("Environments/dict")
            .await
            .unwrap()
    );
    assert_eq!(
        server.transport.requests().await[0].path(),
        "xl/repository/exists/Environments/dict"
    );
}
