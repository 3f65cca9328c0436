//! Security facade tests against the emulated server.

use crate::common::{TestServer, init_logging};
use xld_client::transport::{Fault, Method};
use xld_client::{User, XldError, XldResult};

#[tokio::test]
async fn test_get_user() {
    let server = TestServer::new();
    server
        .transport
        .insert_user(User::new("deployer", true).with_password("secret"))
        .await;

    let user = server.client.security().get_user("deployer").await.unwrap();

    assert_eq!(user.username, "deployer");
    assert!(user.admin);
    assert_eq!(user.password, None);
}

#[tokio::test]
async fn test_user_exists_is_false_for_missing_and_failing_lookups() {
    init_logging();
    let server = TestServer::new();
    server.transport.insert_user(User::new("viewer", false)).await;
    server
        .transport
        .inject_fault(Method::Get, "deployit/security/user/flaky", Fault::Unreachable)
        .await;
    let security = server.client.security();

    assert!(security.user_exists("viewer").await);
    assert!(!security.user_exists("missing").await);
    assert!(!security.user_exists("flaky").await);

    assert!(security.user_existence("missing").await.is_absent());
    assert!(security.user_existence("flaky").await.is_unknown());
}

#[tokio::test]
async fn test_create_user() {
    let server = TestServer::new();

    let created = server
        .client
        .security()
        .create_user("deployer", false)
        .await
        .unwrap();

    assert_eq!(created, User::new("deployer", false));
    let stored = server.transport.stored_user("deployer").await.unwrap();
    assert!(!stored.admin);
    assert_eq!(stored.password, None);
}

#[tokio::test]
async fn test_create_existing_user_fails() {
    let server = TestServer::new();
    server.transport.insert_user(User::new("deployer", false)).await;

    let error = server
        .client
        .security()
        .create_user("deployer", true)
        .await
        .unwrap_err();

    assert!(matches!(error, XldError::AlreadyExists { .. }));
    assert_eq!(server.count_requests(Method::Post, "deployit/security").await, 0);
}

#[tokio::test]
async fn test_set_password_sends_full_record() {
    let server = TestServer::new();
    server.transport.insert_user(User::new("deployer", true)).await;

    let outcome: XldResult<()> = server
        .client
        .security()
        .set_password_for_user("deployer", "n3w-pass")
        .await;
    assert!(outcome.is_ok());

    let puts: Vec<_> = server
        .transport
        .requests()
        .await
        .into_iter()
        .filter(|r| r.method() == Method::Put)
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].body(),
        Some(&serde_json::json!({"username": "deployer", "admin": true, "password": "n3w-pass"}))
    );

    let stored = server.transport.stored_user("deployer").await.unwrap();
    assert_eq!(stored.password.as_deref(), Some("n3w-pass"));
    assert!(stored.admin);
}

#[tokio::test]
async fn test_set_password_for_missing_user_sends_no_update() {
    let server = TestServer::new();

    let error = server
        .client
        .security()
        .set_password_for_user("ghost", "pw")
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(server.count_requests(Method::Put, "deployit/security").await, 0);
}
