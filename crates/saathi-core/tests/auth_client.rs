//! Integration tests for the identity client against a mock server.

use saathi_core::auth::{AccountType, AuthClient, AuthErrorKind, Profile};
use saathi_core::config::IdentityConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> IdentityConfig {
    IdentityConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        session_poll_secs: 60,
    }
}

fn citizen_profile() -> Profile {
    Profile {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        account_type: AccountType::Citizen,
        organization: None,
        phone: None,
    }
}

#[tokio::test]
async fn create_account_returns_identity_and_notifies_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "email": "asha@example.in",
            "displayName": "Asha Verma",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-1",
            "email": "asha@example.in",
            "idToken": "token-1",
            "displayName": "Asha Verma",
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let rx = client.subscribe_session_changes();
    assert!(rx.borrow().is_none(), "no session before signup");

    let identity = client
        .create_account("asha@example.in", "secret123", &citizen_profile())
        .await
        .expect("signup");

    assert_eq!(identity.uid, "uid-1");
    assert_eq!(rx.borrow().as_ref(), Some(&identity));
}

#[tokio::test]
async fn wrong_password_maps_to_wrong_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "INVALID_PASSWORD" }
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let err = client
        .verify_credentials("asha@example.in", "nope")
        .await
        .expect_err("should fail");

    assert_eq!(err.kind, AuthErrorKind::WrongSecret);
    assert_eq!(err.user_message(), "Incorrect password. Please try again.");
}

#[tokio::test]
async fn sign_out_success_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-1",
            "email": "asha@example.in",
            "idToken": "token-1",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signOut"))
        .and(body_partial_json(json!({ "idToken": "token-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let rx = client.subscribe_session_changes();
    client
        .verify_credentials("asha@example.in", "secret123")
        .await
        .expect("sign in");
    assert!(rx.borrow().is_some());

    client.sign_out().await.expect("sign out");
    assert!(rx.borrow().is_none());
}

#[tokio::test]
async fn sign_out_failure_leaves_session_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-1",
            "email": "asha@example.in",
            "idToken": "token-1",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signOut"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let rx = client.subscribe_session_changes();
    client
        .verify_credentials("asha@example.in", "secret123")
        .await
        .expect("sign in");

    let err = client.sign_out().await.expect_err("should fail");
    assert_eq!(err.kind, AuthErrorKind::Unknown);
    assert!(rx.borrow().is_some(), "session kept on sign-out failure");
}

#[tokio::test]
async fn secret_reset_unknown_email_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .and(body_partial_json(json!({ "requestType": "PASSWORD_RESET" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "EMAIL_NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let err = client
        .request_secret_reset("ghost@example.in")
        .await
        .expect_err("should fail");
    assert_eq!(err.kind, AuthErrorKind::NotFound);
}

#[tokio::test]
async fn revalidation_clears_session_for_stale_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "uid-1",
            "email": "asha@example.in",
            "idToken": "token-1",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:lookup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "INVALID_ID_TOKEN" }
        })))
        .mount(&server)
        .await;

    let client = AuthClient::new(&test_config(&server)).expect("client");
    let rx = client.subscribe_session_changes();
    client
        .verify_credentials("asha@example.in", "secret123")
        .await
        .expect("sign in");
    assert!(rx.borrow().is_some());

    client.revalidate_session().await;
    assert!(rx.borrow().is_none(), "stale token clears the session");
}
