//! Integration tests for the Supabase client
//!
//! Verifies the wire contract against a mocked backend: headers, bodies,
//! error-message extraction, and the set-session refresh fallback.

use mockito::Matcher;
use serde_json::json;

use supabase_auth_gateway::error::GatewayError;
use supabase_auth_gateway::supabase::{ProfileInsert, SignUpMetadata, SupabaseClient};

const TEST_API_KEY: &str = "test-service-key";

#[tokio::test]
async fn test_sign_up_sends_api_key_and_metadata() {
    let mut backend = mockito::Server::new_async().await;

    let signup_mock = backend
        .mock("POST", "/auth/v1/signup")
        .match_header("apikey", TEST_API_KEY)
        .match_body(Matcher::Json(json!({
            "email": "ada@example.com",
            "password": "secret",
            "data": { "first_name": "Ada", "last_name": "Lovelace" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "user": { "id": "uuid-1" } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();
    let metadata = SignUpMetadata {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
    };

    let auth = client
        .sign_up("ada@example.com", "secret", metadata)
        .await
        .unwrap();

    assert_eq!(auth["user"]["id"], "uuid-1");
    signup_mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_up_omits_absent_metadata_fields() {
    let mut backend = mockito::Server::new_async().await;

    let signup_mock = backend
        .mock("POST", "/auth/v1/signup")
        .match_body(Matcher::Json(json!({
            "email": "ada@example.com",
            "password": "secret",
            "data": {}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "user": { "id": "uuid-1" } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    client
        .sign_up("ada@example.com", "secret", SignUpMetadata::default())
        .await
        .unwrap();

    signup_mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_error_yields_backend_message() {
    let mut backend = mockito::Server::new_async().await;

    let _token_mock = backend
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded(
            "grant_type".to_string(),
            "password".to_string(),
        ))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    let err = client
        .sign_in_with_password("ada@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        GatewayError::Backend(message) => assert_eq!(message, "Invalid login credentials"),
        other => panic!("expected Backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_insert_profile_sets_postgrest_headers() {
    let mut backend = mockito::Server::new_async().await;

    let insert_mock = backend
        .mock("POST", "/rest/v1/users")
        .match_header("apikey", TEST_API_KEY)
        .match_header("prefer", "return=representation")
        .match_header("accept", "application/vnd.pgrst.object+json")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .match_body(Matcher::Json(json!({
            "user_id": "uuid-1",
            "email": "ada@example.com",
            "role": "Patient"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "user_id": "uuid-1", "email": "ada@example.com", "role": "Patient" })
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    // Optional fields left out entirely, matching the exact-body matcher
    let row = ProfileInsert {
        user_id: "uuid-1".to_string(),
        first_name: None,
        last_name: None,
        email: "ada@example.com".to_string(),
        phone_number: None,
        role: "Patient".to_string(),
    };

    let inserted = client.insert_profile(&row).await.unwrap();

    assert_eq!(inserted["user_id"], "uuid-1");
    insert_mock.assert_async().await;
}

#[tokio::test]
async fn test_set_session_accepts_valid_access_token() {
    let mut backend = mockito::Server::new_async().await;

    let _user_mock = backend
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer valid-access")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "uuid-1", "email": "ada@example.com" }).to_string())
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    let session = client
        .set_session("valid-access", "valid-refresh")
        .await
        .unwrap();

    assert_eq!(session["user"]["id"], "uuid-1");
    assert_eq!(session["access_token"], "valid-access");
    assert_eq!(session["refresh_token"], "valid-refresh");
}

#[tokio::test]
async fn test_set_session_falls_back_to_refresh_grant() {
    let mut backend = mockito::Server::new_async().await;

    let _user_mock = backend
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "msg": "JWT expired" }).to_string())
        .create_async()
        .await;

    let refresh_mock = backend
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded(
            "grant_type".to_string(),
            "refresh_token".to_string(),
        ))
        .match_body(Matcher::Json(json!({ "refresh_token": "still-good" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "renewed-access",
                "refresh_token": "renewed-refresh",
                "user": { "id": "uuid-1" }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    let session = client.set_session("expired", "still-good").await.unwrap();

    assert_eq!(session["access_token"], "renewed-access");
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn test_set_session_passes_through_non_auth_errors() {
    let mut backend = mockito::Server::new_async().await;

    let _user_mock = backend
        .mock("GET", "/auth/v1/user")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = SupabaseClient::new(&backend.url(), TEST_API_KEY).unwrap();

    let err = client.set_session("token", "refresh").await.unwrap_err();

    match err {
        GatewayError::Backend(message) => assert_eq!(message, "service unavailable"),
        other => panic!("expected Backend error, got {:?}", other),
    }
}
