//! Mock service tests for the remote backend.
//!
//! These use wiremock to simulate the remote service and exercise the
//! client without network access or real credentials.

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_core::error::{BackendError, Error};
use vigil_core::traits::{AuthGateway, FeedSource};
use vigil_core::{AccessToken, Credentials, OrgId, PrayerDraft, RefreshToken, ServiceUrl, UserId};
use vigil_remote::{OrgFeed, PersonalFeed, RemoteAuth, RemoteSession, RestClient};

/// Helper to build a client against a mock server.
fn mock_client(server: &MockServer) -> RestClient {
    let service =
        ServiceUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    RestClient::new(service, "anon-key")
}

fn restored_session(server: &MockServer, user: &str) -> RemoteSession {
    RemoteSession::from_persisted(
        mock_client(server),
        UserId::new(user).unwrap(),
        AccessToken::new("access-token"),
        Some(RefreshToken::new("refresh-token")),
    )
}

fn prayer_row(id: &str, content: &str, org: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "content": content,
        "is_anonymous": false,
        "created_at": "2024-05-04T12:00:00Z",
        "organization_id": org,
        "user_id": "u-1",
        "prayer_count": 2,
        "profiles": { "full_name": "Alice", "avatar_url": "" }
    })
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn sign_in_success_resolves_organization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({
            "email": "alice@church.example",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-token",
            "refresh_token": "refresh-token",
            "user": { "id": "u-1" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.u-1"))
        .and(query_param("select", "organization_id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "organization_id": "org-1" }])),
        )
        .mount(&server)
        .await;

    let auth = RemoteAuth::new(mock_client(&server));
    let credentials = Credentials::new("alice@church.example", "secret123");
    let user = auth.sign_in(&credentials).await.unwrap();

    assert_eq!(user.user_id.as_str(), "u-1");
    assert_eq!(user.organization_id, Some(OrgId::new("org-1").unwrap()));
    assert!(auth.session().is_some());
}

#[tokio::test]
async fn sign_in_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let auth = RemoteAuth::new(mock_client(&server));
    let credentials = Credentials::new("alice@church.example", "wrong");
    let result = auth.sign_in(&credentials).await;

    assert!(matches!(
        result,
        Err(Error::Backend(BackendError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn session_refresh_rotates_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "new-access-token",
            "refresh_token": "new-refresh-token"
        })))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    session.refresh().await.unwrap();

    assert_eq!(session.access_token().as_str(), "new-access-token");
    assert_eq!(
        session.refresh_token().unwrap().as_str(),
        "new-refresh-token"
    );
}

#[tokio::test]
async fn current_user_none_without_session() {
    let server = MockServer::start().await;
    let auth = RemoteAuth::new(mock_client(&server));
    assert_eq!(auth.current_user().await.unwrap(), None);
}

// ============================================================================
// Feed queries
// ============================================================================

#[tokio::test]
async fn organization_page_query_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/prayers"))
        .and(query_param("organization_id", "eq.org-1"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("select", "*,profiles(full_name,avatar_url)"))
        .and(header("range", "0-9"))
        .and(header("authorization", "Bearer access-token"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            prayer_row("p-1", "Healing for Sam", Some("org-1")),
            prayer_row("p-2", "Travel mercies", Some("org-1")),
        ])))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let feed = OrgFeed::new(session, OrgId::new("org-1").unwrap());

    let page = feed.fetch_page(0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].content, "Healing for Sam");
    assert_eq!(page[0].prayer_count, 2);
    assert_eq!(page[0].profiles.as_ref().unwrap().full_name, "Alice");
}

#[tokio::test]
async fn second_page_travels_as_range_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/prayers"))
        .and(header("range", "10-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let feed = OrgFeed::new(session, OrgId::new("org-1").unwrap());

    let page = feed.fetch_page(10).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn personal_page_filters_by_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/prayers"))
        .and(query_param("user_id", "eq.u-1"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([prayer_row("p-3", "My own request", None)])),
        )
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let feed = PersonalFeed::new(session);

    let page = feed.fetch_page(0).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].content, "My own request");
}

#[tokio::test]
async fn fetch_failure_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/prayers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "JWT expired",
            "code": "PGRST301"
        })))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let feed = PersonalFeed::new(session);

    let err = feed.fetch_page(0).await.unwrap_err();
    match err {
        Error::Backend(BackendError::Api(api)) => {
            assert_eq!(api.status, 401);
            assert!(api.is_auth_error());
            assert_eq!(api.code.as_deref(), Some("PGRST301"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn insert_sets_explicit_author() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/prayers"))
        .and(body_json(json!({
            "content": "Healing for Sam",
            "is_anonymous": true,
            "organization_id": "org-1",
            "user_id": "u-1"
        })))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "p-10",
            "content": "Healing for Sam",
            "is_anonymous": true,
            "created_at": "2024-05-04T12:00:00Z",
            "organization_id": "org-1",
            "user_id": "u-1",
            "prayer_count": 0
        })))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let org = OrgId::new("org-1").unwrap();
    let feed = OrgFeed::new(session, org.clone());

    let draft = PrayerDraft::new("Healing for Sam", true, Some(org)).unwrap();
    let stored = feed.create(&draft).await.unwrap();

    assert_eq!(stored.id.as_str(), "p-10");
    assert!(!stored.id.is_temporary());
    assert_eq!(stored.user_id.as_str(), "u-1");
    assert!(stored.profiles.is_none());
}

#[tokio::test]
async fn insert_policy_rejection_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/prayers"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "new row violates row-level security policy",
            "code": "42501"
        })))
        .mount(&server)
        .await;

    let session = restored_session(&server, "u-1");
    let feed = PersonalFeed::new(session);

    let draft = PrayerDraft::new("Not allowed", false, None).unwrap();
    let err = feed.create(&draft).await.unwrap_err();

    assert!(matches!(err, Error::Backend(BackendError::Api(_))));
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn join_organization_calls_procedure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/join_organization_by_code"))
        .and(body_partial_json(json!({ "code": "ABC123" })))
        .and(header("authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let auth = RemoteAuth::with_session(
        mock_client(&server),
        restored_session(&server, "u-1"),
    );

    let code = vigil_core::InviteCode::new("abc123").unwrap();
    auth.join_organization(&code).await.unwrap();
}

#[tokio::test]
async fn join_requires_session() {
    let server = MockServer::start().await;
    let auth = RemoteAuth::new(mock_client(&server));

    let code = vigil_core::InviteCode::new("abc123").unwrap();
    let err = auth.join_organization(&code).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Backend(BackendError::NotAuthenticated)
    ));
}
