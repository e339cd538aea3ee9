//! Auth gateway integration tests: credential resolution, introspection,
//! scope enforcement, tenant context, and token lifecycle.

mod common;

use axum::http::StatusCode;
use common::{
    PROJECT_ID, RequestBuilderExt, TestApp, error_code, request, uncached_config,
};
use chrono::Utc;
use lattice_auth::{dev, token};
use lattice_core::scopes;
use lattice_store::TokenStore;
use serde_json::json;
use std::collections::BTreeSet;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(request("GET", "/healthz").empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn missing_credential_is_missing_token() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/me").empty())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "missing_token");
}

#[tokio::test]
async fn malformed_authorization_is_missing_token() {
    let app = TestApp::new();
    for value in ["Basic dXNlcjpwdw==", "Bearer ", "lat_bare_token"] {
        let (status, body) = app
            .send_json(
                request("GET", "/api/v1/test/me")
                    .header("authorization", value)
                    .empty(),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "value: {value}");
        assert_eq!(error_code(&body), "missing_token", "value: {value}");
    }
}

#[tokio::test]
async fn unrecognized_bearer_is_invalid_token() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(
            request("GET", "/api/v1/test/me")
                .bearer("some-opaque-thing")
                .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "invalid_token");
}

#[tokio::test]
async fn dev_identity_is_deterministic_with_full_catalog() {
    let app = TestApp::new();

    let (status, first) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["subject_id"], "user:dev-admin");
    assert_eq!(
        first["scopes"].as_array().unwrap().len(),
        scopes::CATALOG.len()
    );

    let (_, second) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn dev_identities_are_rejected_when_gated_off() {
    let mut config = common::test_config();
    config.auth.dev_tokens = false;
    let app = TestApp::with_config(config);

    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "invalid_token");
}

#[tokio::test]
async fn token_query_parameter_authenticates_headerless_clients() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(request("GET", &format!("/api/v1/test/me?token={}", dev::ADMIN)).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject_id"], "user:dev-admin");
}

#[tokio::test]
async fn scoped_route_reports_the_missing_scopes() {
    let app = TestApp::new();

    // The restricted identity holds entities:read and documents:read only.
    let (status, body) = app
        .send_json(
            request("GET", "/api/v1/test/scoped")
                .bearer(dev::RESTRICTED)
                .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "forbidden");
    assert_eq!(
        body["error"]["details"]["missing"],
        json!([scopes::DATA_READ])
    );

    let (status, _) = app
        .send_json(request("GET", "/api/v1/test/scoped").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn zero_scope_identity_is_forbidden_everywhere_scoped() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(
            request("GET", "/api/v1/test/scoped")
                .bearer(dev::NO_SCOPES)
                .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"]["details"]["missing"],
        json!([scopes::DATA_READ])
    );
}

#[tokio::test]
async fn project_route_requires_the_tenant_header() {
    let app = TestApp::new();

    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/project").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "bad_request");

    let (status, body) = app
        .send_json(
            request("GET", "/api/v1/test/project")
                .bearer(dev::ADMIN)
                .project(PROJECT_ID)
                .header("x-org-id", "org-9")
                .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_id"], PROJECT_ID);
    assert_eq!(body["org_id"], "org-9");
}

#[tokio::test]
async fn scope_check_runs_before_the_tenant_header_check() {
    let app = TestApp::new();

    // No tokens:manage scope AND no project header: the scope failure wins.
    let (status, body) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::RESTRICTED)
                .json(&json!({ "name": "ci" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "forbidden");

    // With the scope but still no header, the tenant check fires.
    let (status, body) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::ADMIN)
                .json(&json!({ "name": "ci" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "bad_request");
}

#[tokio::test]
async fn issued_token_round_trips_its_exact_scopes() {
    let app = TestApp::new();

    let (status, created) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::ADMIN)
                .project(PROJECT_ID)
                .json(&json!({
                    "name": "integration",
                    "scopes": [scopes::DATA_READ, scopes::DATA_WRITE]
                })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let plaintext = created["token"].as_str().unwrap();
    assert!(plaintext.starts_with("lat_"));
    let token_id = created["id"].as_str().unwrap();

    let (status, identity) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(identity["subject_id"], token_id);
    assert_eq!(
        identity["scopes"],
        json!([scopes::DATA_READ, scopes::DATA_WRITE])
    );

    // data:read is enough for the scoped probe.
    let (status, _) = app
        .send_json(request("GET", "/api/v1/test/scoped").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn issued_token_without_a_scope_is_forbidden() {
    let app = TestApp::new();
    let (_, created) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::ADMIN)
                .project(PROJECT_ID)
                .json(&json!({ "name": "narrow", "scopes": [scopes::ENTITIES_READ] })),
        )
        .await;
    let plaintext = created["token"].as_str().unwrap();

    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/scoped").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"]["details"]["missing"],
        json!([scopes::DATA_READ])
    );
}

#[tokio::test]
async fn revoked_token_is_rejected() {
    // Caching off so the revocation is visible immediately.
    let app = TestApp::with_config(uncached_config());

    let (_, created) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::ADMIN)
                .project(PROJECT_ID)
                .json(&json!({ "name": "doomed", "scopes": [scopes::DATA_READ] })),
        )
        .await;
    let plaintext = created["token"].as_str().unwrap();
    let token_id = created["id"].as_str().unwrap();

    let (status, _) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send_json(
            request(
                "DELETE",
                &format!("/api/v1/projects/{PROJECT_ID}/tokens/{token_id}"),
            )
            .bearer(dev::ADMIN)
            .project(PROJECT_ID)
            .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "invalid_token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::new();

    let minted = token::mint(
        PROJECT_ID,
        "stale",
        BTreeSet::from([scopes::DATA_READ.to_string()]),
        Some(Utc::now() - chrono::Duration::minutes(5)),
    );
    app.store.insert_token(minted.record).await.unwrap();

    let (status, body) = app
        .send_json(request("GET", "/api/v1/test/me").bearer(&minted.token).empty())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "invalid_token");
}

#[tokio::test]
async fn token_revocation_is_idempotent_and_header_gated() {
    let app = TestApp::new();
    let unknown = uuid::Uuid::new_v4();

    // Revoking a token that never existed still succeeds.
    let (status, body) = app
        .send_json(
            request(
                "DELETE",
                &format!("/api/v1/projects/{PROJECT_ID}/tokens/{unknown}"),
            )
            .bearer(dev::ADMIN)
            .project(PROJECT_ID)
            .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "revoked");

    // Without the tenant header the delete is a client error.
    let (status, _) = app
        .send_json(
            request(
                "DELETE",
                &format!("/api/v1/projects/{PROJECT_ID}/tokens/{unknown}"),
            )
            .bearer(dev::ADMIN)
            .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn superadmin_status_is_object_or_null() {
    let app = TestApp::new();

    // dev-admin is granted in the fixture.
    let (status, body) = app
        .send_json(request("GET", "/api/superadmin/me").bearer(dev::ADMIN).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "dev-admin");

    // Regular users get a literal null.
    let (status, body) = app
        .send_json(
            request("GET", "/api/superadmin/me")
                .bearer(dev::RESTRICTED)
                .empty(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn api_tokens_are_never_superadmins() {
    let app = TestApp::new();
    let (_, created) = app
        .send_json(
            request("POST", &format!("/api/v1/projects/{PROJECT_ID}/tokens"))
                .bearer(dev::ADMIN)
                .project(PROJECT_ID)
                .json(&json!({ "name": "svc" })),
        )
        .await;
    let plaintext = created["token"].as_str().unwrap();

    let (status, body) = app
        .send_json(request("GET", "/api/superadmin/me").bearer(plaintext).empty())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}
