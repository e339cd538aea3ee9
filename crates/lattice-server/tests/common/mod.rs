//! Shared test infrastructure for gateway integration tests.
//!
//! Builds the full router against an in-memory store with dev identities
//! enabled, plus request helpers for driving it through `oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use lattice_core::{GatewayConfig, PropertyKind, PropertyValue};
use lattice_server::{AppState, app};
use lattice_store::memory::InMemoryStore;
use lattice_store::{Entity, EntityTypeDef};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Project every fixture lives under. UUID-shaped so it passes the
/// activity-record and SSE validations too.
pub const PROJECT_ID: &str = "5f9c2b7e-4a31-4a2e-9c64-08f1d2ab3c90";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    /// Default app: dev identities on, default cache TTL.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        seed_entities(&store);
        store.grant_superadmin("dev-admin");

        let state = AppState::with_memory_store(config, store.clone());
        Self {
            router: app(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    /// Send and decode: status plus parsed JSON body (null when empty).
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.dev_tokens = true;
    config
}

/// Config with introspection caching disabled, so revocations are visible
/// immediately.
pub fn uncached_config() -> GatewayConfig {
    let mut config = test_config();
    config.auth.introspection_cache_ttl_secs = 0;
    config
}

fn seed_entities(store: &InMemoryStore) {
    store.add_entity_type(
        PROJECT_ID,
        EntityTypeDef {
            name: "Customer".to_string(),
            description: Some("A customer account".to_string()),
            properties: BTreeMap::from([
                ("name".to_string(), PropertyKind::Text),
                ("active".to_string(), PropertyKind::Boolean),
            ]),
        },
    );
    for (name, active) in [("Acme Rockets", true), ("Globex", false)] {
        store.add_entity(Entity {
            id: Uuid::new_v4(),
            project_id: PROJECT_ID.to_string(),
            type_name: "Customer".to_string(),
            properties: BTreeMap::from([
                ("name".to_string(), PropertyValue::Text(name.to_string())),
                ("active".to_string(), PropertyValue::Boolean(active)),
            ]),
        });
    }
}

pub fn request(method: &str, path: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(path)
}

/// Builder sugar for the headers and bodies the suites keep repeating.
pub trait RequestBuilderExt {
    fn bearer(self, token: &str) -> Self;
    fn project(self, project_id: &str) -> Self;
    fn session(self, session_id: &str) -> Self;
    fn json(self, body: &Value) -> Request<Body>;
    fn empty(self) -> Request<Body>;
}

impl RequestBuilderExt for axum::http::request::Builder {
    fn bearer(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    fn project(self, project_id: &str) -> Self {
        self.header("x-project-id", project_id)
    }

    fn session(self, session_id: &str) -> Self {
        self.header("mcp-session-id", session_id)
    }

    fn json(self, body: &Value) -> Request<Body> {
        self.header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn empty(self) -> Request<Body> {
        self.body(Body::empty()).expect("request builds")
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    }
}

/// Error code from the standard error body shape.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

/// A JSON-RPC request envelope. `params: None` omits the field entirely.
pub fn rpc_body(method: &str, params: Option<Value>) -> Value {
    let mut body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
    });
    if let Some(params) = params {
        body["params"] = params;
    }
    body
}

pub fn initialize_params() -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "clientInfo": { "name": "integration-tests", "version": "0" }
    })
}

/// Run initialize and return the session id from the response header.
pub async fn initialize_session(app: &TestApp, token: &str) -> String {
    let response = app
        .send(
            request("POST", "/mcp")
                .bearer(token)
                .project(PROJECT_ID)
                .json(&rpc_body("initialize", Some(initialize_params()))),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get("mcp-session-id")
        .expect("initialize sets the session header")
        .to_str()
        .expect("session id is ascii")
        .to_string()
}
