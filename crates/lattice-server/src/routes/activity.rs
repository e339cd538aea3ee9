//! User-activity history.
//!
//! Activity is always scoped to the authenticated subject. The record
//! endpoint takes its project id as a query parameter (streaming beacons
//! cannot set headers) and rejects a syntactically invalid id up front;
//! delete is idempotent.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use lattice_core::Identity;
use lattice_store::ActivityRecord;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user-activity/record", post(record))
        .route("/api/user-activity/recent", get(recent_all))
        .route("/api/user-activity/recent/{activity_type}", get(recent_by_type))
        .route(
            "/api/user-activity/recent/{activity_type}/{id}",
            delete(remove),
        )
}

#[derive(Debug, Deserialize)]
struct RecordQuery {
    project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordActivityRequest {
    activity_type: String,
    #[serde(default)]
    payload: Value,
}

async fn record(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<RecordActivityRequest>,
) -> Result<Json<Value>, ApiError> {
    let project_id = query
        .project_id
        .ok_or_else(|| ApiError::bad_request("missing project_id query parameter"))?;
    let project_id = Uuid::parse_str(&project_id)
        .map_err(|_| ApiError::bad_request("project_id must be a UUID"))?;

    state
        .activity
        .record_activity(ActivityRecord {
            id: Uuid::new_v4(),
            project_id,
            user: identity.subject_id,
            activity_type: body.activity_type,
            payload: body.payload,
            recorded_at: Utc::now(),
        })
        .await?;

    Ok(Json(json!({ "status": "recorded" })))
}

async fn recent_all(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<ActivityRecord>>, ApiError> {
    let entries = state
        .activity
        .recent_activity(&identity.subject_id, None)
        .await?;
    Ok(Json(entries))
}

async fn recent_by_type(
    State(state): State<AppState>,
    Path(activity_type): Path<String>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<ActivityRecord>>, ApiError> {
    let entries = state
        .activity
        .recent_activity(&identity.subject_id, Some(&activity_type))
        .await?;
    Ok(Json(entries))
}

/// Delete one entry. Unknown ids succeed; only a malformed id is an error.
async fn remove(
    State(state): State<AppState>,
    Path((activity_type, id)): Path<(String, String)>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Value>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("invalid resource id"))?;

    state
        .activity
        .delete_activity(&identity.subject_id, &activity_type, id)
        .await?;
    Ok(Json(json!({ "status": "deleted" })))
}
