use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;

/// Body of POST /v1/jobs.
#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    pub urls: Option<Vec<String>>,
}

/// GET /v1/jobs — ids of all submitted jobs.
pub async fn list_jobs(State(state): State<AppState>) -> Response {
    match state.store.list_ids().await {
        Ok(ids) => Json(ids).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST /v1/jobs — submit a batch of image URLs as a new job.
pub async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<SubmitJobRequest>,
) -> Response {
    let Some(urls) = request.urls else {
        let body = serde_json::json!({ "error": "Bad Request. No `urls` field." });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    let job_id = Uuid::new_v4().to_string();
    match state.orchestrator.submit(job_id, urls).await {
        Ok(job_id) => (StatusCode::CREATED, Json(job_id)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /v1/jobs/{job_id} — the current record of one job.
pub async fn get_job(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    match state.store.get(&job_id).await {
        Ok(Some(job)) => Json(job).into_response(),
        Ok(None) => {
            let body = serde_json::json!({ "error": format!("Job {job_id} was not found.") });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Store operation failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
