pub mod health;
pub mod jobs;
pub mod metrics;

use axum::{routing::get, Router};

use crate::app_state::AppState;

/// API routes that share the application state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/v1/jobs", get(jobs::list_jobs).post(jobs::submit_job))
        .route("/v1/jobs/{job_id}", get(jobs::get_job))
        .with_state(state)
}
