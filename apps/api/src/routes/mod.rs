pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

/// JSON framing around a maximal `latex` field.
const BODY_OVERHEAD_BYTES: usize = 16 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_latex_bytes.saturating_mul(2) + BODY_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/parse", post(handlers::handle_parse))
        .route("/api/v1/resume/generate", post(handlers::handle_generate))
        .route("/api/v1/resume/download", post(handlers::handle_download))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
