/// API route modules
pub mod health;
pub mod skill;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// Build the HTTP router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/skill", post(skill::handle_skill_request))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}
