pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/assessment/questions",
            get(handlers::handle_list_questions),
        )
        .route("/api/v1/assessments", post(handlers::handle_create_session))
        .route(
            "/api/v1/assessments/:id",
            get(handlers::handle_get_session).delete(handlers::handle_abandon_session),
        )
        .route(
            "/api/v1/assessments/:id/answers/:index",
            put(handlers::handle_record_answer),
        )
        .route("/api/v1/assessments/:id/next", post(handlers::handle_next))
        .route(
            "/api/v1/assessments/:id/previous",
            post(handlers::handle_previous),
        )
        .route("/api/v1/assessments/:id/submit", post(handlers::handle_submit))
        .route("/api/v1/assessments/:id/retake", post(handlers::handle_retake))
        .route(
            "/api/v1/assessments/:id/results",
            get(handlers::handle_get_results),
        )
        .route(
            "/api/v1/assessments/:id/path",
            post(handlers::handle_select_path),
        )
        .with_state(state)
}
