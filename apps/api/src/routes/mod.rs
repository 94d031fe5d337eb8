pub mod health;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth::middleware::require_session;
use crate::feedback::handlers as feedback;
use crate::interview::handlers as interview;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generative proxy (public)
        .route(
            "/api/generateQuestions",
            post(interview::handle_generate_questions),
        )
        .route(
            "/api/generateFeedBack",
            post(feedback::handle_generate_feedback),
        )
        // Interview records
        .route(
            "/api/interviews",
            post(interview::handle_create_interview).get(interview::handle_list_interviews),
        )
        .route(
            "/api/interviews/:id",
            get(interview::handle_get_interview).delete(interview::handle_delete_interview),
        )
        .route(
            "/api/interviews/:id/summary",
            get(interview::handle_get_summary),
        )
        .route(
            "/api/interviews/:id/feedback",
            get(feedback::handle_get_feedback),
        )
        // Live session bridge
        .route(
            "/api/interviews/:id/session",
            get(session::handle_session_ws),
        )
        // Wizard drafts
        .route(
            "/api/drafts",
            put(interview::handle_save_draft)
                .get(interview::handle_get_draft)
                .delete(interview::handle_clear_draft),
        )
        .route("/api/drafts/take", post(interview::handle_take_draft))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .with_state(state)
}
