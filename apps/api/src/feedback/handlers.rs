//! Axum route handlers for the generative feedback proxy and the result view.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::feedback::evaluator::evaluate_transcript;
use crate::feedback::models::{FeedbackRow, FeedbackScores};
use crate::feedback::presentation::{build_result_view, ResultView};
use crate::feedback::store;
use crate::interview::handlers::extract_string_field;
use crate::state::AppState;

/// POST /api/generateFeedBack
///
/// Forwards a transcript inside the fixed evaluation instruction and returns
/// the parsed, bounds-checked feedback object. No persistence here: this is
/// the stateless proxy; the live-session bridge stores completed sessions.
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<FeedbackScores>, AppError> {
    let transcript = extract_string_field(&body, "transcript")?;
    let scores = evaluate_transcript(&state.llm, transcript).await?;
    Ok(Json(scores))
}

/// GET /api/interviews/:id/feedback
///
/// The participant's scored summary for a completed session, shaped for the
/// result dashboard. 404 until the session has completed and been scored.
pub async fn handle_get_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<ResultView>, AppError> {
    let row: FeedbackRow = store::fetch_feedback(&state.db, interview_id, &user.email)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No feedback yet for interview {interview_id}"))
        })?;

    let scores: FeedbackScores = serde_json::from_value(row.feedback)
        .map_err(|e| AppError::Parse(format!("Stored feedback is malformed: {e}")))?;

    Ok(Json(build_result_view(&scores)))
}
