//! Transcript evaluation — one vendor call, strict JSON parsing, bounded
//! scores or nothing.

use tracing::error;

use crate::errors::AppError;
use crate::feedback::models::FeedbackScores;
use crate::feedback::prompts::build_feedback_prompt;
use crate::llm_client::{LlmClient, FEEDBACK_GENERATION, FEEDBACK_MODEL};

/// Scores a formatted transcript. Vendor output must parse directly as a JSON
/// object with in-bounds scores; anything else is rejected with the raw text
/// logged for diagnosis.
pub async fn evaluate_transcript(
    llm: &LlmClient,
    transcript: &str,
) -> Result<FeedbackScores, AppError> {
    let prompt = build_feedback_prompt(transcript);
    let text = llm
        .generate(FEEDBACK_MODEL, &prompt, FEEDBACK_GENERATION)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let scores: FeedbackScores = serde_json::from_str(&text).map_err(|e| {
        error!("Failed to parse feedback JSON: {e}; raw output: {text}");
        AppError::Parse(format!("Feedback output is not valid JSON: {e}"))
    })?;

    scores.validate_bounds().map_err(|msg| {
        error!("Feedback scores out of bounds: {msg}; raw output: {text}");
        AppError::Parse(msg)
    })?;

    Ok(scores)
}
