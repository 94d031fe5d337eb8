//! Feedback record store — insert-only façade over the `feedback` table.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::models::{FeedbackRow, FeedbackScores};

/// Inserts the scored evaluation for a completed session. One record per
/// (interview, participant); a second completed session is a no-op, the
/// record is never updated.
pub async fn insert_feedback(
    pool: &PgPool,
    interview_id: Uuid,
    email: &str,
    scores: &FeedbackScores,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO feedback (interview_id, email, feedback)
        VALUES ($1, $2, $3)
        ON CONFLICT (interview_id, email) DO NOTHING
        "#,
    )
    .bind(interview_id)
    .bind(email)
    .bind(sqlx::types::Json(scores))
    .execute(pool)
    .await?;

    info!("Stored feedback for interview {interview_id} ({email})");
    Ok(())
}

/// Fetches a participant's feedback for an interview, if the session has
/// completed and been scored.
pub async fn fetch_feedback(
    pool: &PgPool,
    interview_id: Uuid,
    email: &str,
) -> Result<Option<FeedbackRow>, AppError> {
    let row = sqlx::query_as::<_, FeedbackRow>(
        "SELECT interview_id, email, feedback, created_at FROM feedback WHERE interview_id = $1 AND email = $2",
    )
    .bind(interview_id)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
