//! Interview Record Store — CRUD façade over the `interviews` table.
//!
//! Every operation returns an explicit `Result`; a store failure is never
//! swallowed into a silent sentinel value.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{
    InterviewForm, InterviewListItem, InterviewRow, InterviewSummary, QuestionItem,
};

/// Inserts a new interview definition and returns its generated id.
/// `questions` is written exactly once here and never mutated afterward.
pub async fn create_interview(
    pool: &PgPool,
    form: &InterviewForm,
    email: &str,
    questions: &[QuestionItem],
) -> Result<Uuid, AppError> {
    let interview_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO interviews
            (interview_id, email, company_name, company_description,
             job_name, job_description, interview_types, number_of_questions, questions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(interview_id)
    .bind(email)
    .bind(&form.company_name)
    .bind(&form.company_description)
    .bind(&form.job_name)
    .bind(&form.job_description)
    .bind(&form.interview_types)
    .bind(&form.number_of_questions)
    .bind(sqlx::types::Json(questions))
    .execute(pool)
    .await?;

    info!("Created interview {interview_id} for {email}");
    Ok(interview_id)
}

/// Fetches a full interview definition by id.
pub async fn fetch_by_id(pool: &PgPool, interview_id: Uuid) -> Result<InterviewRow, AppError> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE interview_id = $1")
        .bind(interview_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))
}

/// Lists the owner's interviews for the dashboard. Exact-match filter on the
/// owner email, newest first, no pagination.
pub async fn fetch_by_owner(pool: &PgPool, email: &str) -> Result<Vec<InterviewListItem>, AppError> {
    let rows = sqlx::query_as::<_, InterviewListItem>(
        r#"
        SELECT interview_id, job_name, job_description, company_name,
               company_description, interview_types, email
        FROM interviews
        WHERE email = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetches the partial fields shown on the invitation page. Returns an array;
/// an empty array is the caller's signal for an invalid link, not an error.
pub async fn fetch_public_summary(
    pool: &PgPool,
    interview_id: Uuid,
) -> Result<Vec<InterviewSummary>, AppError> {
    let rows = sqlx::query_as::<_, InterviewSummary>(
        r#"
        SELECT created_at, company_name, company_description,
               job_name, job_description, interview_types
        FROM interviews
        WHERE interview_id = $1
        "#,
    )
    .bind(interview_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Deletes an interview. Owner-scoped: the row must belong to `email`.
pub async fn delete_interview(
    pool: &PgPool,
    interview_id: Uuid,
    email: &str,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM interviews WHERE interview_id = $1 AND email = $2")
        .bind(interview_id)
        .bind(email)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Interview {interview_id} not found"
        )));
    }
    info!("Deleted interview {interview_id} for {email}");
    Ok(())
}
