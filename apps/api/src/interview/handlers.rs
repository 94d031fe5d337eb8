//! Axum route handlers for the generative question proxy, the interview
//! record store, and the wizard draft store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::interview::draft::{self, WizardDraft};
use crate::interview::models::{
    InterviewForm, InterviewListItem, InterviewRow, InterviewSummary, QuestionItem,
};
use crate::interview::prompt::build_interview_prompt;
use crate::interview::questions::parse_questions;
use crate::interview::store;
use crate::llm_client::{QUESTION_GENERATION, QUESTION_MODEL};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewResponse {
    pub interview_id: Uuid,
    pub invite_url: String,
    pub questions: Vec<QuestionItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generative proxy
// ────────────────────────────────────────────────────────────────────────────

/// Pulls the required string field out of a free-form JSON body. A missing or
/// non-string value is a validation failure before any vendor call is made.
pub(crate) fn extract_string_field<'a>(body: &'a Value, field: &str) -> Result<&'a str, AppError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation(format!("{field} is required and must be a string."))
        })
}

/// POST /api/generateQuestions
///
/// Forwards the prompt to the generative-language vendor with fixed sampling
/// parameters and returns the vendor text verbatim under `result`. Single
/// attempt; vendor failure or empty output is an upstream error.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let prompt = extract_string_field(&body, "prompt")?;

    let result = state
        .llm
        .generate(QUESTION_MODEL, prompt, QUESTION_GENERATION)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(GenerateQuestionsResponse { result }))
}

// ────────────────────────────────────────────────────────────────────────────
// Interview records
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interviews
///
/// Full creation pipeline: validate form → build prompt → generate → parse
/// questions → insert record → stash the wizard draft for the confirmation
/// step → return the id and invite link.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<InterviewForm>,
) -> Result<Json<CreateInterviewResponse>, AppError> {
    form.validate()?;

    let prompt = build_interview_prompt(&form);
    let raw = state
        .llm
        .generate(QUESTION_MODEL, &prompt, QUESTION_GENERATION)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;
    let questions = parse_questions(&raw)?;

    let interview_id = store::create_interview(&state.db, &form, &user.email, &questions).await?;

    draft::save_draft(
        &state.db,
        &user.email,
        &WizardDraft {
            form,
            questions: questions.clone(),
        },
    )
    .await?;

    let invite_url = format!("{}/interview/{interview_id}", state.config.base_url);
    Ok(Json(CreateInterviewResponse {
        interview_id,
        invite_url,
        questions,
    }))
}

/// GET /api/interviews — the owner's dashboard list.
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<InterviewListItem>>, AppError> {
    let interviews = store::fetch_by_owner(&state.db, &user.email).await?;
    Ok(Json(interviews))
}

/// GET /api/interviews/:id — the full record, read by the live-session page.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = store::fetch_by_id(&state.db, interview_id).await?;
    Ok(Json(interview))
}

/// GET /api/interviews/:id/summary — public invitation summary. An empty
/// array tells the invitation page the link is invalid.
pub async fn handle_get_summary(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<Vec<InterviewSummary>>, AppError> {
    let summary = store::fetch_public_summary(&state.db, interview_id).await?;
    Ok(Json(summary))
}

/// DELETE /api/interviews/:id — owner-scoped delete from the dashboard.
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(interview_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_interview(&state.db, interview_id, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard drafts
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/drafts — upsert the caller's in-progress wizard state.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<WizardDraft>,
) -> Result<StatusCode, AppError> {
    draft::save_draft(&state.db, &user.email, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/drafts — peek without consuming.
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Option<WizardDraft>>, AppError> {
    let found = draft::load_draft(&state.db, &user.email).await?;
    Ok(Json(found))
}

/// POST /api/drafts/take — the confirmation step's read-once consumption.
pub async fn handle_take_draft(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Option<WizardDraft>>, AppError> {
    let found = draft::take_draft(&state.db, &user.email).await?;
    Ok(Json(found))
}

/// DELETE /api/drafts — explicit discard.
pub async fn handle_clear_draft(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    draft::clear_draft(&state.db, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
