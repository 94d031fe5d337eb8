//! Wizard Draft Store — the server-side replacement for the wizard's ad hoc
//! browser-storage blobs: one namespaced draft per owner with an explicit
//! schema version, read-once semantics for the confirmation step.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use crate::errors::AppError;
use crate::interview::models::{InterviewForm, QuestionItem};

/// Bump when the draft payload shape changes; stale drafts read as absent.
pub const DRAFT_SCHEMA_VERSION: i32 = 1;

/// The in-progress interview carried between wizard steps. Advisory state
/// only; the record store stays the source of truth after the final save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub form: InterviewForm,
    pub questions: Vec<QuestionItem>,
}

#[derive(Debug, FromRow)]
struct DraftRow {
    schema_version: i32,
    form: Value,
    questions: Value,
}

fn decode_draft(row: DraftRow) -> Option<WizardDraft> {
    if row.schema_version != DRAFT_SCHEMA_VERSION {
        warn!(
            "Discarding wizard draft with schema version {} (current {})",
            row.schema_version, DRAFT_SCHEMA_VERSION
        );
        return None;
    }
    let form = serde_json::from_value(row.form).ok()?;
    let questions = serde_json::from_value(row.questions).ok()?;
    Some(WizardDraft { form, questions })
}

/// Upserts the owner's draft.
pub async fn save_draft(pool: &PgPool, email: &str, draft: &WizardDraft) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO wizard_drafts (email, schema_version, form, questions, updated_at)
        VALUES ($1, $2, $3, $4, now())
        ON CONFLICT (email) DO UPDATE
            SET schema_version = EXCLUDED.schema_version,
                form = EXCLUDED.form,
                questions = EXCLUDED.questions,
                updated_at = now()
        "#,
    )
    .bind(email)
    .bind(DRAFT_SCHEMA_VERSION)
    .bind(serde_json::to_value(&draft.form).map_err(|e| AppError::Parse(e.to_string()))?)
    .bind(serde_json::to_value(&draft.questions).map_err(|e| AppError::Parse(e.to_string()))?)
    .execute(pool)
    .await?;
    Ok(())
}

/// Reads the owner's draft without consuming it.
pub async fn load_draft(pool: &PgPool, email: &str) -> Result<Option<WizardDraft>, AppError> {
    let row = sqlx::query_as::<_, DraftRow>(
        "SELECT schema_version, form, questions FROM wizard_drafts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(decode_draft))
}

/// Read-once: returns the draft and clears it in a single statement, so a
/// reload after consumption finds nothing.
pub async fn take_draft(pool: &PgPool, email: &str) -> Result<Option<WizardDraft>, AppError> {
    let row = sqlx::query_as::<_, DraftRow>(
        "DELETE FROM wizard_drafts WHERE email = $1 RETURNING schema_version, form, questions",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.and_then(decode_draft))
}

/// Drops the owner's draft if any.
pub async fn clear_draft(pool: &PgPool, email: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM wizard_drafts WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_form_json() -> Value {
        json!({
            "companyName": "Acme",
            "companyDescription": "A maker of everything.",
            "jobName": "QA Engineer",
            "jobDescription": "Own the test strategy end to end.",
            "interviewTypes": ["Behavioral"],
            "numberOfQuestions": "5"
        })
    }

    #[test]
    fn test_decode_current_version() {
        let row = DraftRow {
            schema_version: DRAFT_SCHEMA_VERSION,
            form: sample_form_json(),
            questions: json!([{"question": "Why QA?", "type": "Behavioral"}]),
        };
        let draft = decode_draft(row).expect("current-version draft must decode");
        assert_eq!(draft.form.company_name, "Acme");
        assert_eq!(draft.questions.len(), 1);
    }

    #[test]
    fn test_stale_schema_version_reads_as_absent() {
        let row = DraftRow {
            schema_version: DRAFT_SCHEMA_VERSION - 1,
            form: sample_form_json(),
            questions: json!([]),
        };
        assert!(decode_draft(row).is_none());
    }

    #[test]
    fn test_malformed_payload_reads_as_absent() {
        let row = DraftRow {
            schema_version: DRAFT_SCHEMA_VERSION,
            form: json!({"companyName": 42}),
            questions: json!([]),
        };
        assert!(decode_draft(row).is_none());
    }
}
