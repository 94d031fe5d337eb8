use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// The fixed interview category labels offered by the creation wizard.
pub const INTERVIEW_TYPES: [&str; 8] = [
    "Behavioral",
    "HR",
    "System Design",
    "Case Study",
    "Technical Discussion",
    "Leadership",
    "Product Thinking",
    "Team Collaboration",
];

/// Allowed values for the string-encoded question count.
pub const QUESTION_COUNTS: [&str; 4] = ["5", "10", "15", "20"];

/// The job-posting form driving question generation. Field names mirror the
/// wizard's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewForm {
    pub company_name: String,
    pub company_description: String,
    pub job_name: String,
    pub job_description: String,
    pub interview_types: Vec<String>,
    pub number_of_questions: String,
}

impl InterviewForm {
    /// Mirrors the wizard's schema: minimum lengths, a non-empty set of known
    /// category labels, and a question count from the fixed set.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.company_name.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "Company name must be at least 2 characters.".to_string(),
            ));
        }
        if self.company_description.trim().chars().count() < 10 {
            return Err(AppError::Validation(
                "Company description must be at least 10 characters.".to_string(),
            ));
        }
        if self.job_name.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "Job name must be at least 2 characters.".to_string(),
            ));
        }
        if self.job_description.trim().chars().count() < 10 {
            return Err(AppError::Validation(
                "Job description must be at least 10 characters.".to_string(),
            ));
        }
        if self.interview_types.is_empty() {
            return Err(AppError::Validation(
                "You must select at least one interview type.".to_string(),
            ));
        }
        if let Some(unknown) = self
            .interview_types
            .iter()
            .find(|t| !INTERVIEW_TYPES.contains(&t.as_str()))
        {
            return Err(AppError::Validation(format!(
                "Unknown interview type: {unknown}"
            )));
        }
        if !QUESTION_COUNTS.contains(&self.number_of_questions.as_str()) {
            return Err(AppError::Validation(
                "Please select the number of questions.".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single generated interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
}

/// Full interview record. `questions` is stored as the jsonb payload produced
/// at creation and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRow {
    pub interview_id: Uuid,
    pub email: String,
    pub company_name: String,
    pub company_description: String,
    pub job_name: String,
    pub job_description: String,
    pub interview_types: Vec<String>,
    pub number_of_questions: String,
    pub questions: Value,
    pub created_at: DateTime<Utc>,
}

impl InterviewRow {
    /// Decodes the stored question payload. The payload was validated at
    /// creation, so a failure here means the row predates the current shape.
    pub fn question_items(&self) -> Result<Vec<QuestionItem>, AppError> {
        serde_json::from_value(self.questions.clone())
            .map_err(|e| AppError::Parse(format!("Stored questions are malformed: {e}")))
    }
}

/// Dashboard listing entry — the subset the owner's interview list shows.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewListItem {
    pub interview_id: Uuid,
    pub job_name: String,
    pub job_description: String,
    pub company_name: String,
    pub company_description: String,
    pub interview_types: Vec<String>,
    pub email: String,
}

/// Public invitation summary — partial fields readable from an invite link.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    pub created_at: DateTime<Utc>,
    pub company_name: String,
    pub company_description: String,
    pub job_name: String,
    pub job_description: String,
    pub interview_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> InterviewForm {
        InterviewForm {
            company_name: "Acme".to_string(),
            company_description: "A maker of everything an interviewer could want.".to_string(),
            job_name: "Backend Engineer".to_string(),
            job_description: "Design and operate HTTP services in production.".to_string(),
            interview_types: vec!["Behavioral".to_string()],
            number_of_questions: "5".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_short_company_name_rejected() {
        let mut form = valid_form();
        form.company_name = "A".to_string();
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_interview_types_rejected() {
        let mut form = valid_form();
        form.interview_types.clear();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_unknown_interview_type_rejected() {
        let mut form = valid_form();
        form.interview_types = vec!["Trivia".to_string()];
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_question_count_outside_fixed_set_rejected() {
        let mut form = valid_form();
        form.number_of_questions = "7".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_uses_camel_case_wire_names() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("numberOfQuestions").is_some());
    }

    #[test]
    fn test_question_item_round_trips_type_field() {
        let item: QuestionItem =
            serde_json::from_str(r#"{"question": "Why Rust?", "type": "Technical Discussion"}"#)
                .unwrap();
        assert_eq!(item.question_type, "Technical Discussion");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Technical Discussion");
    }
}
