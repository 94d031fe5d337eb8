use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// The scored evaluation of a completed interview transcript. Four metrics on
/// a 1–10 scale, hire likelihood as a percentage, one free-text suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackScores {
    pub communication: u8,
    pub confidence: u8,
    pub technical_knowledge: u8,
    pub collaboration: u8,
    pub hire_percentage: u8,
    pub suggestion: String,
}

impl FeedbackScores {
    /// Checks the documented score bounds. Vendor output violating them is
    /// treated as unusable, never returned as if valid.
    pub fn validate_bounds(&self) -> Result<(), String> {
        for (label, value) in [
            ("communication", self.communication),
            ("confidence", self.confidence),
            ("technicalKnowledge", self.technical_knowledge),
            ("collaboration", self.collaboration),
        ] {
            if !(1..=10).contains(&value) {
                return Err(format!("{label} must be between 1 and 10, got {value}"));
            }
        }
        if self.hire_percentage > 100 {
            return Err(format!(
                "hirePercentage must be between 0 and 100, got {}",
                self.hire_percentage
            ));
        }
        Ok(())
    }
}

/// Persisted feedback record, keyed by interview and participant.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRow {
    pub interview_id: Uuid,
    pub email: String,
    pub feedback: Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> FeedbackScores {
        FeedbackScores {
            communication: 8,
            confidence: 7,
            technical_knowledge: 9,
            collaboration: 6,
            hire_percentage: 85,
            suggestion: "Give more structured answers.".to_string(),
        }
    }

    #[test]
    fn test_valid_scores_pass_bounds() {
        assert!(scores().validate_bounds().is_ok());
    }

    #[test]
    fn test_zero_metric_fails_bounds() {
        let mut s = scores();
        s.confidence = 0;
        assert!(s.validate_bounds().is_err());
    }

    #[test]
    fn test_metric_above_ten_fails_bounds() {
        let mut s = scores();
        s.communication = 11;
        assert!(s.validate_bounds().is_err());
    }

    #[test]
    fn test_hire_percentage_above_hundred_fails_bounds() {
        let mut s = scores();
        s.hire_percentage = 101;
        assert!(s.validate_bounds().is_err());
    }

    #[test]
    fn test_non_json_vendor_output_never_parses() {
        let raw = "Here is my evaluation: communication 8/10, confidence 7/10.";
        assert!(serde_json::from_str::<FeedbackScores>(raw).is_err());
    }

    #[test]
    fn test_scores_deserialize_from_vendor_wire_shape() {
        let json = r#"{
            "communication": 8,
            "confidence": 7,
            "technicalKnowledge": 9,
            "collaboration": 6,
            "hirePercentage": 85,
            "suggestion": "Keep practicing mock interviews."
        }"#;
        let parsed: FeedbackScores = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.technical_knowledge, 9);
        assert_eq!(parsed.hire_percentage, 85);
    }
}
