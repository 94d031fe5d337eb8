//! Assembly of the vendor start request: greeting, fixed
//! transcription/voice/model parameters, and the system instruction built
//! from the stored questions grouped by category.

use serde::Serialize;

use crate::auth::UserProfile;
use crate::interview::models::{InterviewRow, QuestionItem};
use crate::interview::questions::render_question_list;

/// The agent persona shown to the candidate.
pub const AGENT_NAME: &str = "AI Recruiter";

#[derive(Debug, Clone, Serialize)]
pub struct TranscriberConfig {
    pub provider: String,
    pub model: String,
    pub language: String,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            provider: "deepgram".to_string(),
            model: "nova-2".to_string(),
            language: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            provider: "playht".to_string(),
            voice_id: "jennifer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub messages: Vec<SystemMessage>,
}

/// Everything the browser-held vendor SDK needs to start the call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub name: String,
    pub first_message: String,
    pub transcriber: TranscriberConfig,
    pub voice: VoiceConfig,
    pub model: ModelConfig,
}

/// Builds the start request for a session: a greeting using the candidate's
/// display name and the job title, and the full question list grouped by
/// category inside the system instruction.
pub fn build_start_request(
    profile: &UserProfile,
    interview: &InterviewRow,
    questions: &[QuestionItem],
) -> StartRequest {
    let first_message = format!(
        "Hi {}, how are you? Ready for your interview on {}?",
        profile.username, interview.job_name
    );

    let question_list = render_question_list(questions);
    let content = format!(
        r#"You are an AI voice assistant conducting interviews.
Your job is to ask candidates provided interview questions, assess their responses.
Begin the conversation with a friendly introduction, setting a relaxed yet professional tone. Example:
"Hey there! Welcome to your {job_name} interview. Let's get started with a few questions!"
Ask one question at a time and wait for the candidate's response before proceeding. Keep the questions clear and concise. Below are the questions, grouped by interview type; ask them one by one:
{question_list}
If the candidate struggles, offer hints or rephrase the question without giving away the answer.
Provide brief, encouraging feedback after each answer.
Keep the conversation natural and engaging.
After the questions, wrap up the interview smoothly by summarizing the candidate's performance and end on a positive note.
Key Guidelines:
- Be friendly, engaging, and witty
- Keep responses short and natural, like a real conversation
- Adapt based on the candidate's confidence level
- Ensure the interview remains focused on the {job_name} role"#,
        job_name = interview.job_name,
        question_list = question_list,
    );

    StartRequest {
        name: AGENT_NAME.to_string(),
        first_message,
        transcriber: TranscriberConfig::default(),
        voice: VoiceConfig::default(),
        model: ModelConfig {
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            messages: vec![SystemMessage {
                role: "system".to_string(),
                content,
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile {
            username: "jane".to_string(),
            avatar_url: None,
            email: "jane@example.com".to_string(),
        }
    }

    fn interview() -> InterviewRow {
        InterviewRow {
            interview_id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            company_name: "Acme".to_string(),
            company_description: "A maker of everything.".to_string(),
            job_name: "Backend Engineer".to_string(),
            job_description: "Run services.".to_string(),
            interview_types: vec!["Behavioral".to_string()],
            number_of_questions: "5".to_string(),
            questions: json!([]),
            created_at: Utc::now(),
        }
    }

    fn questions() -> Vec<QuestionItem> {
        vec![
            QuestionItem {
                question: "Tell me about a conflict.".to_string(),
                question_type: "Behavioral".to_string(),
            },
            QuestionItem {
                question: "Design a rate limiter.".to_string(),
                question_type: "System Design".to_string(),
            },
        ]
    }

    #[test]
    fn test_first_message_greets_by_name_and_job_title() {
        let request = build_start_request(&profile(), &interview(), &questions());
        assert_eq!(
            request.first_message,
            "Hi jane, how are you? Ready for your interview on Backend Engineer?"
        );
    }

    #[test]
    fn test_system_instruction_contains_grouped_questions() {
        let request = build_start_request(&profile(), &interview(), &questions());
        let content = &request.model.messages[0].content;
        assert!(content.contains("Behavioral:\n1. Tell me about a conflict."));
        assert!(content.contains("System Design:\n1. Design a rate limiter."));
    }

    #[test]
    fn test_fixed_provider_parameters() {
        let request = build_start_request(&profile(), &interview(), &questions());
        assert_eq!(request.transcriber.provider, "deepgram");
        assert_eq!(request.transcriber.model, "nova-2");
        assert_eq!(request.voice.provider, "playht");
        assert_eq!(request.voice.voice_id, "jennifer");
        assert_eq!(request.model.provider, "openai");
        assert_eq!(request.model.model, "gpt-4");
    }

    #[test]
    fn test_start_request_serializes_camel_case() {
        let request = build_start_request(&profile(), &interview(), &questions());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("firstMessage").is_some());
        assert_eq!(json["voice"]["voiceId"], "jennifer");
        assert_eq!(json["model"]["messages"][0]["role"], "system");
    }
}
