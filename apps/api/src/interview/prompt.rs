//! Question Prompt Builder — pure templating of the job-posting form into the
//! generation instruction. Malformed input is rejected by form validation
//! upstream, never here.

use crate::interview::models::InterviewForm;

/// Builds the instruction string for question generation. Every form field is
/// embedded verbatim, along with the exact requested count and category mix.
pub fn build_interview_prompt(form: &InterviewForm) -> String {
    let type_list = form.interview_types.join(", ");

    format!(
        r#"You are an expert technical interviewer.

Based on the following inputs, generate a structured, relevant, and high-quality list of interview questions.

Job Context:
Company Name: {company_name}
Company Description: {company_description}
Job Title: {job_name}
Job Description: {job_description}
Number of Questions: {number_of_questions}
Interview Types: {type_list}

Your task:
1. Analyze the job description to extract key responsibilities, required technical skills, and expected experience level.
2. Generate exactly {number_of_questions} interview questions appropriate for the listed interview types ({type_list}).
3. Ensure the questions are well-balanced across types, and vary in difficulty and style (theory, practical, code, reasoning).
4. Match the tone and structure of a real-life {type_list} interview session.
5. Avoid filler; each question should assess a meaningful aspect of the candidate's suitability.

Output Format:
Respond in JSON format with an array of question objects:
[
  {{
    "question": "Your question here",
    "type": "{type_list}"
  }}
]

Objective:
Create a professional-grade interview plan for the '{job_name}' role, with exactly {number_of_questions} questions targeting the most relevant skills and competencies.
"#,
        company_name = form.company_name,
        company_description = form.company_description,
        job_name = form.job_name,
        job_description = form.job_description,
        number_of_questions = form.number_of_questions,
        type_list = type_list,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> InterviewForm {
        InterviewForm {
            company_name: "Acme".to_string(),
            company_description: "Rocket-powered consumer hardware.".to_string(),
            job_name: "QA Engineer".to_string(),
            job_description: "Own the test strategy for embedded firmware.".to_string(),
            interview_types: vec!["Behavioral".to_string()],
            number_of_questions: "5".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_every_field_verbatim() {
        let prompt = build_interview_prompt(&form());
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("Rocket-powered consumer hardware."));
        assert!(prompt.contains("QA Engineer"));
        assert!(prompt.contains("Own the test strategy for embedded firmware."));
        assert!(prompt.contains("Behavioral"));
        assert!(prompt.contains("5"));
    }

    #[test]
    fn test_prompt_contains_literal_requested_count() {
        let prompt = build_interview_prompt(&form());
        assert!(prompt.contains("exactly 5 interview questions"));
    }

    #[test]
    fn test_prompt_joins_multiple_types_with_commas() {
        let mut f = form();
        f.interview_types = vec![
            "Behavioral".to_string(),
            "System Design".to_string(),
        ];
        let prompt = build_interview_prompt(&f);
        assert!(prompt.contains("Behavioral, System Design"));
    }

    #[test]
    fn test_prompt_requests_json_array_of_question_objects() {
        let prompt = build_interview_prompt(&form());
        assert!(prompt.contains("JSON format"));
        assert!(prompt.contains(r#""question""#));
        assert!(prompt.contains(r#""type""#));
    }
}
