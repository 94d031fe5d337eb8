//! Parsing and grouping of generated questions.
//!
//! The vendor normally wraps its JSON array in a markdown code fence; the
//! fence is stripped here, server-side, so no caller ever deals with raw
//! model text.

use tracing::error;

use crate::errors::AppError;
use crate::interview::models::QuestionItem;
use crate::llm_client::strip_json_fences;

/// Parses raw model output into the question list.
pub fn parse_questions(raw: &str) -> Result<Vec<QuestionItem>, AppError> {
    let cleaned = strip_json_fences(raw);
    let questions: Vec<QuestionItem> = serde_json::from_str(cleaned).map_err(|e| {
        error!("Failed to parse generated questions: {e}; raw output: {raw}");
        AppError::Parse(format!("Generated questions are not valid JSON: {e}"))
    })?;

    if questions.is_empty() {
        return Err(AppError::Parse(
            "Generated question list is empty".to_string(),
        ));
    }
    Ok(questions)
}

/// Partitions questions by category. Categories appear in first-seen order;
/// question order within a category is preserved.
pub fn group_by_type(questions: &[QuestionItem]) -> Vec<(String, Vec<&QuestionItem>)> {
    let mut groups: Vec<(String, Vec<&QuestionItem>)> = Vec::new();
    for q in questions {
        match groups.iter_mut().find(|(t, _)| *t == q.question_type) {
            Some((_, members)) => members.push(q),
            None => groups.push((q.question_type.clone(), vec![q])),
        }
    }
    groups
}

/// Renders the grouped question list for the voice agent's system
/// instruction: a category header, a numbered list, a blank line between
/// categories.
pub fn render_question_list(questions: &[QuestionItem]) -> String {
    let blocks: Vec<String> = group_by_type(questions)
        .into_iter()
        .map(|(category, members)| {
            let mut block = format!("{category}:");
            for (i, q) in members.iter().enumerate() {
                block.push_str(&format!("\n{}. {}", i + 1, q.question));
            }
            block
        })
        .collect();
    blocks.join("\n\n")
}
