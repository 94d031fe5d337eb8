// LLM prompt constants for transcript evaluation.

/// Evaluation prompt template. Replace `{transcript}` before sending.
/// The model is instructed to answer with a bare JSON object; output is
/// parsed directly, with no fence stripping.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an AI interview evaluator. Analyze the following transcript and provide a JSON response with:

- communication (1-10)
- confidence (1-10)
- technicalKnowledge (1-10)
- collaboration (1-10)
- hirePercentage (0-100): estimated chance of being hired
- suggestion (70 words max): brief advice for improvement

Respond only with a valid JSON object like:
{
  "communication": 8,
  "confidence": 7,
  "technicalKnowledge": 9,
  "collaboration": 6,
  "hirePercentage": 85,
  "suggestion": "You demonstrated good knowledge and communication. To improve further, work on giving more structured answers and showing stronger confidence when discussing your projects. Keep practicing mock interviews and refine how you present yourself."
}

Transcript:
"""
{transcript}
"""
"#;

/// Builds the evaluation prompt for a formatted transcript.
pub fn build_feedback_prompt(transcript: &str) -> String {
    FEEDBACK_PROMPT_TEMPLATE.replace("{transcript}", transcript)
}
