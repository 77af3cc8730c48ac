// Prompts for the LLM grammar source. The rule engine never calls the LLM;
// only `llm_source` builds these.

use crate::analysis::models::WritingMode;

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a meticulous copy editor. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const ISSUE_SHAPE: &str = r#"{
  "issues": [
    {
      "type": "grammar",
      "severity": "low | medium | high",
      "message": "short description of the problem",
      "explanation": "optional longer explanation",
      "original_text": "exact text copied from the document",
      "suggestion_text": "replacement text",
      "start_index": 0,
      "end_index": 0
    }
  ]
}"#;

/// Builds the grammar-check prompt for one document.
///
/// Offsets are requested as character offsets, but the model is not trusted
/// with them: every returned issue is re-clamped and re-extracted downstream.
pub fn grammar_check_prompt(document: &str, mode: &WritingMode) -> String {
    let register = match mode {
        WritingMode::General => "general writing".to_string(),
        WritingMode::AcademicStandard => "academic writing".to_string(),
        WritingMode::AcademicResearch => "a research paper".to_string(),
        WritingMode::Email(ctx) => format!(
            "an email to a {} about {} that should sound {}",
            ctx.recipient_type, ctx.purpose, ctx.required_tone
        ),
    };

    format!(
        "Find grammar mistakes in the document below, which is {register}. \
        Report only genuine grammatical errors; ignore style preferences. \
        Copy `original_text` exactly as it appears. \
        `start_index` and `end_index` are character offsets, end exclusive. \
        Return at most 20 issues. If there are none, return {{\"issues\": []}}.\n\n\
        Respond in this exact JSON shape:\n{ISSUE_SHAPE}\n\n\
        DOCUMENT:\n<<<\n{document}\n>>>"
    )
}
