// LLM prompt constants for resume skill extraction.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona prepended to the shared JSON-only system rules.
const SKILL_EXTRACT_PERSONA: &str = "You are an experienced technical recruiter. \
    You read resumes and list the concrete skills a candidate demonstrably has.";

pub fn skill_extract_system() -> String {
    format!("{SKILL_EXTRACT_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Skill extraction prompt template. Replace `{hints}` and `{resume_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the skills this candidate has from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["JavaScript", "React", "PostgreSQL"]
}

Rules:
- List each skill once.
- Only include skills the resume actually supports. Do NOT guess.
- When a skill matches one of the REFERENCE SKILLS below, copy its spelling
  exactly (including capitalization and punctuation).
- Prefer short canonical names ("Node.js", not "experience with Node.js").

REFERENCE SKILLS:
{hints}

RESUME:
{resume_text}"#;

pub fn build_skill_extract_prompt(resume_text: &str, hints: &[String]) -> String {
    let hints = if hints.is_empty() {
        "(none)".to_string()
    } else {
        hints.join(", ")
    };
    SKILL_EXTRACT_PROMPT_TEMPLATE
        .replace("{hints}", &hints)
        .replace("{resume_text}", resume_text)
}
