//! Skill extraction backends that turn resume text into a SkillSet.
//!
//! Default: `KeywordSkillExtractor` (pure-Rust, deterministic, no network).
//! Alternative: `LlmSkillExtractor` (Claude via `llm_client`).
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`, chosen at startup via
//! `SKILL_EXTRACTOR` and wrapped by the Redis cache.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::SkillSet;
use crate::screening::prompts::{build_skill_extract_prompt, skill_extract_system};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported resume format '{0}' (expected PDF or plain text)")]
    UnsupportedFormat(String),

    #[error("resume contains no readable text")]
    EmptyDocument,

    #[error("resume is not valid UTF-8 text")]
    Encoding,

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("skill extraction via LLM failed: {0}")]
    Llm(#[from] LlmError),

    #[error("screening task failed: {0}")]
    Task(String),
}

/// Implement this to swap extraction backends without touching the
/// orchestrator or handlers.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    /// `hints` are skills the caller cares about (the required skills of the
    /// jobs being screened). Backends should report them in the hint's
    /// spelling when found.
    async fn extract_skills(&self, text: &str, hints: &SkillSet) -> Result<SkillSet, ExtractionError>;

    /// Short backend label, used for logging and cache keys.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Common skills recognized even when no job asks for them.
const DEFAULT_VOCABULARY: &[&str] = &[
    // languages
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Golang", "Rust", "Ruby",
    "PHP", "Swift", "Kotlin", "Scala", "SQL", "HTML", "CSS", "Bash",
    // frameworks & runtimes
    "React", "Angular", "Vue.js", "Next.js", "Node.js", "Express", "Django", "Flask",
    "FastAPI", "Spring Boot", "Ruby on Rails", ".NET", "TensorFlow", "PyTorch", "Redux",
    "Tailwind CSS",
    // data & infra
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "Kafka", "RabbitMQ",
    "Docker", "Kubernetes", "Terraform", "AWS", "Azure", "GCP", "Firebase", "Git",
    "GraphQL", "REST", "CI/CD", "Linux",
    // design & process
    "Figma", "Adobe XD", "Sketch", "UI Design", "User Research", "Prototyping",
    "Agile", "Scrum",
];

/// Deterministic extractor: a skill is present when its name appears in the
/// text as a whole token sequence, ignoring case. Returns canonical spellings
/// (hint spelling first, then vocabulary spelling).
pub struct KeywordSkillExtractor {
    vocabulary: SkillSet,
}

impl KeywordSkillExtractor {
    pub fn new() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().copied().collect(),
        }
    }
}

impl Default for KeywordSkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    async fn extract_skills(&self, text: &str, hints: &SkillSet) -> Result<SkillSet, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        Ok(scan_for_skills(text, &hints.union(&self.vocabulary)))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn scan_for_skills(text: &str, terms: &SkillSet) -> SkillSet {
    let haystack = text.to_lowercase();
    let mut found = SkillSet::new();
    // Case variants ("React" hint vs "react" vocabulary) collapse onto the
    // first spelling seen, which is the hint's.
    let mut seen_lower: Vec<String> = Vec::new();

    for term in terms.iter() {
        let needle = term.to_lowercase();
        if seen_lower.contains(&needle) {
            continue;
        }
        if contains_term(&haystack, &needle) {
            seen_lower.push(needle);
            found.insert(term);
        }
    }
    found
}

/// True if `needle` occurs in `haystack` with no word character directly
/// before or after it. Both inputs must already be lowercased.
fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();

        let before_ok = haystack[..begin].chars().next_back().map_or(true, |c| !is_word(c));
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !is_word(c));
        if before_ok && after_ok {
            return true;
        }

        // advance by one char past this occurrence's start
        start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSkillExtractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExtractedSkills {
    skills: Vec<String>,
}

/// Semantic extractor via Claude. Output is trimmed and de-duplicated;
/// blank entries are dropped.
pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract_skills(&self, text: &str, hints: &SkillSet) -> Result<SkillSet, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let prompt = build_skill_extract_prompt(text, hints.as_slice());
        let extracted: ExtractedSkills = self.0.call_json(&prompt, &skill_extract_system()).await?;

        Ok(clean_llm_skills(extracted.skills))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn clean_llm_skills(raw: Vec<String>) -> SkillSet {
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
