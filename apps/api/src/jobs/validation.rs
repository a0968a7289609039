//! Job form validation. A posting needs a title, description, experience
//! range, at least one required skill and a reachable recruiter email.

use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::panelists::{looks_like_email, validate_panelists, RoundNumber, RoundPanelist};
use crate::matching::SkillSet;

/// Skills may arrive as a JSON array or as the comma-separated string the
/// job form produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillSetInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillSetInput {
    fn into_skill_set(self) -> Result<SkillSet, AppError> {
        let set = match self {
            SkillSetInput::List(items) => {
                SkillSet::try_from_vec(items.into_iter().map(|s| s.trim().to_string()).collect())?
            }
            SkillSetInput::Csv(raw) => SkillSet::parse_csv(&raw)?,
        };
        Ok(set)
    }
}

fn default_rounds() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub experience: String,
    pub skill_set: SkillSetInput,
    /// Defaults to the caller's email.
    pub recruiter_email: Option<String>,
    pub notice_period: Option<String>,
    #[serde(default)]
    pub technical_knowledge: Vec<String>,
    pub attitude_required: Option<String>,
    #[serde(default = "default_rounds")]
    pub number_of_rounds: u8,
    #[serde(default)]
    pub panelists: Vec<RoundPanelist>,
}

/// A job ready to be written: every field checked, panelists sorted.
#[derive(Debug, Clone)]
pub struct ValidatedJob {
    pub title: String,
    pub description: String,
    pub experience: String,
    pub skill_set: SkillSet,
    pub recruiter_email: String,
    pub notice_period: Option<String>,
    pub technical_knowledge: Vec<String>,
    pub attitude_required: Option<String>,
    pub number_of_rounds: RoundNumber,
    pub panelists: Vec<RoundPanelist>,
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_job(input: JobInput, caller_email: &str) -> Result<ValidatedJob, AppError> {
    let title = required("title", input.title)?;
    let description = required("description", input.description)?;
    let experience = required("experience", input.experience)?;

    let skill_set = input.skill_set.into_skill_set()?;
    if skill_set.is_empty() {
        return Err(AppError::Validation(
            "skill_set must list at least one required skill".to_string(),
        ));
    }

    let recruiter_email = optional(input.recruiter_email).unwrap_or_else(|| caller_email.to_string());
    if !looks_like_email(&recruiter_email) {
        return Err(AppError::Validation(format!(
            "recruiter_email '{recruiter_email}' is not a valid email"
        )));
    }

    let number_of_rounds = RoundNumber::new(input.number_of_rounds)?;
    let panelists = validate_panelists(number_of_rounds, input.panelists)?;

    let technical_knowledge = input
        .technical_knowledge
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(ValidatedJob {
        title,
        description,
        experience,
        skill_set,
        recruiter_email,
        notice_period: optional(input.notice_period),
        technical_knowledge,
        attitude_required: optional(input.attitude_required),
        number_of_rounds,
        panelists,
    })
}
