use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::jobs::panelists::RoundPanelist;
use crate::matching::{JobRequirements, SkillSet};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_id: String,
    pub recruiter_email: String,
    pub title: String,
    pub description: String,
    pub experience: String,
    pub skill_set: Vec<String>,
    pub notice_period: Option<String>,
    pub technical_knowledge: Vec<String>,
    pub attitude_required: Option<String>,
    pub number_of_rounds: i16,
    pub panelists: Json<Vec<RoundPanelist>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    /// The matcher's view of this job. Stored skill sets were validated on
    /// write, so collection here only guards against legacy duplicates.
    pub fn requirements(&self) -> JobRequirements {
        JobRequirements {
            title: self.title.clone(),
            required_skills: self.skill_set.iter().cloned().collect::<SkillSet>(),
        }
    }
}
