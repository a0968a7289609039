use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub resume_name: String,
    pub resume_s3_key: String,
    pub extracted_skills: Vec<String>,
    pub match_percentage: i16,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
