use anyhow::Result;
use sqlx::{PgExecutor, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::candidates::status::CandidateStatus;
use crate::matching::{MatchResult, SkillSet};
use crate::models::candidate::CandidateRow;

pub const DEFAULT_SHORTLIST_LIMIT: i64 = 20;
pub const MAX_SHORTLIST_LIMIT: i64 = 100;

/// Everything needed to record one resume's result against one job.
#[derive(Debug, Clone)]
pub struct NewCandidate<'a> {
    pub job_id: Uuid,
    pub resume_name: &'a str,
    pub resume_s3_key: &'a str,
    pub extracted_skills: &'a SkillSet,
    pub result: &'a MatchResult,
}

/// Takes any executor so a whole screening batch can share one transaction.
pub async fn insert_candidate<'e, E>(executor: E, candidate: &NewCandidate<'_>) -> Result<CandidateRow>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (id, job_id, resume_name, resume_s3_key, extracted_skills,
             match_percentage, matched_skills, missing_skills, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(candidate.job_id)
    .bind(candidate.resume_name)
    .bind(candidate.resume_s3_key)
    .bind(candidate.extracted_skills.as_slice())
    .bind(i16::from(candidate.result.match_percentage))
    .bind(candidate.result.matched_skills.as_slice())
    .bind(candidate.result.missing_skills.as_slice())
    .bind(CandidateStatus::Screened.as_str())
    .fetch_one(executor)
    .await?;

    info!(
        "Recorded candidate {} for job {} at {}%",
        row.id, row.job_id, row.match_percentage
    );
    Ok(row)
}

/// Best matches first; ties go to the earlier screening.
pub async fn list_top_for_job(pool: &PgPool, job_id: Uuid, limit: i64) -> Result<Vec<CandidateRow>> {
    Ok(sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT * FROM candidates
        WHERE job_id = $1
        ORDER BY match_percentage DESC, created_at ASC
        LIMIT $2
        "#,
    )
    .bind(job_id)
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>> {
    Ok(sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Moves `from` to `to` only if the row still holds `from`. `None` means the
/// row is gone or another request changed it first.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    from: CandidateStatus,
    to: CandidateStatus,
) -> Result<Option<CandidateRow>> {
    Ok(sqlx::query_as::<_, CandidateRow>(
        "UPDATE candidates SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
    )
    .bind(id)
    .bind(to.as_str())
    .bind(from.as_str())
    .fetch_optional(pool)
    .await?)
}

/// Missing or non-positive limits fall back to the default; large ones are capped.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(MAX_SHORTLIST_LIMIT),
        _ => DEFAULT_SHORTLIST_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_SHORTLIST_LIMIT);
        assert_eq!(clamp_limit(Some(0)), DEFAULT_SHORTLIST_LIMIT);
        assert_eq!(clamp_limit(Some(-5)), DEFAULT_SHORTLIST_LIMIT);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(10_000)), MAX_SHORTLIST_LIMIT);
    }
}
