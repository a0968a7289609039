use std::collections::HashSet;

use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::jobs::validation::ValidatedJob;
use crate::models::job::JobRow;

pub async fn insert_job(pool: &PgPool, recruiter_id: &str, job: &ValidatedJob) -> Result<JobRow> {
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, recruiter_id, recruiter_email, title, description, experience, skill_set,
             notice_period, technical_knowledge, attitude_required, number_of_rounds, panelists)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(recruiter_id)
    .bind(&job.recruiter_email)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.experience)
    .bind(job.skill_set.as_slice())
    .bind(&job.notice_period)
    .bind(&job.technical_knowledge)
    .bind(&job.attitude_required)
    .bind(i16::from(job.number_of_rounds.get()))
    .bind(Json(&job.panelists))
    .fetch_one(pool)
    .await?;

    info!("Created job {id} ('{}') for recruiter {recruiter_id}", row.title);
    Ok(row)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>> {
    Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Jobs posted by one recruiter, oldest first (the order they appear on the
/// dashboard).
pub async fn list_jobs_for_recruiter(pool: &PgPool, recruiter_id: &str) -> Result<Vec<JobRow>> {
    Ok(sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE recruiter_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(recruiter_id)
    .fetch_all(pool)
    .await?)
}

pub async fn list_all_jobs(pool: &PgPool) -> Result<Vec<JobRow>> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at ASC, id ASC")
            .fetch_all(pool)
            .await?,
    )
}

/// Fetches jobs by id and returns them in the order the ids were given.
/// Unknown ids are reported back so the caller can 404.
pub async fn get_jobs_in_order(pool: &PgPool, ids: &[Uuid]) -> Result<(Vec<JobRow>, Vec<Uuid>)> {
    let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(order_by_ids(rows, ids))
}

pub async fn update_job(pool: &PgPool, id: Uuid, job: &ValidatedJob) -> Result<Option<JobRow>> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            recruiter_email = $2, title = $3, description = $4, experience = $5,
            skill_set = $6, notice_period = $7, technical_knowledge = $8,
            attitude_required = $9, number_of_rounds = $10, panelists = $11,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&job.recruiter_email)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.experience)
    .bind(job.skill_set.as_slice())
    .bind(&job.notice_period)
    .bind(&job.technical_knowledge)
    .bind(&job.attitude_required)
    .bind(i16::from(job.number_of_rounds.get()))
    .bind(Json(&job.panelists))
    .fetch_optional(pool)
    .await?;

    if row.is_some() {
        info!("Updated job {id}");
    }
    Ok(row)
}

pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Repeated ids collapse onto their first occurrence.
fn order_by_ids(rows: Vec<JobRow>, ids: &[Uuid]) -> (Vec<JobRow>, Vec<Uuid>) {
    let mut ordered = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            continue;
        }
        match rows.iter().find(|r| r.id == *id) {
            Some(row) => ordered.push(row.clone()),
            None => missing.push(*id),
        }
    }
    (ordered, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(id: Uuid, title: &str) -> JobRow {
        JobRow {
            id,
            recruiter_id: "r-1".to_string(),
            recruiter_email: "r@company.com".to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            experience: "2-4 years".to_string(),
            skill_set: vec!["Rust".to_string()],
            notice_period: None,
            technical_knowledge: vec![],
            attitude_required: None,
            number_of_rounds: 1,
            panelists: Json(vec![]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_by_ids_follows_request_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let rows = vec![row(a, "A"), row(b, "B"), row(c, "C")];

        let (ordered, missing) = order_by_ids(rows, &[c, a]);
        let titles: Vec<_> = ordered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A"]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_order_by_ids_reports_missing() {
        let a = Uuid::new_v4();
        let ghost = Uuid::new_v4();
        let (ordered, missing) = order_by_ids(vec![row(a, "A")], &[ghost, a]);
        assert_eq!(ordered.len(), 1);
        assert_eq!(missing, vec![ghost]);
    }

    #[test]
    fn test_order_by_ids_collapses_repeated_ids() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let ghost = Uuid::new_v4();
        let rows = vec![row(a, "A"), row(b, "B")];

        let (ordered, missing) = order_by_ids(rows, &[b, a, b, ghost, a, ghost]);
        let titles: Vec<_> = ordered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert_eq!(missing, vec![ghost]);
    }

    #[test]
    fn test_requirements_view_uses_title_and_skills() {
        let mut job = row(Uuid::new_v4(), "Backend Dev");
        job.skill_set = vec!["Rust".into(), "PostgreSQL".into(), "Rust".into()];
        let req = job.requirements();
        assert_eq!(req.title, "Backend Dev");
        assert_eq!(req.required_skills.len(), 2);
    }
}
