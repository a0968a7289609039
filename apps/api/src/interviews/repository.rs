//! Interview storage behind a trait, so handlers can be exercised without
//! PostgreSQL.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::interviews::validation::{InterviewStatus, NewInterview};
use crate::models::interview::InterviewRow;

#[async_trait]
pub trait InterviewRepository: Send + Sync {
    async fn save(&self, interview: &NewInterview, created_by: &str) -> Result<InterviewRow>;

    /// Interviews on `date`, earliest first.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<InterviewRow>>;

    async fn get(&self, id: Uuid) -> Result<Option<InterviewRow>>;

    /// Moves the interview from `from` to `to` only if it still holds
    /// `from`. `None` means it is gone or was changed by someone else first.
    async fn update_status(
        &self,
        id: Uuid,
        from: InterviewStatus,
        to: InterviewStatus,
    ) -> Result<Option<InterviewRow>>;
}

pub struct PgInterviewRepository {
    pool: PgPool,
}

impl PgInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PgInterviewRepository {
    async fn save(&self, interview: &NewInterview, created_by: &str) -> Result<InterviewRow> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (id, candidate_name, position, interview_date, interview_time,
                 interviewer_name, notes, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&interview.candidate_name)
        .bind(&interview.position)
        .bind(interview.interview_date)
        .bind(interview.interview_time)
        .bind(&interview.interviewer_name)
        .bind(&interview.notes)
        .bind(InterviewStatus::Scheduled.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Scheduled interview {} for '{}' on {} {}",
            row.id, row.candidate_name, row.interview_date, row.interview_time
        );
        Ok(row)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<InterviewRow>> {
        Ok(sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE interview_date = $1 ORDER BY interview_time ASC, created_at ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<InterviewRow>> {
        Ok(sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: InterviewStatus,
        to: InterviewStatus,
    ) -> Result<Option<InterviewRow>> {
        Ok(sqlx::query_as::<_, InterviewRow>(
            "UPDATE interviews SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(to.as_str())
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryInterviewRepository {
        rows: Mutex<Vec<InterviewRow>>,
    }

    #[async_trait]
    impl InterviewRepository for InMemoryInterviewRepository {
        async fn save(&self, interview: &NewInterview, created_by: &str) -> Result<InterviewRow> {
            let row = InterviewRow {
                id: Uuid::new_v4(),
                candidate_name: interview.candidate_name.clone(),
                position: interview.position.clone(),
                interview_date: interview.interview_date,
                interview_time: interview.interview_time,
                interviewer_name: interview.interviewer_name.clone(),
                notes: interview.notes.clone(),
                status: InterviewStatus::Scheduled.as_str().to_string(),
                created_by: created_by.to_string(),
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<InterviewRow>> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.interview_date == date)
                .cloned()
                .collect();
            rows.sort_by_key(|r| r.interview_time);
            Ok(rows)
        }

        async fn get(&self, id: Uuid) -> Result<Option<InterviewRow>> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn update_status(
            &self,
            id: Uuid,
            from: InterviewStatus,
            to: InterviewStatus,
        ) -> Result<Option<InterviewRow>> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows
                .iter_mut()
                .find(|r| r.id == id && r.status == from.as_str())
                .map(|r| {
                    r.status = to.as_str().to_string();
                    r.clone()
                }))
        }
    }
}
