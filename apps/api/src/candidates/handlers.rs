//! Axum route handlers for the candidate shortlist.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::candidates::repository;
use crate::candidates::status::CandidateStatus;
use crate::errors::AppError;
use crate::jobs::handlers::load_owned_job;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShortlistQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateStatusUpdate {
    pub status: CandidateStatus,
}

fn stored_status(row: &CandidateRow) -> Result<CandidateStatus, AppError> {
    CandidateStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "candidate {} has unknown status '{}'",
            row.id,
            row.status
        ))
    })
}

/// GET /api/v1/jobs/:id/candidates?limit=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(job_id): Path<Uuid>,
    query: Result<Query<ShortlistQuery>, QueryRejection>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    user.require_recruiter()?;
    let Query(params) = query?;
    load_owned_job(&state, &user, job_id).await?;

    let limit = repository::clamp_limit(params.limit);
    let rows = repository::list_top_for_job(&state.db, job_id, limit).await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/candidates/:id/status
pub async fn handle_update_candidate_status(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(update): Json<CandidateStatusUpdate>,
) -> Result<Json<CandidateRow>, AppError> {
    user.require_recruiter()?;
    let current = repository::get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    load_owned_job(&state, &user, current.job_id).await?;

    let from = stored_status(&current)?;
    let next = from.transition(update.status)?;

    if let Some(row) = repository::update_status(&state.db, id, from, next).await? {
        return Ok(Json(row));
    }

    let latest = repository::get_candidate(&state.db, id).await?;
    Err(lost_update(id, latest.as_ref(), next))
}

/// The error for a conditional update that matched no row: 404 if the row
/// is gone, otherwise 422 naming the status another request left behind.
fn lost_update(id: Uuid, latest: Option<&CandidateRow>, next: CandidateStatus) -> AppError {
    let Some(row) = latest else {
        return AppError::NotFound(format!("Candidate {id} not found"));
    };
    match stored_status(row) {
        Ok(current) => match current.transition(next) {
            Err(e) => e,
            Ok(_) => AppError::UnprocessableEntity(format!(
                "Candidate {id} changed to {} while updating",
                current.as_str()
            )),
        },
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate(status: &str) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            resume_name: "cv.pdf".to_string(),
            resume_s3_key: "resumes/2026/10/k-cv.pdf".to_string(),
            extracted_skills: vec!["Rust".to_string()],
            match_percentage: 100,
            matched_skills: vec!["Rust".to_string()],
            missing_skills: vec![],
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_lost_update_on_deleted_row_is_not_found() {
        let err = lost_update(Uuid::new_v4(), None, CandidateStatus::Shortlisted);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_lost_update_after_concurrent_rejection_is_unprocessable() {
        // Both requests read "screened"; the rejection landed first.
        let row = candidate("rejected");
        let err = lost_update(row.id, Some(&row), CandidateStatus::Shortlisted);
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_lost_update_with_corrupt_status_is_internal() {
        let row = candidate("archived");
        let err = lost_update(row.id, Some(&row), CandidateStatus::Shortlisted);
        assert!(matches!(err, AppError::Internal(_)));
    }
}
