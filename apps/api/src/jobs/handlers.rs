//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::jobs::repository;
use crate::jobs::validation::{validate_job, JobInput};
use crate::models::job::JobRow;
use crate::state::AppState;

/// Loads a job and checks the caller may change it (its recruiter or an admin).
pub(crate) async fn load_owned_job(state: &AppState, user: &AuthedUser, id: Uuid) -> Result<JobRow, AppError> {
    let job = repository::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    user.require_owner(&job.recruiter_id)?;
    Ok(job)
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    user.require_recruiter()?;
    let job = validate_job(input, &user.email)?;
    let row = repository::insert_job(&state.db, &user.id, &job).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs
///
/// Recruiters see their own postings; admins see every posting.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    user: AuthedUser,
) -> Result<Json<Vec<JobRow>>, AppError> {
    user.require_recruiter()?;
    let jobs = if user.is_admin() {
        repository::list_all_jobs(&state.db).await?
    } else {
        repository::list_jobs_for_recruiter(&state.db, &user.id).await?
    };
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = repository::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobRow>, AppError> {
    user.require_recruiter()?;
    let existing = load_owned_job(&state, &user, id).await?;
    let job = validate_job(input, &existing.recruiter_email)?;

    let row = repository::update_job(&state.db, id, &job)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_recruiter()?;
    load_owned_job(&state, &user, id).await?;

    if !repository::delete_job(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
