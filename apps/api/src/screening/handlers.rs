//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::candidates::repository::{insert_candidate, NewCandidate};
use crate::errors::AppError;
use crate::jobs::repository as jobs_repo;
use crate::matching::{compute_matches_for_all_jobs, JobRequirements, MatchResult, SkillSet};
use crate::models::job::JobRow;
use crate::screening::document::ResumeFile;
use crate::screening::orchestrator::{screen_resumes, ResumeScreening, ScreeningOutcome};
use crate::screening::storage::upload_resume;
use crate::state::AppState;

/// Body of POST /api/v1/screening/match. Stored jobs (by id) are matched
/// first, in the order given, followed by any inline jobs.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate_skills: SkillSet,
    #[serde(default)]
    pub job_ids: Vec<Uuid>,
    #[serde(default)]
    pub jobs: Vec<JobRequirements>,
}

/// Loads stored jobs in the requested order; any unknown id is a 404 and any
/// job the caller does not own is a 403.
async fn load_jobs(state: &AppState, user: &AuthedUser, ids: &[Uuid]) -> Result<Vec<JobRow>, AppError> {
    let (rows, missing) = jobs_repo::get_jobs_in_order(&state.db, ids).await?;
    if let Some(id) = missing.first() {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    ensure_jobs_owned(user, &rows)?;
    Ok(rows)
}

fn ensure_jobs_owned(user: &AuthedUser, jobs: &[JobRow]) -> Result<(), AppError> {
    for job in jobs {
        if let Err(e) = user.require_owner(&job.recruiter_id) {
            warn!(user = %user.id, job = %job.id, "Rejected access to another recruiter's job");
            return Err(e);
        }
    }
    Ok(())
}

fn combine_requirements(
    stored: &[JobRow],
    inline: Vec<JobRequirements>,
) -> Result<Vec<JobRequirements>, AppError> {
    let mut jobs: Vec<JobRequirements> = stored.iter().map(JobRow::requirements).collect();
    jobs.extend(inline);
    if jobs.is_empty() {
        return Err(AppError::Validation(
            "Provide at least one job id or inline job".into(),
        ));
    }
    Ok(jobs)
}

/// POST /api/v1/screening/match
pub async fn handle_match(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(req): Json<MatchRequest>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    let stored = if req.job_ids.is_empty() {
        Vec::new()
    } else {
        load_jobs(&state, &user, &req.job_ids).await?
    };
    let jobs = combine_requirements(&stored, req.jobs)?;
    Ok(Json(compute_matches_for_all_jobs(&req.candidate_skills, &jobs)))
}

fn parse_job_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("Invalid job_id '{raw}'")))
}

struct ResumeUpload {
    job_ids: Vec<Uuid>,
    files: Vec<ResumeFile>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload {
        job_ids: Vec::new(),
        files: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("job_id") => {
                let raw = field.text().await?;
                upload.job_ids.push(parse_job_id(&raw)?);
            }
            Some("resume") => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("resume-{}", upload.files.len() + 1));
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                upload.files.push(ResumeFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    if upload.files.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one file in the 'resume' field".into(),
        ));
    }
    Ok(upload)
}

/// Pairs every screened file that was stored under a key with each job it was
/// matched against. Failed or unstored files produce no rows.
fn candidate_rows<'a>(
    results: &'a [ResumeScreening],
    keys: &'a [Option<String>],
    jobs: &[JobRow],
) -> Vec<NewCandidate<'a>> {
    let mut rows = Vec::new();
    for (screening, key) in results.iter().zip(keys) {
        let (
            ScreeningOutcome::Screened {
                extracted_skills,
                matches,
            },
            Some(key),
        ) = (&screening.outcome, key)
        else {
            continue;
        };
        for (job, result) in jobs.iter().zip(matches) {
            rows.push(NewCandidate {
                job_id: job.id,
                resume_name: &screening.file_name,
                resume_s3_key: key,
                extracted_skills,
                result,
            });
        }
    }
    rows
}

/// POST /api/v1/screening/resumes
///
/// Screens each uploaded resume against the named jobs, or against all of
/// the caller's jobs when none are named. Screened files are then stored in
/// S3; a file that cannot be stored is reported as failed. Candidate rows for
/// the batch are written in one transaction.
pub async fn handle_screen_resumes(
    State(state): State<AppState>,
    user: AuthedUser,
    multipart: Multipart,
) -> Result<Json<Vec<ResumeScreening>>, AppError> {
    user.require_recruiter()?;
    let upload = read_upload(multipart).await?;

    let job_rows = if upload.job_ids.is_empty() {
        jobs_repo::list_jobs_for_recruiter(&state.db, &user.id).await?
    } else {
        load_jobs(&state, &user, &upload.job_ids).await?
    };
    if job_rows.is_empty() {
        return Err(AppError::Validation(
            "No jobs to screen against; create a job first".into(),
        ));
    }

    let requirements = Arc::new(job_rows.iter().map(JobRow::requirements).collect::<Vec<_>>());
    let mut results = screen_resumes(
        Arc::clone(&state.skill_extractor),
        upload.files.clone(),
        requirements,
    )
    .await;

    let mut s3_keys = Vec::with_capacity(results.len());
    for (screening, file) in results.iter_mut().zip(&upload.files) {
        if !screening.is_screened() {
            s3_keys.push(None);
            continue;
        }
        match upload_resume(&state.s3, &state.config.s3_bucket, file).await {
            Ok(key) => s3_keys.push(Some(key)),
            Err(e) => {
                warn!(file = %screening.file_name, "Resume upload failed: {e:#}");
                screening.mark_failed(format!("could not store resume: {e}"));
                s3_keys.push(None);
            }
        }
    }

    let rows = candidate_rows(&results, &s3_keys, &job_rows);
    let mut tx = state.db.begin().await?;
    for candidate in &rows {
        insert_candidate(&mut *tx, candidate).await?;
    }
    tx.commit().await?;

    info!(
        "Screened {} resume(s) for {}; stored {} candidate row(s)",
        results.len(),
        user.id,
        rows.len()
    );
    Ok(Json(results))
}
