use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::repository::InterviewRepository;
use crate::interviews::validation::{
    validate_interview, InterviewStatus, ScheduleInterviewRequest,
};
use crate::models::interview::InterviewRow;

pub async fn schedule_interview(
    repo: &dyn InterviewRepository,
    req: ScheduleInterviewRequest,
    created_by: &str,
) -> Result<InterviewRow, AppError> {
    let interview = validate_interview(req)?;
    Ok(repo.save(&interview, created_by).await?)
}

pub async fn interviews_on(
    repo: &dyn InterviewRepository,
    date: NaiveDate,
) -> Result<Vec<InterviewRow>, AppError> {
    Ok(repo.list_by_date(date).await?)
}

pub async fn change_interview_status(
    repo: &dyn InterviewRepository,
    id: Uuid,
    next: InterviewStatus,
) -> Result<InterviewRow, AppError> {
    let current = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    let from = stored_status(&current)?;
    let next = from.transition(next)?;

    if let Some(row) = repo.update_status(id, from, next).await? {
        return Ok(row);
    }

    // Another request changed the row between the read and the write.
    match repo.get(id).await? {
        None => Err(AppError::NotFound(format!("Interview {id} not found"))),
        Some(latest) => {
            let latest = stored_status(&latest)?;
            latest.transition(next)?;
            Err(AppError::UnprocessableEntity(format!(
                "Interview {id} changed to {} while updating",
                latest.as_str()
            )))
        }
    }
}

fn stored_status(row: &InterviewRow) -> Result<InterviewStatus, AppError> {
    InterviewStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "interview {} has unknown status '{}'",
            row.id,
            row.status
        ))
    })
}
