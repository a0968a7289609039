//! Axum route handlers for interview scheduling.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthedUser, Role};
use crate::errors::AppError;
use crate::interviews::service;
use crate::interviews::validation::{parse_date, InterviewStatus, ScheduleInterviewRequest};
use crate::models::interview::InterviewRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Turns the `date` query parameter into a day, reporting a missing or
/// unreadable value through the usual error envelope.
fn requested_date(query: Result<Query<DateQuery>, QueryRejection>) -> Result<NaiveDate, AppError> {
    let Query(params) = query?;
    let raw = params.date.ok_or_else(|| {
        AppError::Validation("date query parameter is required (YYYY-MM-DD)".into())
    })?;
    parse_date(&raw)
}

#[derive(Debug, Deserialize)]
pub struct InterviewStatusUpdate {
    pub status: InterviewStatus,
}

/// POST /api/v1/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(req): Json<ScheduleInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    user.require_recruiter()?;
    let row = service::schedule_interview(state.interviews.as_ref(), req, &user.id).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interviews?date=YYYY-MM-DD
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    _user: AuthedUser,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let date = requested_date(query)?;
    let rows = service::interviews_on(state.interviews.as_ref(), date).await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/interviews/:id/status
pub async fn handle_update_interview_status(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(update): Json<InterviewStatusUpdate>,
) -> Result<Json<InterviewRow>, AppError> {
    user.require_any(&[Role::Recruiter, Role::Interviewer])?;
    let row = service::change_interview_status(state.interviews.as_ref(), id, update.status).await?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn date_from(uri: &str) -> Result<NaiveDate, AppError> {
        let uri: Uri = uri.parse().unwrap();
        requested_date(Query::<DateQuery>::try_from_uri(&uri))
    }

    #[test]
    fn test_requested_date_parses_day() {
        assert_eq!(
            date_from("/api/v1/interviews?date=2024-05-14").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
        );
    }

    #[test]
    fn test_missing_date_is_validation_error() {
        match date_from("/api/v1/interviews") {
            Err(AppError::Validation(msg)) => assert!(msg.contains("date")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_date_is_validation_error() {
        assert!(matches!(
            date_from("/api/v1/interviews?date=14-05-2024"),
            Err(AppError::Validation(_))
        ));
    }
}
