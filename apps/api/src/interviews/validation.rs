use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(InterviewStatus::Scheduled),
            "completed" => Some(InterviewStatus::Completed),
            "cancelled" => Some(InterviewStatus::Cancelled),
            _ => None,
        }
    }

    /// Only a scheduled interview can change, and only to a final state.
    pub fn transition(self, next: InterviewStatus) -> Result<InterviewStatus, AppError> {
        match (self, next) {
            (InterviewStatus::Scheduled, InterviewStatus::Completed)
            | (InterviewStatus::Scheduled, InterviewStatus::Cancelled) => Ok(next),
            _ => Err(AppError::UnprocessableEntity(format!(
                "Interview cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            ))),
        }
    }
}

/// Body of POST /api/v1/interviews. Date and time arrive as strings so a bad
/// value is reported as a 400 with the field name.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInterviewRequest {
    pub candidate_name: String,
    pub position: String,
    pub interview_date: String,
    pub interview_time: String,
    pub interviewer_name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInterview {
    pub candidate_name: String,
    pub position: String,
    pub interview_date: NaiveDate,
    pub interview_time: NaiveTime,
    pub interviewer_name: String,
    pub notes: Option<String>,
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Accepts `HH:MM` (what a time picker sends) and `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("invalid time '{raw}', expected HH:MM")))
}

pub fn validate_interview(req: ScheduleInterviewRequest) -> Result<NewInterview, AppError> {
    let interview_date = parse_date(&req.interview_date)?;
    let interview_time = parse_time(&req.interview_time)?;

    Ok(NewInterview {
        candidate_name: required("candidate_name", req.candidate_name)?,
        position: required("position", req.position)?,
        interview_date,
        interview_time,
        interviewer_name: required("interviewer_name", req.interviewer_name)?,
        notes: req
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ScheduleInterviewRequest {
        ScheduleInterviewRequest {
            candidate_name: "Jane Smith".into(),
            position: "UI Designer".into(),
            interview_date: "2024-05-14".into(),
            interview_time: "14:30".into(),
            interviewer_name: "Sam Lee".into(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let interview = validate_interview(request()).unwrap();
        assert_eq!(interview.interview_date, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
        assert_eq!(interview.interview_time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(interview.notes, None);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut req = request();
        req.interviewer_name = "  ".into();
        let err = validate_interview(req).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("interviewer_name")));

        let mut req = request();
        req.candidate_name = String::new();
        assert!(validate_interview(req).is_err());
    }

    #[test]
    fn test_bad_date_and_time_rejected() {
        let mut req = request();
        req.interview_date = "14/05/2024".into();
        assert!(validate_interview(req).is_err());

        let mut req = request();
        req.interview_time = "25:00".into();
        assert!(validate_interview(req).is_err());
    }

    #[test]
    fn test_time_with_seconds_accepted() {
        assert_eq!(
            parse_time("09:05:30").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 30).unwrap()
        );
    }

    #[test]
    fn test_blank_notes_become_none() {
        let mut req = request();
        req.notes = Some("   ".into());
        assert_eq!(validate_interview(req).unwrap().notes, None);

        let mut req = request();
        req.notes = Some(" bring portfolio ".into());
        assert_eq!(
            validate_interview(req).unwrap().notes.as_deref(),
            Some("bring portfolio")
        );
    }

    #[test]
    fn test_status_transitions() {
        use InterviewStatus::*;
        assert_eq!(Scheduled.transition(Completed).unwrap(), Completed);
        assert_eq!(Scheduled.transition(Cancelled).unwrap(), Cancelled);
        assert!(Scheduled.transition(Scheduled).is_err());
        assert!(Completed.transition(Cancelled).is_err());
        assert!(matches!(
            Cancelled.transition(Scheduled),
            Err(AppError::UnprocessableEntity(_))
        ));
    }
}
