use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Screened,
    Shortlisted,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Screened => "screened",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "screened" => Some(CandidateStatus::Screened),
            "shortlisted" => Some(CandidateStatus::Shortlisted),
            "rejected" => Some(CandidateStatus::Rejected),
            _ => None,
        }
    }

    pub fn can_become(self, next: CandidateStatus) -> bool {
        use CandidateStatus::*;
        matches!(
            (self, next),
            (Screened, Shortlisted) | (Screened, Rejected) | (Shortlisted, Rejected)
        )
    }

    /// Returns `next` if the move is allowed, 422 otherwise.
    pub fn transition(self, next: CandidateStatus) -> Result<CandidateStatus, AppError> {
        if self.can_become(next) {
            Ok(next)
        } else {
            Err(AppError::UnprocessableEntity(format!(
                "Candidate cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }
}
