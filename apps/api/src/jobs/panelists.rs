//! Interview rounds and their panelists. A job runs 1–3 rounds; each round has
//! at most one panelist contact.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_ROUNDS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelistError {
    #[error("round must be between 1 and 3, got {0}")]
    RoundOutOfRange(u8),

    #[error("round {round} exceeds number_of_rounds ({rounds})")]
    RoundBeyondJob { round: u8, rounds: u8 },

    #[error("round {0} has more than one panelist")]
    DuplicateRound(u8),

    #[error("panelist for round {0} needs a valid email")]
    InvalidEmail(u8),
}

/// A validated interview round number (1–3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoundNumber(u8);

impl RoundNumber {
    pub fn new(round: u8) -> Result<Self, PanelistError> {
        if (1..=MAX_ROUNDS).contains(&round) {
            Ok(Self(round))
        } else {
            Err(PanelistError::RoundOutOfRange(round))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RoundNumber {
    type Error = PanelistError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoundNumber> for u8 {
    fn from(value: RoundNumber) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPanelist {
    pub round: RoundNumber,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Validates panelists against the job's round count and returns them sorted
/// by round.
pub fn validate_panelists(
    number_of_rounds: RoundNumber,
    mut panelists: Vec<RoundPanelist>,
) -> Result<Vec<RoundPanelist>, PanelistError> {
    panelists.sort_by_key(|p| p.round);

    for (i, panelist) in panelists.iter().enumerate() {
        let round = panelist.round.get();
        if round > number_of_rounds.get() {
            return Err(PanelistError::RoundBeyondJob {
                round,
                rounds: number_of_rounds.get(),
            });
        }
        if i > 0 && panelists[i - 1].round == panelist.round {
            return Err(PanelistError::DuplicateRound(round));
        }
        if !looks_like_email(&panelist.email) {
            return Err(PanelistError::InvalidEmail(round));
        }
    }

    Ok(panelists)
}

pub(crate) fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
