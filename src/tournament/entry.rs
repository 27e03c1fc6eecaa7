use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InningsScore, Match, MatchOutcome, TBD};
use crate::tournament::overs::validate_overs;
use crate::tournament::standings::ALL_OUT_WICKETS;

/// Which side of the fixture a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    TeamA,
    TeamB,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::TeamA => write!(f, "team A"),
            Side::TeamB => write!(f, "team B"),
        }
    }
}

/// Rejected result input
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("a match cannot be both a walkover and a no result")]
    ConflictingFlags,

    #[error("a walkover needs a winner")]
    MissingWinner,

    #[error("{winner} is not playing in match {match_id}")]
    WinnerNotParticipant { match_id: String, winner: String },

    #[error("match {0} still has an undecided participant")]
    UndeterminedParticipant(String),

    #[error("{side} {field} is required")]
    MissingField { side: Side, field: &'static str },

    #[error("{side} wickets must be between 0 and 10, got {wickets}")]
    InvalidWickets { side: Side, wickets: u32 },

    #[error("{side} overs {overs} is invalid (e.g. 17.4, balls 0-5, max 20)")]
    InvalidOvers { side: Side, overs: f64 },
}

/// Raw innings input, any field possibly missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InningsEntry {
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
    pub overs: Option<f64>,
}

impl InningsEntry {
    pub fn new(runs: u32, wickets: u32, overs: f64) -> Self {
        Self {
            runs: Some(runs),
            wickets: Some(wickets),
            overs: Some(overs),
        }
    }

    fn validate(&self, side: Side) -> Result<InningsScore, EntryError> {
        let runs = self.runs.ok_or(EntryError::MissingField {
            side,
            field: "runs",
        })?;
        let wickets = self.wickets.ok_or(EntryError::MissingField {
            side,
            field: "wickets",
        })?;
        let overs = self.overs.ok_or(EntryError::MissingField {
            side,
            field: "overs",
        })?;

        let wickets = u8::try_from(wickets)
            .ok()
            .filter(|w| *w <= ALL_OUT_WICKETS)
            .ok_or(EntryError::InvalidWickets { side, wickets })?;

        if !validate_overs(overs) {
            return Err(EntryError::InvalidOvers { side, overs });
        }

        Ok(InningsScore::new(runs, wickets, overs))
    }
}

/// Result form for one match; `apply` turns it into a full replacement record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub team_a: InningsEntry,
    pub team_b: InningsEntry,
    pub walkover: bool,
    pub no_result: bool,

    /// Only read for walkovers
    pub winner: Option<String>,
}

impl ResultEntry {
    pub fn scored(team_a: InningsEntry, team_b: InningsEntry) -> Self {
        Self {
            team_a,
            team_b,
            ..Default::default()
        }
    }

    pub fn walkover(winner: impl Into<String>) -> Self {
        Self {
            walkover: true,
            winner: Some(winner.into()),
            ..Default::default()
        }
    }

    pub fn no_result() -> Self {
        Self {
            no_result: true,
            ..Default::default()
        }
    }

    /// Pre-fill a form from an existing record
    pub fn from_match(m: &Match) -> Self {
        match &m.outcome {
            MatchOutcome::Unplayed => Self::default(),
            MatchOutcome::NoResult => Self::no_result(),
            MatchOutcome::Walkover { winner } => Self::walkover(winner.clone()),
            MatchOutcome::Played { team_a, team_b } => Self::scored(
                InningsEntry::new(team_a.runs, u32::from(team_a.wickets), team_a.overs),
                InningsEntry::new(team_b.runs, u32::from(team_b.wickets), team_b.overs),
            ),
        }
    }

    /// Validate the entry and build the replacement for `m`
    pub fn apply(&self, m: &Match) -> Result<Match, EntryError> {
        if self.walkover && self.no_result {
            return Err(EntryError::ConflictingFlags);
        }
        if m.team_a == TBD || m.team_b == TBD {
            return Err(EntryError::UndeterminedParticipant(m.id.clone()));
        }

        let outcome = if self.walkover {
            let winner = self.winner.clone().ok_or(EntryError::MissingWinner)?;
            if winner != m.team_a && winner != m.team_b {
                return Err(EntryError::WinnerNotParticipant {
                    match_id: m.id.clone(),
                    winner,
                });
            }
            MatchOutcome::Walkover { winner }
        } else if self.no_result {
            MatchOutcome::NoResult
        } else {
            MatchOutcome::Played {
                team_a: self.team_a.validate(Side::TeamA)?,
                team_b: self.team_b.validate(Side::TeamB)?,
            }
        };

        Ok(Match {
            outcome,
            ..m.clone()
        })
    }
}
