use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One side's innings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InningsScore {
    pub runs: u32,

    /// Wickets lost, 0-10
    pub wickets: u8,

    /// Overs in cricket notation (17.4 = 17 overs and 4 balls)
    pub overs: f64,
}

impl InningsScore {
    pub fn new(runs: u32, wickets: u8, overs: f64) -> Self {
        Self {
            runs,
            wickets,
            overs,
        }
    }
}

/// Knockout stage of a playoff match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayoffStage {
    Qualifier1,
    Eliminator,
    Qualifier2,
    Final,
}

impl PlayoffStage {
    /// Stages in the order they are played
    pub const ALL: [PlayoffStage; 4] = [
        PlayoffStage::Qualifier1,
        PlayoffStage::Eliminator,
        PlayoffStage::Qualifier2,
        PlayoffStage::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayoffStage::Qualifier1 => "qualifier1",
            PlayoffStage::Eliminator => "eliminator",
            PlayoffStage::Qualifier2 => "qualifier2",
            PlayoffStage::Final => "final",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayoffStage::Qualifier1 => "Qualifier 1",
            PlayoffStage::Eliminator => "Eliminator",
            PlayoffStage::Qualifier2 => "Qualifier 2",
            PlayoffStage::Final => "Final",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "qualifier1" => Some(PlayoffStage::Qualifier1),
            "eliminator" => Some(PlayoffStage::Eliminator),
            "qualifier2" => Some(PlayoffStage::Qualifier2),
            "final" => Some(PlayoffStage::Final),
            _ => None,
        }
    }
}

/// How a match ended, if it has
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Unplayed,
    NoResult,
    Walkover { winner: String },
    Played {
        team_a: InningsScore,
        team_b: InningsScore,
    },
}

/// A scheduled fixture and its result
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: String,
    pub match_number: u32,
    pub team_a: String,
    pub team_b: String,
    pub outcome: MatchOutcome,

    /// Set for playoff matches, `None` for league matches
    pub stage: Option<PlayoffStage>,

    pub date: Option<NaiveDate>,
}

impl Match {
    /// Create an unplayed fixture
    pub fn scheduled(
        id: impl Into<String>,
        match_number: u32,
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        stage: Option<PlayoffStage>,
    ) -> Self {
        Self {
            id: id.into(),
            match_number,
            team_a: team_a.into(),
            team_b: team_b.into(),
            outcome: MatchOutcome::Unplayed,
            stage,
            date: None,
        }
    }

    pub fn is_playoff(&self) -> bool {
        self.stage.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.outcome, MatchOutcome::Unplayed)
    }

    /// Winning team id; `None` for unplayed, tied and no-result matches
    pub fn winner(&self) -> Option<&str> {
        match &self.outcome {
            MatchOutcome::Walkover { winner } => Some(winner),
            MatchOutcome::Played { team_a, team_b } => {
                if team_a.runs > team_b.runs {
                    Some(&self.team_a)
                } else if team_b.runs > team_a.runs {
                    Some(&self.team_b)
                } else {
                    None
                }
            }
            MatchOutcome::Unplayed | MatchOutcome::NoResult => None,
        }
    }

    /// The other participant
    pub fn opponent_of(&self, team_id: &str) -> &str {
        if self.team_a == team_id {
            &self.team_b
        } else {
            &self.team_a
        }
    }
}

/// Errors raised when a persisted record breaks the match invariants
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchRecordError {
    #[error("match {0} has a score for only one side")]
    PartialScores(String),

    #[error("match {0} is flagged both walkover and no result")]
    ConflictingFlags(String),

    #[error("match {0} is a walkover without a winner")]
    WalkoverWithoutWinner(String),

    #[error("match {id}: stored winner {stored:?} does not match the scores")]
    WinnerMismatch { id: String, stored: Option<String> },

    #[error("match {0} carries scores or a winner it cannot have")]
    StrayResultData(String),

    #[error("match {id}: walkover winner {winner} is not a participant")]
    WinnerNotParticipant { id: String, winner: String },

    #[error("match {0}: playoff flag and stage disagree")]
    StageMismatch(String),

    #[error("match {id}: unknown playoff stage {stage:?}")]
    UnknownStage { id: String, stage: String },

    #[error("match {id}: column {column} holds an out-of-range value")]
    InvalidColumn { id: String, column: &'static str },
}

/// Persisted shape of a match: flat, with nullable score objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub match_number: u32,
    pub team_a: String,
    pub team_b: String,
    #[serde(default)]
    pub team_a_score: Option<InningsScore>,
    #[serde(default)]
    pub team_b_score: Option<InningsScore>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub is_walkover: bool,
    #[serde(default)]
    pub is_no_result: bool,
    #[serde(default)]
    pub is_playoff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playoff_type: Option<PlayoffStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl From<&Match> for MatchRecord {
    fn from(m: &Match) -> Self {
        let (team_a_score, team_b_score) = match &m.outcome {
            MatchOutcome::Played { team_a, team_b } => (Some(*team_a), Some(*team_b)),
            _ => (None, None),
        };

        MatchRecord {
            id: m.id.clone(),
            match_number: m.match_number,
            team_a: m.team_a.clone(),
            team_b: m.team_b.clone(),
            team_a_score,
            team_b_score,
            winner: m.winner().map(str::to_string),
            is_walkover: matches!(m.outcome, MatchOutcome::Walkover { .. }),
            is_no_result: matches!(m.outcome, MatchOutcome::NoResult),
            is_playoff: m.is_playoff(),
            playoff_type: m.stage,
            date: m.date,
        }
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = MatchRecordError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        if record.is_playoff != record.playoff_type.is_some() {
            return Err(MatchRecordError::StageMismatch(record.id));
        }

        let outcome = match (record.is_walkover, record.is_no_result) {
            (true, true) => return Err(MatchRecordError::ConflictingFlags(record.id)),
            (false, true) => {
                if record.team_a_score.is_some()
                    || record.team_b_score.is_some()
                    || record.winner.is_some()
                {
                    return Err(MatchRecordError::StrayResultData(record.id));
                }
                MatchOutcome::NoResult
            }
            (true, false) => {
                if record.team_a_score.is_some() || record.team_b_score.is_some() {
                    return Err(MatchRecordError::StrayResultData(record.id));
                }
                match record.winner.clone() {
                    Some(winner) if winner == record.team_a || winner == record.team_b => {
                        MatchOutcome::Walkover { winner }
                    }
                    Some(winner) => {
                        return Err(MatchRecordError::WinnerNotParticipant {
                            id: record.id,
                            winner,
                        })
                    }
                    None => return Err(MatchRecordError::WalkoverWithoutWinner(record.id)),
                }
            }
            (false, false) => match (record.team_a_score, record.team_b_score) {
                (Some(team_a), Some(team_b)) => MatchOutcome::Played { team_a, team_b },
                (None, None) => {
                    if record.winner.is_some() {
                        return Err(MatchRecordError::StrayResultData(record.id));
                    }
                    MatchOutcome::Unplayed
                }
                _ => return Err(MatchRecordError::PartialScores(record.id)),
            },
        };

        let m = Match {
            id: record.id,
            match_number: record.match_number,
            team_a: record.team_a,
            team_b: record.team_b,
            outcome,
            stage: record.playoff_type,
            date: record.date,
        };

        if matches!(m.outcome, MatchOutcome::Played { .. })
            && m.winner() != record.winner.as_deref()
        {
            return Err(MatchRecordError::WinnerMismatch {
                id: m.id,
                stored: record.winner,
            });
        }

        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(a_runs: u32, b_runs: u32) -> Match {
        let mut m = Match::scheduled("match-1", 1, "CSK", "MI", None);
        m.outcome = MatchOutcome::Played {
            team_a: InningsScore::new(a_runs, 6, 20.0),
            team_b: InningsScore::new(b_runs, 10, 18.3),
        };
        m
    }

    #[test]
    fn test_winner_derived_from_runs() {
        assert_eq!(played(180, 150).winner(), Some("CSK"));
        assert_eq!(played(150, 180).winner(), Some("MI"));
        assert_eq!(played(160, 160).winner(), None);
        assert_eq!(Match::scheduled("m", 1, "CSK", "MI", None).winner(), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record = MatchRecord::from(&played(180, 150));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["teamA"], "CSK");
        assert_eq!(json["teamAScore"]["runs"], 180);
        assert_eq!(json["teamBScore"]["wickets"], 10);
        assert_eq!(json["winner"], "CSK");
        assert_eq!(json["isPlayoff"], false);
        assert!(json.get("playoffType").is_none());

        let unplayed = MatchRecord::from(&Match::scheduled("m", 1, "CSK", "MI", None));
        let json = serde_json::to_value(&unplayed).unwrap();
        assert!(json["teamAScore"].is_null());
        assert!(json["teamBScore"].is_null());
    }

    #[test]
    fn test_playoff_record_parses_stage_tag() {
        let json = r#"{
            "id": "playoff-final",
            "matchNumber": 49,
            "teamA": "TBD",
            "teamB": "TBD",
            "isWalkover": false,
            "isNoResult": false,
            "isPlayoff": true,
            "playoffType": "final"
        }"#;

        let record: MatchRecord = serde_json::from_str(json).unwrap();
        let m = Match::try_from(record).unwrap();

        assert_eq!(m.stage, Some(PlayoffStage::Final));
        assert!(m.is_playoff());
        assert_eq!(m.outcome, MatchOutcome::Unplayed);
    }

    #[test]
    fn test_record_conversion_preserves_outcomes() {
        let mut walkover = Match::scheduled("match-2", 2, "GT", "RR", None);
        walkover.outcome = MatchOutcome::Walkover {
            winner: "RR".to_string(),
        };
        let mut no_result = Match::scheduled("match-3", 3, "DC", "SRH", None);
        no_result.outcome = MatchOutcome::NoResult;

        for m in [played(140, 141), walkover, no_result] {
            let back = Match::try_from(MatchRecord::from(&m)).unwrap();
            assert_eq!(back, m);
        }
    }

    #[test]
    fn test_record_rejects_broken_invariants() {
        let base = MatchRecord::from(&Match::scheduled("m", 1, "CSK", "MI", None));

        let mut partial = base.clone();
        partial.team_a_score = Some(InningsScore::new(100, 2, 12.0));
        assert_eq!(
            Match::try_from(partial),
            Err(MatchRecordError::PartialScores("m".to_string()))
        );

        let mut conflicting = base.clone();
        conflicting.is_walkover = true;
        conflicting.is_no_result = true;
        assert!(matches!(
            Match::try_from(conflicting),
            Err(MatchRecordError::ConflictingFlags(_))
        ));

        let mut walkover = base.clone();
        walkover.is_walkover = true;
        assert!(matches!(
            Match::try_from(walkover),
            Err(MatchRecordError::WalkoverWithoutWinner(_))
        ));

        let mut mismatch = MatchRecord::from(&played(180, 150));
        mismatch.winner = Some("MI".to_string());
        assert!(matches!(
            Match::try_from(mismatch),
            Err(MatchRecordError::WinnerMismatch { .. })
        ));

        let mut stray = base.clone();
        stray.winner = Some("CSK".to_string());
        assert!(matches!(
            Match::try_from(stray),
            Err(MatchRecordError::StrayResultData(_))
        ));

        let mut outsider = base.clone();
        outsider.is_walkover = true;
        outsider.winner = Some("DC".to_string());
        assert_eq!(
            Match::try_from(outsider),
            Err(MatchRecordError::WinnerNotParticipant {
                id: "m".to_string(),
                winner: "DC".to_string(),
            })
        );

        // A walkover has no innings to keep
        let mut scored_walkover = MatchRecord::from(&played(180, 150));
        scored_walkover.is_walkover = true;
        assert!(matches!(
            Match::try_from(scored_walkover),
            Err(MatchRecordError::StrayResultData(_))
        ));

        let mut unstaged = base;
        unstaged.is_playoff = true;
        assert!(matches!(
            Match::try_from(unstaged),
            Err(MatchRecordError::StageMismatch(_))
        ));
    }
}
