pub mod match_record;
pub mod stats;
pub mod team;

pub use match_record::{
    InningsScore, Match, MatchOutcome, MatchRecord, MatchRecordError, PlayoffStage,
};
pub use stats::TeamStats;
pub use team::{find_team, Team, TBD, TEAMS};
