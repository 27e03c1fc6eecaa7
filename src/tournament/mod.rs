pub mod entry;
pub mod overs;
pub mod playoffs;
pub mod schedule;
pub mod standings;
pub mod summary;

pub use entry::{EntryError, InningsEntry, ResultEntry};
pub use overs::{format_nrr, format_overs, overs_to_decimal, validate_overs};
pub use playoffs::advance_playoffs;
pub use schedule::{generate_playoff_matches, generate_round_robin_schedule, initial_schedule};
pub use standings::{calculate_nrr, calculate_team_stats};
pub use summary::TournamentSummary;
