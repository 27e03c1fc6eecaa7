pub mod tournament;

pub use tournament::{TournamentError, TournamentService};
