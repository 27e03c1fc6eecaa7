use serde::Serialize;

use crate::models::{Match, TeamStats};

/// Progress counters for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub league_total: usize,
    pub league_completed: usize,
    pub playoff_total: usize,
    pub playoff_completed: usize,

    /// Table leader, once any league match has been resolved
    pub leader: Option<String>,
}

impl TournamentSummary {
    /// Count resolved matches as completed. A tie counts too, even though it
    /// has no winner; a winner-or-no-result rule would leave ties pending.
    pub fn from_matches(matches: &[Match], standings: &[TeamStats]) -> Self {
        let (playoffs, league): (Vec<&Match>, Vec<&Match>) =
            matches.iter().partition(|m| m.is_playoff());

        let league_completed = league.iter().filter(|m| m.is_resolved()).count();

        Self {
            league_total: league.len(),
            league_completed,
            playoff_total: playoffs.len(),
            playoff_completed: playoffs.iter().filter(|m| m.is_resolved()).count(),
            leader: standings
                .first()
                .filter(|_| league_completed > 0)
                .map(|s| s.team_id.clone()),
        }
    }

    pub fn league_pending(&self) -> usize {
        self.league_total - self.league_completed
    }

    pub fn playoff_pending(&self) -> usize {
        self.playoff_total - self.playoff_completed
    }
}
