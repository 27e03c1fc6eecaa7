use serde::Serialize;

/// Standings row for one team, derived from match results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_id: String,

    /// Matches that counted towards the table
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub no_results: u32,
    pub points: u32,

    /// Net run rate
    pub nrr: f64,

    pub runs_scored: u32,
    pub runs_against: u32,

    /// True decimal overs (not cricket notation)
    pub overs_faced: f64,
    pub overs_bowled: f64,
}

impl TeamStats {
    /// All-zero row for a team that has not played yet
    pub fn new(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            matches: 0,
            wins: 0,
            losses: 0,
            no_results: 0,
            points: 0,
            nrr: 0.0,
            runs_scored: 0,
            runs_against: 0,
            overs_faced: 0.0,
            overs_bowled: 0.0,
        }
    }

    /// Tied matches: played, but neither won, lost nor abandoned
    pub fn ties(&self) -> u32 {
        self.matches
            .saturating_sub(self.wins + self.losses + self.no_results)
    }
}
