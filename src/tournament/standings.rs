use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{InningsScore, Match, MatchOutcome, Team, TeamStats, TEAMS};
use crate::tournament::overs::{overs_to_decimal, FULL_INNINGS_OVERS};

pub const POINTS_FOR_WIN: u32 = 2;
pub const POINTS_FOR_SHARED: u32 = 1;

/// Wickets that end an innings
pub const ALL_OUT_WICKETS: u8 = 10;

/// NRR differences within this margin are treated as level
pub const NRR_TOLERANCE: f64 = 0.001;

/// Ranked standings for the registered teams
pub fn calculate_team_stats(matches: &[Match]) -> Vec<TeamStats> {
    calculate_team_stats_for(&TEAMS, matches)
}

/// Ranked standings with one row per team in `teams`, played or not.
///
/// Unplayed matches and matches involving unregistered ids (such as undecided
/// playoff slots) contribute nothing. Rows are sorted by points, then NRR,
/// then wins; anything still level keeps registration order.
pub fn calculate_team_stats_for(teams: &[Team], matches: &[Match]) -> Vec<TeamStats> {
    let mut stats: Vec<TeamStats> = teams.iter().map(|t| TeamStats::new(t.id)).collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id, i))
        .collect();

    for m in matches {
        let (a, b) = match (index.get(m.team_a.as_str()), index.get(m.team_b.as_str())) {
            (Some(&a), Some(&b)) if a != b => (a, b),
            _ => continue,
        };

        match &m.outcome {
            MatchOutcome::Unplayed => continue,
            MatchOutcome::NoResult => {
                for i in [a, b] {
                    stats[i].matches += 1;
                    stats[i].no_results += 1;
                    stats[i].points += POINTS_FOR_SHARED;
                }
            }
            MatchOutcome::Walkover { winner } => {
                let (winner, loser) = if *winner == m.team_a { (a, b) } else { (b, a) };
                stats[winner].matches += 1;
                stats[loser].matches += 1;
                record_win(&mut stats, winner, loser);
            }
            MatchOutcome::Played { team_a, team_b } => {
                stats[a].matches += 1;
                stats[b].matches += 1;
                record_innings(&mut stats, a, b, team_a);
                record_innings(&mut stats, b, a, team_b);

                match team_a.runs.cmp(&team_b.runs) {
                    Ordering::Greater => record_win(&mut stats, a, b),
                    Ordering::Less => record_win(&mut stats, b, a),
                    Ordering::Equal => {
                        stats[a].points += POINTS_FOR_SHARED;
                        stats[b].points += POINTS_FOR_SHARED;
                    }
                }
            }
        }
    }

    for row in &mut stats {
        row.nrr = calculate_nrr(
            row.runs_scored,
            row.overs_faced,
            row.runs_against,
            row.overs_bowled,
        );
    }

    rank(&mut stats);
    stats
}

/// Run rate scored minus run rate conceded; 0 until both sides of the ledger have overs
pub fn calculate_nrr(
    runs_scored: u32,
    overs_faced: f64,
    runs_against: u32,
    overs_bowled: f64,
) -> f64 {
    if overs_faced == 0.0 || overs_bowled == 0.0 {
        return 0.0;
    }

    f64::from(runs_scored) / overs_faced - f64::from(runs_against) / overs_bowled
}

/// Overs an innings counts for in NRR: all-out sides are charged the full quota
pub fn nrr_overs(score: &InningsScore) -> f64 {
    if score.wickets == ALL_OUT_WICKETS {
        FULL_INNINGS_OVERS
    } else {
        overs_to_decimal(score.overs)
    }
}

/// Table order: points, then NRR (with tolerance), then wins, all descending
pub fn compare_standings(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| {
            if (b.nrr - a.nrr).abs() > NRR_TOLERANCE {
                b.nrr.partial_cmp(&a.nrr).unwrap_or(Ordering::Equal)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| b.wins.cmp(&a.wins))
}

/// Stable insertion sort. The NRR tolerance makes `compare_standings`
/// non-transitive, which `slice::sort_by` is allowed to panic on.
fn rank(stats: &mut [TeamStats]) {
    for i in 1..stats.len() {
        let mut j = i;
        while j > 0 && compare_standings(&stats[j - 1], &stats[j]) == Ordering::Greater {
            stats.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn record_innings(stats: &mut [TeamStats], batting: usize, bowling: usize, score: &InningsScore) {
    let overs = nrr_overs(score);

    stats[batting].runs_scored += score.runs;
    stats[batting].overs_faced += overs;
    stats[bowling].runs_against += score.runs;
    stats[bowling].overs_bowled += overs;
}

fn record_win(stats: &mut [TeamStats], winner: usize, loser: usize) {
    stats[winner].wins += 1;
    stats[winner].points += POINTS_FOR_WIN;
    stats[loser].losses += 1;
}
