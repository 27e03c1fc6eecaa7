use tracing::{debug, info};

use crate::models::{Match, PlayoffStage, TeamStats, TBD};

/// Teams that reach the playoffs
pub const PLAYOFF_SPOTS: usize = 4;

/// Fill undecided playoff slots from the league table and earlier playoff results.
///
/// Only "TBD" slots are written; a participant that is already set is never
/// replaced. Qualifier 1 and the eliminator wait for the whole league to be
/// resolved. A tied or abandoned playoff goes to the higher seed, which always
/// sits in the team A slot.
pub fn advance_playoffs(matches: &[Match], standings: &[TeamStats]) -> Vec<Match> {
    let mut updated = matches.to_vec();

    let league_complete = {
        let mut league = matches.iter().filter(|m| !m.is_playoff()).peekable();
        league.peek().is_some() && league.all(Match::is_resolved)
    };

    if league_complete && standings.len() >= PLAYOFF_SPOTS {
        let seeds: Vec<&str> = standings
            .iter()
            .take(PLAYOFF_SPOTS)
            .map(|s| s.team_id.as_str())
            .collect();

        fill_stage(&mut updated, PlayoffStage::Qualifier1, seeds[0], seeds[1]);
        fill_stage(&mut updated, PlayoffStage::Eliminator, seeds[2], seeds[3]);
    } else {
        debug!("League not finished, playoff seeding deferred");
    }

    let q1 = decided(&updated, PlayoffStage::Qualifier1);
    let eliminator = decided(&updated, PlayoffStage::Eliminator);

    if let (Some((_, q1_loser)), Some((elim_winner, _))) = (&q1, &eliminator) {
        fill_stage(&mut updated, PlayoffStage::Qualifier2, q1_loser, elim_winner);
    }

    let q2 = decided(&updated, PlayoffStage::Qualifier2);
    if let (Some((q1_winner, _)), Some((q2_winner, _))) = (&q1, &q2) {
        fill_stage(&mut updated, PlayoffStage::Final, q1_winner, q2_winner);
    }

    updated
}

/// Playoff match for a stage, if scheduled
pub fn playoff_match(matches: &[Match], stage: PlayoffStage) -> Option<&Match> {
    matches.iter().find(|m| m.stage == Some(stage))
}

/// Champion, once the final is resolved
pub fn champion(matches: &[Match]) -> Option<String> {
    decided(matches, PlayoffStage::Final).map(|(winner, _)| winner)
}

/// (winner, loser) of a resolved playoff with both participants known
fn decided(matches: &[Match], stage: PlayoffStage) -> Option<(String, String)> {
    let m = playoff_match(matches, stage)?;
    if !m.is_resolved() || m.team_a == TBD || m.team_b == TBD {
        return None;
    }

    let winner = m.winner().unwrap_or(m.team_a.as_str()).to_string();
    let loser = m.opponent_of(&winner).to_string();
    Some((winner, loser))
}

fn fill_stage(matches: &mut [Match], stage: PlayoffStage, team_a: &str, team_b: &str) {
    let Some(m) = matches.iter_mut().find(|m| m.stage == Some(stage)) else {
        return;
    };

    if m.team_a == TBD {
        m.team_a = team_a.to_string();
        info!("{}: {} takes the first slot", stage.label(), team_a);
    }
    if m.team_b == TBD {
        m.team_b = team_b.to_string();
        info!("{}: {} takes the second slot", stage.label(), team_b);
    }
}
