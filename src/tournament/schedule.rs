use crate::models::{Match, PlayoffStage, Team, TBD, TEAMS};

/// Single round-robin over the registered teams (45 matches for ten teams)
pub fn generate_round_robin_schedule() -> Vec<Match> {
    round_robin_for(&TEAMS)
}

/// Every unordered pair of `teams` exactly once, numbered from 1 in emission order
pub fn round_robin_for(teams: &[Team]) -> Vec<Match> {
    let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    let mut match_number = 1;

    for (i, home) in teams.iter().enumerate() {
        for away in &teams[i + 1..] {
            matches.push(Match::scheduled(
                format!("match-{}", match_number),
                match_number,
                home.id,
                away.id,
                None,
            ));
            match_number += 1;
        }
    }

    matches
}

/// Four-stage playoff skeleton with undecided participants
pub fn generate_playoff_matches() -> Vec<Match> {
    playoffs_after(league_match_count(TEAMS.len()))
}

/// Playoff skeleton numbered after `league_matches` league fixtures
pub fn playoffs_after(league_matches: u32) -> Vec<Match> {
    PlayoffStage::ALL
        .iter()
        .zip(1..)
        .map(|(stage, offset)| {
            Match::scheduled(
                format!("playoff-{}", stage.as_str()),
                league_matches + offset,
                TBD,
                TBD,
                Some(*stage),
            )
        })
        .collect()
}

/// League fixtures followed by the playoff skeleton
pub fn initial_schedule() -> Vec<Match> {
    let mut matches = generate_round_robin_schedule();
    matches.extend(generate_playoff_matches());
    matches
}

fn league_match_count(teams: usize) -> u32 {
    (teams * teams.saturating_sub(1) / 2) as u32
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::MatchOutcome;

    #[test]
    fn test_round_robin_completeness() {
        let matches = generate_round_robin_schedule();
        assert_eq!(matches.len(), 45);

        let mut pairs = HashSet::new();
        for m in &matches {
            assert_ne!(m.team_a, m.team_b);
            assert_eq!(m.outcome, MatchOutcome::Unplayed);
            assert!(!m.is_playoff());

            let mut pair = [m.team_a.clone(), m.team_b.clone()];
            pair.sort();
            assert!(pairs.insert(pair), "pair repeated in match {}", m.match_number);
        }

        let numbers: Vec<u32> = matches.iter().map(|m| m.match_number).collect();
        assert_eq!(numbers, (1..=45).collect::<Vec<_>>());
    }

    #[test]
    fn test_round_robin_order() {
        let matches = generate_round_robin_schedule();

        assert_eq!(matches[0].id, "match-1");
        assert_eq!((matches[0].team_a.as_str(), matches[0].team_b.as_str()), ("CSK", "DC"));
        assert_eq!((matches[8].team_a.as_str(), matches[8].team_b.as_str()), ("CSK", "SRH"));
        assert_eq!((matches[9].team_a.as_str(), matches[9].team_b.as_str()), ("DC", "GT"));
        assert_eq!((matches[44].team_a.as_str(), matches[44].team_b.as_str()), ("RCB", "SRH"));
    }

    #[test]
    fn test_schedule_is_deterministic() {
        assert_eq!(generate_round_robin_schedule(), generate_round_robin_schedule());
        assert!(round_robin_for(&TEAMS[..1]).is_empty());
        assert_eq!(round_robin_for(&TEAMS[..4]).len(), 6);
    }

    #[test]
    fn test_playoff_skeleton() {
        let playoffs = generate_playoff_matches();
        assert_eq!(playoffs.len(), 4);

        let stages: Vec<_> = playoffs.iter().filter_map(|m| m.stage).collect();
        assert_eq!(stages, PlayoffStage::ALL.to_vec());

        for (m, number) in playoffs.iter().zip(46..) {
            assert_eq!(m.match_number, number);
            assert_eq!(m.team_a, TBD);
            assert_eq!(m.team_b, TBD);
            assert!(!m.is_resolved());
        }
        assert_eq!(playoffs[3].id, "playoff-final");
        assert_eq!(initial_schedule().len(), 49);
    }
}
