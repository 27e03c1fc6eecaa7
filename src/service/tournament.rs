use anyhow::Result;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::db::MatchStore;
use crate::models::{Match, TeamStats};
use crate::tournament::{
    advance_playoffs, calculate_team_stats, initial_schedule, TournamentSummary,
};

/// Errors for operations on the match collection
#[derive(Debug, Error, PartialEq)]
pub enum TournamentError {
    #[error("match {0} not found")]
    MatchNotFound(String),
}

/// Owner of the tournament's match collection.
///
/// Holds the in-memory matches behind a lock and writes every change through
/// to the store. Standings are recomputed on each call.
pub struct TournamentService {
    store: MatchStore,
    matches: RwLock<Vec<Match>>,
}

impl TournamentService {
    /// Hydrate from the store, seeding the initial schedule on an empty database
    pub async fn load(store: MatchStore) -> Result<Self> {
        let mut matches = store.load_matches().await?;

        if matches.is_empty() {
            matches = initial_schedule();
            store.save_matches(&matches).await?;
            info!("Seeded new tournament with {} matches", matches.len());
        } else {
            info!("Loaded {} matches", matches.len());
        }

        Ok(Self {
            store,
            matches: RwLock::new(matches),
        })
    }

    /// Snapshot of every match, ordered by match number
    pub async fn matches(&self) -> Vec<Match> {
        self.matches.read().await.clone()
    }

    pub async fn find_match(&self, id: &str) -> Option<Match> {
        self.matches.read().await.iter().find(|m| m.id == id).cloned()
    }

    /// Replace a match by id
    pub async fn update_match(&self, updated: Match) -> Result<()> {
        let mut matches = self.matches.write().await;

        let slot = matches
            .iter_mut()
            .find(|m| m.id == updated.id)
            .ok_or_else(|| TournamentError::MatchNotFound(updated.id.clone()))?;

        self.store.save_match(&updated).await?;
        info!("Updated match {} ({} v {})", updated.id, updated.team_a, updated.team_b);
        *slot = updated;

        Ok(())
    }

    pub async fn delete_match(&self, id: &str) -> Result<()> {
        let mut matches = self.matches.write().await;

        let index = matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| TournamentError::MatchNotFound(id.to_string()))?;

        if !self.store.delete_match(id).await? {
            warn!("Match {} was only held in memory", id);
        }
        matches.remove(index);
        info!("Deleted match {}", id);

        Ok(())
    }

    /// Drop every result and start again from the initial schedule
    pub async fn reset(&self) -> Result<()> {
        let mut matches = self.matches.write().await;

        let fresh = initial_schedule();
        self.store.replace_all(&fresh).await?;
        *matches = fresh;

        info!("Tournament reset");
        Ok(())
    }

    /// League table; playoff results are not counted
    pub async fn standings(&self) -> Vec<TeamStats> {
        let matches = self.matches.read().await;
        league_standings(&matches)
    }

    pub async fn summary(&self) -> TournamentSummary {
        let matches = self.matches.read().await;
        TournamentSummary::from_matches(&matches, &league_standings(&matches))
    }

    /// Fill any playoff slots that can now be decided; returns the number of matches changed
    pub async fn advance_playoffs(&self) -> Result<usize> {
        let mut matches = self.matches.write().await;

        let advanced = advance_playoffs(&matches, &league_standings(&matches));
        let changed: Vec<Match> = advanced
            .iter()
            .zip(matches.iter())
            .filter(|(new, old)| new != old)
            .map(|(new, _)| new.clone())
            .collect();

        if !changed.is_empty() {
            self.store.save_matches(&changed).await?;
            info!("Advanced {} playoff matches", changed.len());
        }
        *matches = advanced;

        Ok(changed.len())
    }
}

fn league_standings(matches: &[Match]) -> Vec<TeamStats> {
    let league: Vec<Match> = matches.iter().filter(|m| !m.is_playoff()).cloned().collect();
    calculate_team_stats(&league)
}
