use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite, SqliteConnection,
};
use tracing::{debug, info, warn};

use crate::models::{InningsScore, Match, MatchRecord, MatchRecordError, PlayoffStage};
use crate::tournament::overs::validate_overs;
use crate::tournament::standings::ALL_OUT_WICKETS;

/// SQLite store for tournament matches
pub struct MatchStore {
    pool: Pool<Sqlite>,
}

impl MatchStore {
    /// Create a new match store and initialize the database
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create data directory if needed
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            if !path.starts_with(":memory:") {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)
                            .context("Failed to create database directory")?;
                    }
                }
            }
        }

        // Parse connection options and enable create_if_missing
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("Match store initialized");
        Ok(store)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS matches (
                id TEXT PRIMARY KEY,
                match_number INTEGER NOT NULL,
                team_a TEXT NOT NULL,
                team_b TEXT NOT NULL,
                team_a_runs INTEGER,
                team_a_wickets INTEGER,
                team_a_overs REAL,
                team_b_runs INTEGER,
                team_b_wickets INTEGER,
                team_b_overs REAL,
                winner TEXT,
                is_walkover BOOLEAN NOT NULL DEFAULT 0,
                is_no_result BOOLEAN NOT NULL DEFAULT 0,
                is_playoff BOOLEAN NOT NULL DEFAULT 0,
                playoff_type TEXT,
                match_date TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create matches table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_matches_number
            ON matches (match_number)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load every match, ordered by match number
    pub async fn load_matches(&self) -> Result<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT * FROM matches
            ORDER BY match_number ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch matches")?;

        let matches = rows
            .into_iter()
            .map(|row| {
                let record = MatchRecord::try_from(row)?;
                Match::try_from(record)
            })
            .collect::<Result<Vec<_>, MatchRecordError>>()
            .context("Stored match violates match invariants")?;

        debug!("Loaded {} matches", matches.len());
        Ok(matches)
    }

    /// Insert or replace a single match
    pub async fn save_match(&self, m: &Match) -> Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire connection")?;

        upsert(&mut *conn, m).await
    }

    /// Insert or replace many matches in one transaction
    pub async fn save_matches(&self, matches: &[Match]) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        for m in matches {
            upsert(&mut *tx, m).await?;
        }

        tx.commit().await.context("Failed to commit matches")?;
        debug!("Saved {} matches", matches.len());
        Ok(())
    }

    /// Swap the whole collection for `matches` in one transaction
    pub async fn replace_all(&self, matches: &[Match]) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let cleared = sqlx::query("DELETE FROM matches")
            .execute(&mut *tx)
            .await
            .context("Failed to clear matches")?;

        for m in matches {
            upsert(&mut *tx, m).await?;
        }

        tx.commit().await.context("Failed to commit matches")?;
        info!(
            "Replaced {} stored matches with {}",
            cleared.rows_affected(),
            matches.len()
        );
        Ok(())
    }

    /// Delete a match; returns whether a row was removed
    pub async fn delete_match(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete match")?;

        if result.rows_affected() == 0 {
            warn!("Match {} not found in store", id);
        }
        Ok(result.rows_affected() > 0)
    }

    /// Get count of stored matches
    pub async fn get_count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count matches")?;

        Ok(row.0)
    }
}

async fn upsert(conn: &mut SqliteConnection, m: &Match) -> Result<()> {
    let record = MatchRecord::from(m);
    let (a_runs, a_wickets, a_overs) = score_columns(record.team_a_score);
    let (b_runs, b_wickets, b_overs) = score_columns(record.team_b_score);

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO matches (
            id,
            match_number,
            team_a,
            team_b,
            team_a_runs,
            team_a_wickets,
            team_a_overs,
            team_b_runs,
            team_b_wickets,
            team_b_overs,
            winner,
            is_walkover,
            is_no_result,
            is_playoff,
            playoff_type,
            match_date
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(i64::from(record.match_number))
    .bind(&record.team_a)
    .bind(&record.team_b)
    .bind(a_runs)
    .bind(a_wickets)
    .bind(a_overs)
    .bind(b_runs)
    .bind(b_wickets)
    .bind(b_overs)
    .bind(record.winner.as_deref())
    .bind(record.is_walkover)
    .bind(record.is_no_result)
    .bind(record.is_playoff)
    .bind(record.playoff_type.map(|s| s.as_str()))
    .bind(record.date.map(|d| d.to_string()))
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to save match {}", record.id))?;

    Ok(())
}

fn score_columns(score: Option<InningsScore>) -> (Option<i64>, Option<i64>, Option<f64>) {
    match score {
        Some(s) => (
            Some(i64::from(s.runs)),
            Some(i64::from(s.wickets)),
            Some(s.overs),
        ),
        None => (None, None, None),
    }
}

/// Database row representation
#[derive(sqlx::FromRow)]
struct MatchRow {
    id: String,
    match_number: i64,
    team_a: String,
    team_b: String,
    team_a_runs: Option<i64>,
    team_a_wickets: Option<i64>,
    team_a_overs: Option<f64>,
    team_b_runs: Option<i64>,
    team_b_wickets: Option<i64>,
    team_b_overs: Option<f64>,
    winner: Option<String>,
    is_walkover: bool,
    is_no_result: bool,
    is_playoff: bool,
    playoff_type: Option<String>,
    match_date: Option<String>,
}

impl TryFrom<MatchRow> for MatchRecord {
    type Error = MatchRecordError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let team_a_score = parse_score(
            &row.id,
            row.team_a_runs,
            row.team_a_wickets,
            row.team_a_overs,
        )?;
        let team_b_score = parse_score(
            &row.id,
            row.team_b_runs,
            row.team_b_wickets,
            row.team_b_overs,
        )?;

        let playoff_type = match row.playoff_type {
            Some(stage) => match PlayoffStage::parse(&stage) {
                Some(parsed) => Some(parsed),
                None => return Err(MatchRecordError::UnknownStage { id: row.id, stage }),
            },
            None => None,
        };

        let date = match row.match_date.as_deref() {
            Some(d) => Some(
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| invalid_column(&row.id, "match_date"))?,
            ),
            None => None,
        };

        Ok(MatchRecord {
            match_number: u32::try_from(row.match_number)
                .map_err(|_| invalid_column(&row.id, "match_number"))?,
            team_a: row.team_a,
            team_b: row.team_b,
            team_a_score,
            team_b_score,
            winner: row.winner,
            is_walkover: row.is_walkover,
            is_no_result: row.is_no_result,
            is_playoff: row.is_playoff,
            playoff_type,
            date,
            id: row.id,
        })
    }
}

/// Regroup the three score columns; a half-filled set is a broken record
fn parse_score(
    id: &str,
    runs: Option<i64>,
    wickets: Option<i64>,
    overs: Option<f64>,
) -> Result<Option<InningsScore>, MatchRecordError> {
    match (runs, wickets, overs) {
        (Some(runs), Some(wickets), Some(overs)) => {
            let runs = u32::try_from(runs).map_err(|_| invalid_column(id, "runs"))?;
            let wickets = u8::try_from(wickets)
                .ok()
                .filter(|w| *w <= ALL_OUT_WICKETS)
                .ok_or_else(|| invalid_column(id, "wickets"))?;
            if !validate_overs(overs) {
                return Err(invalid_column(id, "overs"));
            }

            Ok(Some(InningsScore::new(runs, wickets, overs)))
        }
        (None, None, None) => Ok(None),
        _ => Err(MatchRecordError::PartialScores(id.to_string())),
    }
}

fn invalid_column(id: &str, column: &'static str) -> MatchRecordError {
    MatchRecordError::InvalidColumn {
        id: id.to_string(),
        column,
    }
}
