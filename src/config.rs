use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path
    pub database_url: String,

    /// Title printed above the points table
    pub tournament_name: String,

    /// Fill playoff slots automatically whenever standings are shown
    pub auto_advance_playoffs: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/tournament.db".to_string()),

            tournament_name: env::var("TOURNAMENT_NAME")
                .unwrap_or_else(|_| "Legends League".to_string()),

            auto_advance_playoffs: env::var("AUTO_ADVANCE_PLAYOFFS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("AUTO_ADVANCE_PLAYOFFS must be true or false")?,
        })
    }
}
