use std::env;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_league::config::Config;
use cricket_league::db::MatchStore;
use cricket_league::models::{team, Match, TeamStats};
use cricket_league::service::TournamentService;
use cricket_league::tournament::playoffs::{champion, PLAYOFF_SPOTS};
use cricket_league::tournament::{format_nrr, format_overs, TournamentSummary};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so --json output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cricket_league=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json = env::args().any(|arg| arg == "--json");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Initialize database
    let store = MatchStore::new(&config.database_url).await?;
    let service = TournamentService::load(store).await?;

    if config.auto_advance_playoffs {
        service.advance_playoffs().await?;
    }

    let standings = service.standings().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
        return Ok(());
    }

    print_points_table(&config.tournament_name, &standings);
    print_summary(&service.summary().await);
    print_playoffs(&service.matches().await);

    Ok(())
}

fn print_points_table(title: &str, standings: &[TeamStats]) {
    println!("{}", title);
    println!(
        "{:>3}  {:<5} {:>3} {:>3} {:>3} {:>3} {:>4} {:>7}  {:>12}  {:>12}",
        "#", "Team", "M", "W", "L", "NR", "Pts", "NRR", "For", "Against"
    );

    for (i, row) in standings.iter().enumerate() {
        // Playoff places are flagged
        let marker = if i < PLAYOFF_SPOTS { '*' } else { ' ' };

        println!(
            "{:>2}{} {:<5} {:>3} {:>3} {:>3} {:>3} {:>4} {:>7}  {:>12}  {:>12}",
            i + 1,
            marker,
            team::short_name(&row.team_id),
            row.matches,
            row.wins,
            row.losses,
            row.no_results,
            row.points,
            format_nrr(row.nrr),
            format!("{}/{}", row.runs_scored, format_overs(row.overs_faced)),
            format!("{}/{}", row.runs_against, format_overs(row.overs_bowled)),
        );
    }
}

fn print_summary(summary: &TournamentSummary) {
    println!();
    println!(
        "League: {}/{} played, {} to go",
        summary.league_completed,
        summary.league_total,
        summary.league_pending()
    );
    println!(
        "Playoffs: {}/{} played, {} to go",
        summary.playoff_completed,
        summary.playoff_total,
        summary.playoff_pending()
    );
    if let Some(leader) = &summary.leader {
        println!("Leader: {}", team::short_name(leader));
    }
}

fn print_playoffs(matches: &[Match]) {
    for m in matches.iter().filter(|m| m.is_playoff()) {
        let label = m.stage.map(|s| s.label()).unwrap_or("Playoff");
        let status = if m.is_resolved() { " ✓" } else { "" };

        println!(
            "{}: {} vs {}{}",
            label,
            team::short_name(&m.team_a),
            team::short_name(&m.team_b),
            status
        );
    }

    if let Some(winner) = champion(matches) {
        println!("Champion: {}", team::short_name(&winner));
    }
}
