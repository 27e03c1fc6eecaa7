use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_league::config::Config;
use cricket_league::db::MatchStore;
use cricket_league::matching::TeamResolver;
use cricket_league::models::{Match, MatchRecord};
use cricket_league::service::TournamentService;
use cricket_league::tournament::{InningsEntry, ResultEntry};

const USAGE: &str = "\
usage:
  admin show <match>
  admin result <match> <runs/wickets/overs> <runs/wickets/overs>
  admin walkover <match> <winner>
  admin no-result <match>
  admin delete <match>
  admin advance
  admin reset

<match> is a match id (match-12, playoff-final) or a match number";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin=info,cricket_league=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{}", USAGE);
    };

    let config = Config::from_env()?;
    let store = MatchStore::new(&config.database_url).await?;
    let service = TournamentService::load(store).await?;

    match command.as_str() {
        "show" => {
            let m = lookup(&service, arg(&args, 1)?).await?;
            println!("{}", serde_json::to_string_pretty(&MatchRecord::from(&m))?);
        }
        "result" => {
            let m = lookup(&service, arg(&args, 1)?).await?;
            let entry = ResultEntry::scored(
                parse_innings(arg(&args, 2)?)?,
                parse_innings(arg(&args, 3)?)?,
            );
            record(&service, &m, &entry).await?;
        }
        "walkover" => {
            let m = lookup(&service, arg(&args, 1)?).await?;
            let name = arg(&args, 2)?;
            let winner = load_team_resolver()?
                .resolve(name)
                .with_context(|| format!("Unknown team {:?}", name))?;
            record(&service, &m, &ResultEntry::walkover(winner)).await?;
        }
        "no-result" => {
            let m = lookup(&service, arg(&args, 1)?).await?;
            record(&service, &m, &ResultEntry::no_result()).await?;
        }
        "delete" => {
            let m = lookup(&service, arg(&args, 1)?).await?;
            service.delete_match(&m.id).await?;
        }
        "advance" => {
            let changed = service.advance_playoffs().await?;
            info!("{} playoff matches updated", changed);
        }
        "reset" => service.reset().await?,
        other => bail!("Unknown command {:?}\n{}", other, USAGE),
    }

    Ok(())
}

fn arg(args: &[String], index: usize) -> Result<&str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("Missing argument\n{}", USAGE))
}

/// Find a match by id, or by match number
async fn lookup(service: &TournamentService, key: &str) -> Result<Match> {
    let found = match key.parse::<u32>() {
        Ok(number) => service
            .matches()
            .await
            .into_iter()
            .find(|m| m.match_number == number),
        Err(_) => service.find_match(key).await,
    };

    found.with_context(|| format!("No match {:?}", key))
}

async fn record(service: &TournamentService, m: &Match, entry: &ResultEntry) -> Result<()> {
    let updated = entry.apply(m)?;
    service.update_match(updated.clone()).await?;

    match updated.winner() {
        Some(winner) => info!("Match {}: {} won", updated.match_number, winner),
        None => info!("Match {}: no winner", updated.match_number),
    }
    Ok(())
}

/// Parse "182/6/20" or "150/10/18.3"
fn parse_innings(s: &str) -> Result<InningsEntry> {
    let mut parts = s.split('/');

    let runs = parts
        .next()
        .filter(|p| !p.is_empty())
        .map(str::parse::<u32>)
        .transpose()
        .with_context(|| format!("Runs in {:?} must be a whole number", s))?;
    let wickets = parts
        .next()
        .map(str::parse::<u32>)
        .transpose()
        .with_context(|| format!("Wickets in {:?} must be a whole number", s))?;
    let overs = parts
        .next()
        .map(str::parse::<f64>)
        .transpose()
        .with_context(|| format!("Overs in {:?} must be a number like 17.4", s))?;

    if parts.next().is_some() {
        bail!("Expected runs/wickets/overs, got {:?}", s);
    }

    Ok(InningsEntry {
        runs,
        wickets,
        overs,
    })
}

/// Load team resolver from JSON file or create default
fn load_team_resolver() -> Result<TeamResolver> {
    let aliases_path = Path::new("data/team_aliases.json");

    if aliases_path.exists() {
        TeamResolver::load_from_file(aliases_path)
    } else {
        Ok(TeamResolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_innings() {
        assert_eq!(parse_innings("150/10/18.3").unwrap(), InningsEntry::new(150, 10, 18.3));
        assert_eq!(
            parse_innings("182/6").unwrap(),
            InningsEntry {
                runs: Some(182),
                wickets: Some(6),
                overs: None,
            }
        );
        assert!(parse_innings("182/six/20").is_err());
        assert!(parse_innings("1/2/3/4").is_err());
    }
}
