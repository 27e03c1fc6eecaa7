use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{find_team, TEAMS};

/// Resolves free-typed team names ("Mumbai Indians", "mi", "Bangalore") to registered ids
pub struct TeamResolver {
    /// Map of lowercase alias -> team id
    aliases: HashMap<String, &'static str>,
}

/// Team alias configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAliases {
    pub teams: Vec<TeamAliasEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAliasEntry {
    /// Registered team id
    pub id: String,
    /// Extra names for the team (former names, nicknames, city)
    pub aliases: Vec<String>,
}

impl TeamResolver {
    /// Create a resolver that knows every team's id, name and short name
    pub fn new() -> Self {
        let mut aliases = HashMap::new();

        for team in TEAMS.iter() {
            for name in [team.id, team.name, team.short_name] {
                aliases.insert(name.to_lowercase(), team.id);
            }
        }

        Self { aliases }
    }

    /// Extend the built-in names with aliases from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context("Failed to read team aliases file")?;

        let aliases_config: TeamAliases =
            serde_json::from_str(&content).context("Failed to parse team aliases JSON")?;

        let mut resolver = Self::new();

        for entry in aliases_config.teams {
            let Some(team) = find_team(&entry.id) else {
                warn!("Ignoring aliases for unknown team {}", entry.id);
                continue;
            };

            for alias in entry.aliases {
                resolver.aliases.insert(alias.to_lowercase(), team.id);
            }
        }

        info!("Loaded {} team alias mappings", resolver.aliases.len());

        Ok(resolver)
    }

    /// Registered team id for a name, if known
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        let lower = name.trim().to_lowercase();
        let resolved = self.aliases.get(&lower).copied();

        if resolved.is_none() {
            debug!("No team matches {:?}", name);
        }
        resolved
    }

    /// Add a new alias mapping; ignored if `team_id` is not registered
    pub fn add_alias(&mut self, alias: &str, team_id: &str) {
        if let Some(team) = find_team(team_id) {
            self.aliases.insert(alias.to_lowercase(), team.id);
        }
    }
}

impl Default for TeamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_names() {
        let resolver = TeamResolver::new();

        assert_eq!(resolver.resolve("Mumbai Indians"), Some("MI"));
        assert_eq!(resolver.resolve("mi"), Some("MI"));
        assert_eq!(resolver.resolve("  pbks "), Some("PBKS"));
        assert_eq!(resolver.resolve("TBD"), None);
    }

    #[test]
    fn test_add_alias() {
        let mut resolver = TeamResolver::new();
        resolver.add_alias("Kings XI Punjab", "PBKS");
        resolver.add_alias("Deccan Chargers", "DCH"); // Not registered

        assert_eq!(resolver.resolve("kings xi punjab"), Some("PBKS"));
        assert_eq!(resolver.resolve("Deccan Chargers"), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("cricket_league_team_aliases_test.json");
        std::fs::write(
            &path,
            r#"{"teams": [
                {"id": "RCB", "aliases": ["Royal Challengers Bengaluru", "Bangalore"]},
                {"id": "XYZ", "aliases": ["Nobody"]}
            ]}"#,
        )
        .unwrap();

        let resolver = TeamResolver::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(resolver.resolve("bangalore"), Some("RCB"));
        assert_eq!(resolver.resolve("Royal Challengers Bengaluru"), Some("RCB"));
        assert_eq!(resolver.resolve("Nobody"), None);
    }
}
