use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::ids::{CompetitionId, SeasonId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub start_year: i32,
    pub end_year: i32,
}

impl Season {
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub season: Option<SeasonId>,
    pub stage: Option<String>,
}

/// Teams by id, plus the alias table used to resolve free-text names.
///
/// Aliases are matched case-insensitively after trimming. Canonical team
/// names are also registered as aliases of themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRegistry {
    names: BTreeMap<TeamId, String>,
    aliases: HashMap<String, TeamId>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TeamId, name: String) -> bool {
        if self.names.contains_key(&id) {
            return false;
        }
        self.aliases.entry(normalize(&name)).or_insert_with(|| id.clone());
        self.names.insert(id, name);
        true
    }

    /// Register an alternative spelling. Explicit aliases override a
    /// canonical name with the same spelling.
    pub fn add_alias(&mut self, alias: &str, id: TeamId) {
        self.aliases.insert(normalize(alias), id);
    }

    pub fn contains(&self, id: &TeamId) -> bool {
        self.names.contains_key(id)
    }

    pub fn name(&self, id: &TeamId) -> Option<&str> {
        self.names.get(id).map(|s| s.as_str())
    }

    pub fn display_name(&self, id: &TeamId) -> String {
        self.name(id).unwrap_or("Unknown").to_string()
    }

    /// Resolve a team by id, canonical name, or alias.
    pub fn resolve(&self, text: &str) -> Option<TeamId> {
        let trimmed = text.trim();
        let as_id = TeamId::new(trimmed);
        if self.names.contains_key(&as_id) {
            return Some(as_id);
        }
        self.aliases.get(&normalize(trimmed)).cloned()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamId, &str)> {
        self.names.iter().map(|(id, name)| (id, name.as_str()))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Officially published standings line from the optional `Standings` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedStanding {
    pub id: String,
    pub season: SeasonId,
    pub competition: CompetitionId,
    pub team: TeamId,
    pub rank: u32,
    pub games: Option<u32>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub points: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_label_uses_years() {
        let s = Season {
            id: SeasonId::new("2020"),
            start_year: 2019,
            end_year: 2020,
        };
        assert_eq!(s.label(), "2019-2020");
    }

    #[test]
    fn resolve_by_id_name_and_alias() {
        let mut teams = TeamRegistry::new();
        teams.insert(TeamId::new("T1"), "Mailajoket".into());
        teams.insert(TeamId::new("T2"), "Kiekko-Veikot".into());
        teams.add_alias("  MJ ", TeamId::new("T1"));

        assert_eq!(teams.resolve("T2"), Some(TeamId::new("T2")));
        assert_eq!(teams.resolve("mailajoket"), Some(TeamId::new("T1")));
        assert_eq!(teams.resolve("mj"), Some(TeamId::new("T1")));
        assert_eq!(teams.resolve("nobody"), None);
        assert_eq!(teams.display_name(&TeamId::new("T9")), "Unknown");
    }

    #[test]
    fn duplicate_team_id_rejected() {
        let mut teams = TeamRegistry::new();
        assert!(teams.insert(TeamId::new("T1"), "A".into()));
        assert!(!teams.insert(TeamId::new("T1"), "B".into()));
        assert_eq!(teams.name(&TeamId::new("T1")), Some("A"));
    }
}
