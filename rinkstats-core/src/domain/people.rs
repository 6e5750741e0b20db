use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{MatchId, PlayerId, SeasonId, TeamId};

/// Canonical player registry: `player_id -> full_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    names: BTreeMap<PlayerId, String>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. Returns `false` if the id was already present
    /// (the first registration wins).
    pub fn insert(&mut self, id: PlayerId, full_name: String) -> bool {
        if self.names.contains_key(&id) {
            return false;
        }
        self.names.insert(id, full_name);
        true
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.names.contains_key(id)
    }

    pub fn name(&self, id: &PlayerId) -> Option<&str> {
        self.names.get(id).map(|s| s.as_str())
    }

    /// Display name, falling back to `"Unknown"` for ids missing from the registry.
    pub fn display_name(&self, id: &PlayerId) -> String {
        self.name(id).unwrap_or("Unknown").to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &str)> {
        self.names.iter().map(|(id, name)| (id, name.as_str()))
    }

    /// Case-insensitive substring search over full names, in id order.
    pub fn search(&self, needle: &str) -> Vec<&PlayerId> {
        let needle = needle.trim().to_lowercase();
        self.names
            .iter()
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(id, _)| id)
            .collect()
    }
}

/// One row of `PlayerSeasonStats`.
///
/// Rows without `match_id` are season aggregates; rows with one are
/// per-match lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub id: String,
    pub player: PlayerId,
    pub season: SeasonId,
    pub team: TeamId,
    pub match_id: Option<MatchId>,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub penalty_minutes: u32,
    pub games: Option<u32>,
}

impl PlayerStat {
    /// Games this row accounts for: the explicit column when present,
    /// otherwise one for a per-match row and zero for an aggregate.
    pub fn games_played(&self) -> u32 {
        match (self.games, &self.match_id) {
            (Some(g), _) => g,
            (None, Some(_)) => 1,
            (None, None) => 0,
        }
    }
}

/// One row of `Rosters`: squad membership for a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub season: SeasonId,
    pub team: TeamId,
    pub player: PlayerId,
    pub role: String,
    pub jersey_number: Option<u32>,
    pub is_staff: bool,
}
