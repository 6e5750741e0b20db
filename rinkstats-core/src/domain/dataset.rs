//! The loaded base tables and the lookups every view needs.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use super::game::Match;
use super::ids::{CompetitionId, SeasonId, TeamId};
use super::league::{Competition, PublishedStanding, Season, TeamRegistry};
use super::people::{PlayerRegistry, PlayerStat, RosterEntry};

/// Normalized workbook contents. Built once by the loader; read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub seasons: BTreeMap<SeasonId, Season>,
    pub teams: TeamRegistry,
    pub competitions: BTreeMap<CompetitionId, Competition>,
    pub players: PlayerRegistry,
    /// Chronological, undated matches last.
    pub matches: Vec<Match>,
    pub player_stats: Vec<PlayerStat>,
    pub rosters: Vec<RosterEntry>,
    pub standings: Vec<PublishedStanding>,
}

impl Dataset {
    pub fn team_name(&self, id: &TeamId) -> String {
        self.teams.display_name(id)
    }

    /// `"2019-2020"` when the season is in the `Seasons` sheet, `"Season <id>"` otherwise.
    pub fn season_label(&self, id: &SeasonId) -> String {
        match self.seasons.get(id) {
            Some(season) => season.label(),
            None => format!("Season {id}"),
        }
    }

    pub fn competition_name(&self, id: &CompetitionId) -> String {
        self.competitions
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn competition_stage(&self, id: &CompetitionId) -> Option<&str> {
        self.competitions.get(id).and_then(|c| c.stage.as_deref())
    }

    /// Resolve a team from an id, a canonical name or an alias.
    pub fn resolve_team(&self, text: &str) -> Option<TeamId> {
        self.teams.resolve(text)
    }

    /// Every season that appears anywhere in the data, newest first.
    ///
    /// Ordered by start year when the `Seasons` sheet knows the season, by
    /// the numeric value of the id otherwise, then by id.
    pub fn season_ids(&self) -> Vec<SeasonId> {
        let mut ids: BTreeSet<SeasonId> = self.seasons.keys().cloned().collect();
        ids.extend(self.matches.iter().map(|m| m.season.clone()));
        ids.extend(self.player_stats.iter().map(|s| s.season.clone()));
        ids.extend(self.rosters.iter().map(|r| r.season.clone()));

        let mut ids: Vec<SeasonId> = ids.into_iter().collect();
        ids.sort_by_key(|id| Reverse((self.season_sort_year(id), id.clone())));
        ids
    }

    /// Year used to order seasons chronologically, if one can be derived.
    pub fn season_sort_year(&self, id: &SeasonId) -> Option<i32> {
        match self.seasons.get(id) {
            Some(season) => Some(season.start_year),
            None => id.as_str().trim().parse().ok(),
        }
    }

    /// Teams that played the focus team at least once, sorted by name.
    pub fn opponents_of(&self, team: &TeamId) -> Vec<TeamId> {
        let opponents: BTreeSet<&TeamId> = self
            .matches
            .iter()
            .filter_map(|m| m.opponent_of(team))
            .collect();
        let mut opponents: Vec<TeamId> = opponents.into_iter().cloned().collect();
        opponents.sort_by_cached_key(|id| (self.team_name(id).to_lowercase(), id.clone()));
        opponents
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
            && self.player_stats.is_empty()
            && self.rosters.is_empty()
            && self.standings.is_empty()
    }
}
