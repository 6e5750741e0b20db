//! Squad composition from the `Rosters` sheet.

use std::collections::{BTreeMap, BTreeSet};

use rinkstats_core::domain::{Dataset, PlayerId, RosterEntry, SeasonId};
use serde::{Deserialize, Serialize};

use crate::filter::MatchFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    Goalkeeper,
    Skater,
    Staff,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 3] = [RoleCategory::Goalkeeper, RoleCategory::Skater, RoleCategory::Staff];

    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::Goalkeeper => "Goalkeepers",
            RoleCategory::Skater => "Skaters",
            RoleCategory::Staff => "Staff",
        }
    }

    /// The staff flag wins over whatever the role text says.
    pub fn of(entry: &RosterEntry) -> Self {
        if entry.is_staff {
            return RoleCategory::Staff;
        }
        let role = entry.role.to_lowercase();
        if ["toimihenkilö", "staff", "valmentaja", "coach"]
            .iter()
            .any(|k| role.contains(k))
        {
            RoleCategory::Staff
        } else if ["maalivahti", "goalie", "goalkeeper"]
            .iter()
            .any(|k| role.contains(k))
            || role.split(|c: char| !c.is_alphanumeric()).any(|w| w == "mv")
        {
            RoleCategory::Goalkeeper
        } else {
            RoleCategory::Skater
        }
    }
}

/// Roster rows for the selected seasons and focus team. Opponent and venue
/// do not apply to squads.
pub fn select_roster_rows<'a>(rosters: &'a [RosterEntry], filter: &MatchFilter) -> Vec<&'a RosterEntry> {
    rosters
        .iter()
        .filter(|r| filter.admits_season(&r.season))
        .filter(|r| filter.team.as_ref().map_or(true, |t| r.team == *t))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadSize {
    pub season: SeasonId,
    pub season_label: String,
    pub players: usize,
    pub staff: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veteran {
    pub player: PlayerId,
    pub name: String,
    pub seasons: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub unique_players: usize,
    pub goalkeepers: usize,
    pub skaters: usize,
    pub staff: usize,
    /// Oldest season first.
    pub squads: Vec<SquadSize>,
    pub average_squad: f64,
    pub largest_squad: usize,
    pub most_seasons: Vec<Veteran>,
}

pub fn roster_summary(ds: &Dataset, entries: &[&RosterEntry], top: usize) -> RosterSummary {
    let mut by_category: BTreeMap<RoleCategory, BTreeSet<&PlayerId>> = BTreeMap::new();
    let mut by_season: BTreeMap<&SeasonId, (BTreeSet<&PlayerId>, BTreeSet<&PlayerId>)> = BTreeMap::new();
    let mut seasons_of: BTreeMap<&PlayerId, BTreeSet<&SeasonId>> = BTreeMap::new();
    let mut unique: BTreeSet<&PlayerId> = BTreeSet::new();

    for e in entries {
        let category = RoleCategory::of(e);
        by_category.entry(category).or_default().insert(&e.player);
        let (players, staff) = by_season.entry(&e.season).or_default();
        if category == RoleCategory::Staff {
            staff.insert(&e.player);
        } else {
            players.insert(&e.player);
            seasons_of.entry(&e.player).or_default().insert(&e.season);
            unique.insert(&e.player);
        }
    }

    let mut squads: Vec<SquadSize> = by_season
        .into_iter()
        .map(|(season, (players, staff))| SquadSize {
            season: season.clone(),
            season_label: ds.season_label(season),
            players: players.len(),
            staff: staff.len(),
        })
        .collect();
    squads.sort_by_key(|s| (ds.season_sort_year(&s.season), s.season.clone()));

    let average_squad = if squads.is_empty() {
        0.0
    } else {
        let total: usize = squads.iter().map(|s| s.players).sum();
        ((total as f64 / squads.len() as f64) * 10.0).round() / 10.0
    };

    let mut most_seasons: Vec<Veteran> = seasons_of
        .into_iter()
        .map(|(player, seasons)| Veteran {
            player: player.clone(),
            name: ds.players.display_name(player),
            seasons: seasons.len(),
        })
        .collect();
    most_seasons.sort_by(|a, b| {
        b.seasons
            .cmp(&a.seasons)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player.cmp(&b.player))
    });
    most_seasons.truncate(top);

    let count = |c: RoleCategory| by_category.get(&c).map_or(0, BTreeSet::len);
    RosterSummary {
        unique_players: unique.len(),
        goalkeepers: count(RoleCategory::Goalkeeper),
        skaters: count(RoleCategory::Skater),
        staff: count(RoleCategory::Staff),
        largest_squad: squads.iter().map(|s| s.players).max().unwrap_or(0),
        average_squad,
        squads,
        most_seasons,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterLine {
    pub player: PlayerId,
    pub name: String,
    pub season: SeasonId,
    pub role: String,
    pub category: RoleCategory,
    pub jersey_number: Option<u32>,
}

/// Roster rows as display lines: by category, then jersey number
/// (unnumbered last), then name.
pub fn roster_lines(ds: &Dataset, entries: &[&RosterEntry]) -> Vec<RosterLine> {
    let mut lines: Vec<RosterLine> = entries
        .iter()
        .map(|e| RosterLine {
            player: e.player.clone(),
            name: ds.players.display_name(&e.player),
            season: e.season.clone(),
            role: e.role.clone(),
            category: RoleCategory::of(e),
            jersey_number: e.jersey_number,
        })
        .collect();
    lines.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.jersey_number.is_none().cmp(&b.jersey_number.is_none()))
            .then_with(|| a.jersey_number.cmp(&b.jersey_number))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| b.season.cmp(&a.season))
    });
    lines
}
