//! Player leaderboard over the filtered match set.
//!
//! Which `PlayerSeasonStats` rows count:
//! - per-match rows (with `match_id`) when their match passed the filter;
//! - season-aggregate rows when their season and team pass the filter and no
//!   opponent or venue restriction is active, since an aggregate cannot be
//!   split by fixture.
//!
//! Entries are ranked by the chosen stat, descending, then by player name
//! and id. The order does not depend on the order of the input rows.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rinkstats_core::domain::{Dataset, Match, MatchId, PlayerId, PlayerStat, SeasonId, TeamId};
use serde::{Deserialize, Serialize};

use crate::filter::MatchFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[default]
    Points,
    Goals,
    Assists,
    PenaltyMinutes,
    Games,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Points,
        StatKind::Goals,
        StatKind::Assists,
        StatKind::PenaltyMinutes,
        StatKind::Games,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Points => "Points",
            StatKind::Goals => "Goals",
            StatKind::Assists => "Assists",
            StatKind::PenaltyMinutes => "PIM",
            StatKind::Games => "Games",
        }
    }

    pub fn next(self) -> StatKind {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for StatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" | "p" => Ok(StatKind::Points),
            "goals" | "g" => Ok(StatKind::Goals),
            "assists" | "a" => Ok(StatKind::Assists),
            "pim" | "penalties" | "penalty_minutes" => Ok(StatKind::PenaltyMinutes),
            "games" | "gp" => Ok(StatKind::Games),
            other => Err(format!(
                "unknown stat '{other}' (expected points, goals, assists, pim or games)"
            )),
        }
    }
}

/// Summed counting stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub games: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub penalty_minutes: u32,
}

impl PlayerTotals {
    pub fn add(&mut self, row: &PlayerStat) {
        self.games += row.games_played();
        self.goals += row.goals;
        self.assists += row.assists;
        self.points += row.points;
        self.penalty_minutes += row.penalty_minutes;
    }

    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Points => self.points,
            StatKind::Goals => self.goals,
            StatKind::Assists => self.assists,
            StatKind::PenaltyMinutes => self.penalty_minutes,
            StatKind::Games => self.games,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Position in the full ranking, before search and cut.
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub seasons: usize,
    pub totals: PlayerTotals,
    pub goals_per_season: f64,
    pub assists_per_season: f64,
    pub points_per_season: f64,
}

impl LeaderboardEntry {
    pub fn value(&self, stat: StatKind) -> u32 {
        self.totals.get(stat)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub stat: StatKind,
    /// Maximum entries returned; 0 means no cut.
    pub limit: usize,
    /// Case-insensitive substring of the player name.
    pub search: Option<String>,
}

/// Stat rows that belong to the filtered view.
pub fn select_stat_rows<'a>(
    stats: &'a [PlayerStat],
    filter: &MatchFilter,
    admitted: &[&Match],
) -> Vec<&'a PlayerStat> {
    let admitted: HashSet<&MatchId> = admitted.iter().map(|m| &m.id).collect();
    let aggregates_allowed = !filter.restricts_fixtures();
    stats
        .iter()
        .filter(|s| {
            if !filter.admits_season(&s.season) {
                return false;
            }
            if let Some(team) = &filter.team {
                if s.team != *team {
                    return false;
                }
            }
            match &s.match_id {
                Some(id) => admitted.contains(id),
                None => aggregates_allowed,
            }
        })
        .collect()
}

/// Aggregate, rank, search and cut.
pub fn build_leaderboard(ds: &Dataset, rows: &[&PlayerStat], query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
    let mut per_player: BTreeMap<&PlayerId, (PlayerTotals, BTreeSet<&SeasonId>)> = BTreeMap::new();
    for row in rows {
        let (totals, seasons) = per_player.entry(&row.player).or_default();
        totals.add(row);
        seasons.insert(&row.season);
    }

    let mut entries: Vec<LeaderboardEntry> = per_player
        .into_iter()
        .map(|(player, (totals, seasons))| {
            let n = seasons.len().max(1) as f64;
            LeaderboardEntry {
                rank: 0,
                player: player.clone(),
                name: ds.players.display_name(player),
                seasons: seasons.len(),
                totals,
                goals_per_season: round2(f64::from(totals.goals) / n),
                assists_per_season: round2(f64::from(totals.assists) / n),
                points_per_season: round2(f64::from(totals.points) / n),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value(query.stat)
            .cmp(&a.value(query.stat))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player.cmp(&b.player))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    if let Some(needle) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        entries.retain(|e| e.name.to_lowercase().contains(&needle));
    }
    if query.limit > 0 {
        entries.truncate(query.limit);
    }
    entries
}

/// One season of a player's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonLine {
    pub season: SeasonId,
    pub season_label: String,
    pub team: TeamId,
    pub team_name: String,
    pub totals: PlayerTotals,
}

/// Per-season totals for one player, newest season first.
pub fn player_breakdown(ds: &Dataset, rows: &[&PlayerStat], player: &PlayerId) -> Vec<SeasonLine> {
    let mut lines: BTreeMap<(&SeasonId, &TeamId), PlayerTotals> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.player == *player) {
        lines.entry((&row.season, &row.team)).or_default().add(row);
    }
    let mut lines: Vec<SeasonLine> = lines
        .into_iter()
        .map(|((season, team), totals)| SeasonLine {
            season: season.clone(),
            season_label: ds.season_label(season),
            team: team.clone(),
            team_name: ds.team_name(team),
            totals,
        })
        .collect();
    lines.sort_by(|a, b| {
        ds.season_sort_year(&b.season)
            .cmp(&ds.season_sort_year(&a.season))
            .then_with(|| b.season.cmp(&a.season))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    lines
}

/// Heading for the selected seasons: `All Time`, one label, or a range.
pub fn period_label(ds: &Dataset, seasons: &BTreeSet<SeasonId>) -> String {
    let mut ordered: Vec<&SeasonId> = seasons.iter().collect();
    ordered.sort_by_key(|s| (ds.season_sort_year(s), (*s).clone()));
    match ordered.as_slice() {
        [] => "All Time".to_string(),
        [only] => ds.season_label(only),
        [first, .., last] => format!("{} – {}", ds.season_label(first), ds.season_label(last)),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
