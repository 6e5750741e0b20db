//! League tables computed from match results, plus the published tables
//! from the optional `Standings` sheet.
//!
//! Ranking, per (season, competition):
//! 1. points, descending
//! 2. goal difference, descending
//! 3. head-to-head among the teams still tied: points, then goal difference,
//!    counting only matches between those teams
//! 4. goals scored, descending
//! 5. team name, then team id
//!
//! Only scored matches count. The order is total, so recomputing over the
//! same matches always gives the same table.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use rinkstats_core::domain::{CompetitionId, Dataset, Match, SeasonId, TeamId};
use serde::{Deserialize, Serialize};

use crate::config::PointsScheme;
use crate::enrich::{Outcome, TeamResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub rank: usize,
    pub team: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingsRow {
    fn new(team: TeamId, team_name: String) -> Self {
        Self {
            rank: 0,
            team,
            team_name,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn add(&mut self, result: &TeamResult) {
        self.played += 1;
        self.goals_for += result.goals_for;
        self.goals_against += result.goals_against;
        self.points += result.points;
        match result.outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
    }
}

/// One computed league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub season: SeasonId,
    pub season_label: String,
    pub competition: Option<CompetitionId>,
    pub competition_name: String,
    pub stage: Option<String>,
    pub rows: Vec<StandingsRow>,
}

impl StandingsTable {
    pub fn position_of(&self, team: &TeamId) -> Option<&StandingsRow> {
        self.rows.iter().find(|r| r.team == *team)
    }
}

type GroupKey = (SeasonId, Option<CompetitionId>);

/// Compute a table for every (season, competition) present in `matches`.
///
/// Tables come newest season first, then by competition name.
pub fn compute_standings(ds: &Dataset, matches: &[&Match], scheme: &PointsScheme) -> Vec<StandingsTable> {
    let mut groups: BTreeMap<GroupKey, Vec<&Match>> = BTreeMap::new();
    for m in matches.iter().filter(|m| m.is_played()) {
        groups
            .entry((m.season.clone(), m.competition.clone()))
            .or_default()
            .push(m);
    }

    let mut tables: Vec<StandingsTable> = groups
        .into_iter()
        .map(|((season, competition), games)| {
            let rows = rank_group(ds, &games, scheme);
            StandingsTable {
                season_label: ds.season_label(&season),
                competition_name: competition
                    .as_ref()
                    .map(|c| ds.competition_name(c))
                    .unwrap_or_else(|| "Unknown".to_string()),
                stage: competition
                    .as_ref()
                    .and_then(|c| ds.competition_stage(c))
                    .map(str::to_string),
                season,
                competition,
                rows,
            }
        })
        .collect();

    tables.sort_by(|a, b| {
        ds.season_sort_year(&b.season)
            .cmp(&ds.season_sort_year(&a.season))
            .then_with(|| b.season.cmp(&a.season))
            .then_with(|| a.competition_name.cmp(&b.competition_name))
            .then_with(|| a.competition.cmp(&b.competition))
    });
    tables
}

/// Tally and rank one group of scored matches.
fn rank_group(ds: &Dataset, games: &[&Match], scheme: &PointsScheme) -> Vec<StandingsRow> {
    let mut rows = tally(ds, games, scheme, None);
    rows.sort_by(|a, b| {
        primary(a, b)
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team.cmp(&b.team))
    });

    // Re-order each run of teams level on points and goal difference.
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && primary(&rows[start], &rows[end]) == Ordering::Equal {
            end += 1;
        }
        if end - start > 1 {
            break_ties(ds, games, scheme, &mut rows[start..end]);
        }
        start = end;
    }

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

fn primary(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_diff().cmp(&a.goal_diff()))
}

fn break_ties(ds: &Dataset, games: &[&Match], scheme: &PointsScheme, tied: &mut [StandingsRow]) {
    let members: HashSet<TeamId> = tied.iter().map(|r| r.team.clone()).collect();
    let mini: HashMap<TeamId, StandingsRow> = tally(ds, games, scheme, Some(&members))
        .into_iter()
        .map(|r| (r.team.clone(), r))
        .collect();

    let h2h = |team: &TeamId| -> (u32, i64) {
        mini.get(team)
            .map(|r| (r.points, r.goal_diff()))
            .unwrap_or((0, 0))
    };

    tied.sort_by(|a, b| {
        let (pa, da) = h2h(&a.team);
        let (pb, db) = h2h(&b.team);
        pb.cmp(&pa)
            .then_with(|| db.cmp(&da))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team.cmp(&b.team))
    });
}

/// Aggregate scored matches per team. With `only`, count just the matches
/// played between members of that set.
fn tally(
    ds: &Dataset,
    games: &[&Match],
    scheme: &PointsScheme,
    only: Option<&HashSet<TeamId>>,
) -> Vec<StandingsRow> {
    let mut rows: BTreeMap<TeamId, StandingsRow> = BTreeMap::new();
    for m in games {
        if let Some(set) = only {
            if !set.contains(&m.home) || !set.contains(&m.away) {
                continue;
            }
        }
        for team in [&m.home, &m.away] {
            let Some((gf, ga)) = m.goals_for_against(team) else {
                continue;
            };
            rows.entry(team.clone())
                .or_insert_with(|| StandingsRow::new(team.clone(), ds.team_name(team)))
                .add(&TeamResult::new(gf, ga, scheme));
        }
    }
    rows.into_values().collect()
}

// ─── Published tables ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRow {
    pub rank: u32,
    pub team: TeamId,
    pub team_name: String,
    pub games: Option<u32>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedTable {
    pub season: SeasonId,
    pub season_label: String,
    pub competition: CompetitionId,
    pub competition_name: String,
    pub stage: Option<String>,
    pub rows: Vec<PublishedRow>,
}

/// Official tables for the admitted seasons, grouped by season and
/// competition, rows by rank.
pub fn published_tables(ds: &Dataset, admits: impl Fn(&SeasonId) -> bool) -> Vec<PublishedTable> {
    let mut groups: BTreeMap<(SeasonId, CompetitionId), Vec<PublishedRow>> = BTreeMap::new();
    for s in ds.standings.iter().filter(|s| admits(&s.season)) {
        groups
            .entry((s.season.clone(), s.competition.clone()))
            .or_default()
            .push(PublishedRow {
                rank: s.rank,
                team: s.team.clone(),
                team_name: ds.team_name(&s.team),
                games: s.games,
                wins: s.wins,
                draws: s.draws,
                losses: s.losses,
                goals_for: s.goals_for,
                goals_against: s.goals_against,
                points: s.points,
            });
    }

    let mut tables: Vec<PublishedTable> = groups
        .into_iter()
        .map(|((season, competition), mut rows)| {
            rows.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.team.cmp(&b.team)));
            PublishedTable {
                season_label: ds.season_label(&season),
                competition_name: ds.competition_name(&competition),
                stage: ds.competition_stage(&competition).map(str::to_string),
                season,
                competition,
                rows,
            }
        })
        .collect();
    tables.sort_by(|a, b| {
        ds.season_sort_year(&b.season)
            .cmp(&ds.season_sort_year(&a.season))
            .then_with(|| b.season.cmp(&a.season))
            .then_with(|| a.competition_name.cmp(&b.competition_name))
    });
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinkstats_core::domain::{MatchId, PublishedStanding, Score};

    fn dataset(teams: &[(&str, &str)]) -> Dataset {
        let mut ds = Dataset::default();
        for (id, name) in teams {
            ds.teams.insert(TeamId::new(*id), name.to_string());
        }
        ds
    }

    fn game(id: usize, season: &str, home: &str, away: &str, hg: u32, ag: u32) -> Match {
        Match {
            id: MatchId::new(format!("M{id}")),
            season: SeasonId::new(season),
            date: None,
            competition: Some(CompetitionId::new("C1")),
            home: TeamId::new(home),
            away: TeamId::new(away),
            score: Some(Score::new(hg, ag)),
            venue: None,
        }
    }

    fn order(table: &StandingsTable) -> Vec<&str> {
        table.rows.iter().map(|r| r.team.as_str()).collect()
    }

    #[test]
    fn more_points_rank_higher() {
        let ds = dataset(&[("A", "Alpha"), ("B", "Bravo"), ("X", "Xray")]);
        let mut games = Vec::new();
        let mut id = 0;
        // A: 10 W / 2 L, B: 8 W / 4 L, all against X
        for (team, wins, losses) in [("A", 10, 2), ("B", 8, 4)] {
            for i in 0..(wins + losses) {
                id += 1;
                let season = if i % 2 == 0 { "2019" } else { "2020" };
                let (hg, ag) = if i < wins { (3, 1) } else { (1, 3) };
                games.push(game(id, season, team, "X", hg, ag));
            }
        }
        let refs: Vec<&Match> = games.iter().collect();
        let scheme = PointsScheme::default();

        for table in compute_standings(&ds, &refs, &scheme) {
            let a = table.position_of(&TeamId::new("A")).unwrap();
            let b = table.position_of(&TeamId::new("B")).unwrap();
            assert!(a.rank < b.rank, "season {}", table.season);
        }

        // Same competition across both seasons as a single group.
        let merged: Vec<Match> = games
            .iter()
            .cloned()
            .map(|mut m| {
                m.season = SeasonId::new("all");
                m
            })
            .collect();
        let refs: Vec<&Match> = merged.iter().collect();
        let table = &compute_standings(&ds, &refs, &scheme)[0];
        assert_eq!(order(table), ["A", "B", "X"]);
        let a = &table.rows[0];
        assert_eq!((a.won, a.lost, a.points), (10, 2, 20));
        assert_eq!(table.rows[1].points, 16);
    }

    #[test]
    fn goal_difference_breaks_points_tie() {
        let ds = dataset(&[("A", "Alpha"), ("B", "Bravo"), ("C", "Charlie")]);
        let games = [
            game(1, "2020", "A", "C", 5, 0),
            game(2, "2020", "B", "C", 1, 0),
        ];
        let refs: Vec<&Match> = games.iter().collect();
        let table = &compute_standings(&ds, &refs, &PointsScheme::default())[0];
        assert_eq!(order(table), ["A", "B", "C"]);
    }

    #[test]
    fn head_to_head_breaks_points_and_goal_difference_tie() {
        // B beat A head to head; both end on 3 points and +1.
        let ds = dataset(&[("A", "Alpha"), ("B", "Bravo"), ("C", "Charlie")]);
        let games = [
            game(1, "2020", "B", "A", 2, 1),
            game(2, "2020", "A", "C", 3, 1),
            game(3, "2020", "C", "B", 1, 1),
            game(4, "2020", "C", "A", 0, 0),
        ];
        let refs: Vec<&Match> = games.iter().collect();
        let table = &compute_standings(&ds, &refs, &PointsScheme::default())[0];
        let a = table.position_of(&TeamId::new("A")).unwrap();
        let b = table.position_of(&TeamId::new("B")).unwrap();
        assert_eq!((a.points, a.goal_diff()), (b.points, b.goal_diff()));
        assert!(b.rank < a.rank);
    }

    #[test]
    fn unscored_matches_do_not_count() {
        let ds = dataset(&[("A", "Alpha"), ("B", "Bravo")]);
        let mut postponed = game(1, "2020", "A", "B", 0, 0);
        postponed.score = None;
        let refs = vec![&postponed];
        assert!(compute_standings(&ds, &refs, &PointsScheme::default()).is_empty());
    }

    #[test]
    fn recomputation_is_identical() {
        let ds = dataset(&[("A", "Alpha"), ("B", "Bravo"), ("C", "Charlie")]);
        let games = [
            game(1, "2020", "A", "B", 1, 1),
            game(2, "2020", "B", "C", 1, 1),
            game(3, "2020", "C", "A", 1, 1),
        ];
        let refs: Vec<&Match> = games.iter().collect();
        let first = compute_standings(&ds, &refs, &PointsScheme::default());
        let second = compute_standings(&ds, &refs, &PointsScheme::default());
        assert_eq!(first, second);
        // Fully level: name decides.
        assert_eq!(order(&first[0]), ["A", "B", "C"]);
    }

    #[test]
    fn published_tables_sorted_by_rank() {
        let mut ds = dataset(&[("A", "Alpha"), ("B", "Bravo")]);
        for (id, team, rank) in [("1", "B", 1), ("2", "A", 2)] {
            ds.standings.push(PublishedStanding {
                id: id.into(),
                season: SeasonId::new("2020"),
                competition: CompetitionId::new("C1"),
                team: TeamId::new(team),
                rank,
                games: None,
                wins: None,
                draws: None,
                losses: None,
                goals_for: None,
                goals_against: None,
                points: Some(10 - rank),
            });
        }
        let tables = published_tables(&ds, |_| true);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0].team_name, "Bravo");
        assert!(published_tables(&ds, |s| s.as_str() == "2019").is_empty());
    }
}
