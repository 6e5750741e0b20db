//! Cumulative series for the chart pane.

use chrono::NaiveDate;
use rinkstats_core::domain::MatchId;
use serde::{Deserialize, Serialize};

use crate::enrich::{MatchView, Outcome, TeamResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendMetric {
    #[default]
    Points,
    Wins,
    Draws,
    Losses,
    GoalsFor,
    GoalsAgainst,
    GoalDiff,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 7] = [
        TrendMetric::Points,
        TrendMetric::Wins,
        TrendMetric::Draws,
        TrendMetric::Losses,
        TrendMetric::GoalsFor,
        TrendMetric::GoalsAgainst,
        TrendMetric::GoalDiff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrendMetric::Points => "Points",
            TrendMetric::Wins => "Wins",
            TrendMetric::Draws => "Draws",
            TrendMetric::Losses => "Losses",
            TrendMetric::GoalsFor => "Goals for",
            TrendMetric::GoalsAgainst => "Goals against",
            TrendMetric::GoalDiff => "Goal difference",
        }
    }

    pub fn next(self) -> TrendMetric {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn value(self, r: &TeamResult) -> i64 {
        let hit = |o: Outcome| i64::from(r.outcome == o);
        match self {
            TrendMetric::Points => i64::from(r.points),
            TrendMetric::Wins => hit(Outcome::Win),
            TrendMetric::Draws => hit(Outcome::Draw),
            TrendMetric::Losses => hit(Outcome::Loss),
            TrendMetric::GoalsFor => i64::from(r.goals_for),
            TrendMetric::GoalsAgainst => i64::from(r.goals_against),
            TrendMetric::GoalDiff => r.goal_diff(),
        }
    }
}

impl std::str::FromStr for TrendMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "points" | "pts" => Ok(TrendMetric::Points),
            "wins" | "w" => Ok(TrendMetric::Wins),
            "draws" | "d" => Ok(TrendMetric::Draws),
            "losses" | "l" => Ok(TrendMetric::Losses),
            "goals_for" | "gf" => Ok(TrendMetric::GoalsFor),
            "goals_against" | "ga" => Ok(TrendMetric::GoalsAgainst),
            "goal_diff" | "gd" => Ok(TrendMetric::GoalDiff),
            other => Err(format!(
                "unknown trend metric '{other}' (expected points, wins, draws, losses, gf, ga or gd)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based position in the series.
    pub index: usize,
    pub date: NaiveDate,
    pub match_id: MatchId,
    pub value: i64,
    pub cumulative: i64,
}

/// Running total of `metric` over dated, scored matches in date order.
///
/// `matches` must carry a focus-team perspective; rows without one are
/// skipped like unscored ones.
pub fn cumulative_trend(matches: &[MatchView], metric: TrendMetric) -> Vec<TrendPoint> {
    let mut rows: Vec<(NaiveDate, &MatchView, &TeamResult)> = matches
        .iter()
        .filter_map(|m| Some((m.date?, m, m.result()?)))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

    let mut total = 0;
    rows.into_iter()
        .enumerate()
        .map(|(i, (date, m, r))| {
            let value = metric.value(r);
            total += value;
            TrendPoint {
                index: i + 1,
                date,
                match_id: m.id.clone(),
                value,
                cumulative: total,
            }
        })
        .collect()
}
