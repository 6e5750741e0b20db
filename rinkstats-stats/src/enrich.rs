//! Joined match rows: names resolved, and results seen from the focus team.

use chrono::NaiveDate;
use rinkstats_core::domain::{Dataset, Match, MatchId, Score, SeasonId, Side, TeamId};
use serde::{Deserialize, Serialize};

use crate::config::PointsScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    /// `W`, `D` or `L`.
    pub fn code(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Draw => "D",
            Outcome::Loss => "L",
        }
    }

    pub fn points(self, scheme: &PointsScheme) -> u32 {
        match self {
            Outcome::Win => scheme.win,
            Outcome::Draw => scheme.draw,
            Outcome::Loss => scheme.loss,
        }
    }
}

/// Result of a played match for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResult {
    pub goals_for: u32,
    pub goals_against: u32,
    pub outcome: Outcome,
    pub points: u32,
}

impl TeamResult {
    pub fn new(goals_for: u32, goals_against: u32, scheme: &PointsScheme) -> Self {
        let outcome = Outcome::from_goals(goals_for, goals_against);
        Self {
            goals_for,
            goals_against,
            outcome,
            points: outcome.points(scheme),
        }
    }

    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// A match seen from the focus team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    pub opponent: TeamId,
    pub opponent_name: String,
    pub side: Side,
    /// `None` until the match has a score.
    pub result: Option<TeamResult>,
}

/// A match row with every id resolved to a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub season: SeasonId,
    pub season_label: String,
    pub date: Option<NaiveDate>,
    pub competition: Option<String>,
    pub stage: Option<String>,
    pub home: TeamId,
    pub home_name: String,
    pub away: TeamId,
    pub away_name: String,
    pub score: Option<Score>,
    pub venue: Option<String>,
    pub perspective: Option<Perspective>,
}

impl MatchView {
    pub fn result(&self) -> Option<&TeamResult> {
        self.perspective.as_ref().and_then(|p| p.result.as_ref())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.result().map(|r| r.outcome)
    }

    pub fn score_text(&self) -> String {
        match self.score {
            Some(s) => format!("{}-{}", s.home, s.away),
            None => "-".to_string(),
        }
    }

    pub fn date_text(&self) -> String {
        self.date.map(|d| d.to_string()).unwrap_or_default()
    }
}

/// Resolve names and, when `team` took part, compute its perspective.
pub fn enrich_match(ds: &Dataset, m: &Match, team: Option<&TeamId>, scheme: &PointsScheme) -> MatchView {
    let perspective = team.and_then(|team| {
        let side = m.side_of(team)?;
        let opponent = m.opponent_of(team)?.clone();
        Some(Perspective {
            opponent_name: ds.team_name(&opponent),
            opponent,
            side,
            result: m
                .goals_for_against(team)
                .map(|(gf, ga)| TeamResult::new(gf, ga, scheme)),
        })
    });

    MatchView {
        id: m.id.clone(),
        season: m.season.clone(),
        season_label: ds.season_label(&m.season),
        date: m.date,
        competition: m.competition.as_ref().map(|c| ds.competition_name(c)),
        stage: m
            .competition
            .as_ref()
            .and_then(|c| ds.competition_stage(c))
            .map(str::to_string),
        home: m.home.clone(),
        home_name: ds.team_name(&m.home),
        away: m.away.clone(),
        away_name: ds.team_name(&m.away),
        score: m.score,
        venue: m.venue.clone(),
        perspective,
    }
}

pub fn enrich_matches(
    ds: &Dataset,
    matches: &[&Match],
    team: Option<&TeamId>,
    scheme: &PointsScheme,
) -> Vec<MatchView> {
    matches
        .iter()
        .map(|m| enrich_match(ds, m, team, scheme))
        .collect()
}
