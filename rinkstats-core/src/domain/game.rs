use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CompetitionId, MatchId, SeasonId, TeamId};

/// Final score of a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

/// Natural identity of a match: two rows with the same key are the same game.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchKey {
    pub season: SeasonId,
    pub date: Option<NaiveDate>,
    pub home: TeamId,
    pub away: TeamId,
}

/// Which side of a fixture a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Home => "Home",
            Side::Away => "Away",
        }
    }
}

/// One row of the `Matches` sheet. Immutable once loaded.
///
/// `score` is `None` for postponed or not-yet-played games; `date` is `None`
/// when the cell was blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub season: SeasonId,
    pub date: Option<NaiveDate>,
    pub competition: Option<CompetitionId>,
    pub home: TeamId,
    pub away: TeamId,
    pub score: Option<Score>,
    pub venue: Option<String>,
}

impl Match {
    pub fn key(&self) -> MatchKey {
        MatchKey {
            season: self.season.clone(),
            date: self.date,
            home: self.home.clone(),
            away: self.away.clone(),
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, team: &TeamId) -> bool {
        self.home == *team || self.away == *team
    }

    /// Side `team` played on, or `None` if it did not take part.
    pub fn side_of(&self, team: &TeamId) -> Option<Side> {
        if self.home == *team {
            Some(Side::Home)
        } else if self.away == *team {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, team: &TeamId) -> Option<&TeamId> {
        match self.side_of(team)? {
            Side::Home => Some(&self.away),
            Side::Away => Some(&self.home),
        }
    }

    /// Goals scored and conceded by `team`, if it played and the game has a score.
    pub fn goals_for_against(&self, team: &TeamId) -> Option<(u32, u32)> {
        let score = self.score?;
        match self.side_of(team)? {
            Side::Home => Some((score.home, score.away)),
            Side::Away => Some((score.away, score.home)),
        }
    }

    /// Display form of the score, `"-"` when unplayed.
    pub fn result_text(&self) -> String {
        match self.score {
            Some(s) => format!("{}-{}", s.home, s.away),
            None => "-".to_string(),
        }
    }
}

/// Chronological order: dated matches ascending, undated last, ties by id.
pub fn chronological(a: &Match, b: &Match) -> std::cmp::Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}
