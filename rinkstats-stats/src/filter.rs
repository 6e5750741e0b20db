//! Match filters: pure predicates applied before any aggregation.

use std::collections::BTreeSet;

use rinkstats_core::domain::{Match, SeasonId, Side, TeamId};
use serde::{Deserialize, Serialize};

/// Home/away restriction relative to the focus team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    #[default]
    All,
    Home,
    Away,
}

impl Venue {
    pub const ALL: [Venue; 3] = [Venue::All, Venue::Home, Venue::Away];

    pub fn label(self) -> &'static str {
        match self {
            Venue::All => "All",
            Venue::Home => "Home",
            Venue::Away => "Away",
        }
    }

    pub fn next(self) -> Venue {
        match self {
            Venue::All => Venue::Home,
            Venue::Home => Venue::Away,
            Venue::Away => Venue::All,
        }
    }

    fn admits(self, side: Side) -> bool {
        match self {
            Venue::All => true,
            Venue::Home => side == Side::Home,
            Venue::Away => side == Side::Away,
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Venue::All),
            "home" | "h" => Ok(Venue::Home),
            "away" | "a" => Ok(Venue::Away),
            other => Err(format!("unknown venue '{other}' (expected home, away or all)")),
        }
    }
}

/// Which matches a view covers.
///
/// - `seasons`: match season is in the set; an empty set admits every season.
/// - `team`: the match involves the focus team.
/// - `opponent`: the match is between the focus team and this opponent
///   (without a focus team: the match involves the opponent).
/// - `venue`: the focus team played at home / away; ignored without a focus team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFilter {
    pub seasons: BTreeSet<SeasonId>,
    pub team: Option<TeamId>,
    pub opponent: Option<TeamId>,
    pub venue: Venue,
}

impl MatchFilter {
    /// Admits every match.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_team(team: TeamId) -> Self {
        Self {
            team: Some(team),
            ..Self::default()
        }
    }

    pub fn with_seasons(mut self, seasons: impl IntoIterator<Item = SeasonId>) -> Self {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn with_opponent(mut self, opponent: TeamId) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn with_venue(mut self, venue: Venue) -> Self {
        self.venue = venue;
        self
    }

    /// Only the season part of this filter, for views that need whole
    /// competitions (standings).
    pub fn seasons_only(&self) -> Self {
        Self {
            seasons: self.seasons.clone(),
            ..Self::default()
        }
    }

    /// True when the filter narrows by fixture (opponent or venue), which
    /// season-aggregate rows cannot be attributed to.
    pub fn restricts_fixtures(&self) -> bool {
        self.opponent.is_some() || (self.team.is_some() && self.venue != Venue::All)
    }

    pub fn admits_season(&self, season: &SeasonId) -> bool {
        self.seasons.is_empty() || self.seasons.contains(season)
    }

    pub fn matches(&self, m: &Match) -> bool {
        if !self.admits_season(&m.season) {
            return false;
        }
        match &self.team {
            Some(team) => {
                let Some(side) = m.side_of(team) else {
                    return false;
                };
                if let Some(opponent) = &self.opponent {
                    if m.opponent_of(team) != Some(opponent) {
                        return false;
                    }
                }
                self.venue.admits(side)
            }
            None => match &self.opponent {
                Some(opponent) => m.involves(opponent),
                None => true,
            },
        }
    }

    /// Matches admitted by the filter, in input order.
    pub fn apply<'a>(&self, matches: &'a [Match]) -> Vec<&'a Match> {
        matches.iter().filter(|m| self.matches(m)).collect()
    }
}
