//! Domain types for club statistics

pub mod dataset;
pub mod game;
pub mod ids;
pub mod league;
pub mod people;

pub use dataset::Dataset;
pub use game::{chronological, Match, MatchKey, Score, Side};
pub use ids::{CompetitionId, DatasetHash, MatchId, PlayerId, SeasonId, TeamId};
pub use league::{Competition, PublishedStanding, Season, TeamRegistry};
pub use people::{PlayerRegistry, PlayerStat, RosterEntry};
