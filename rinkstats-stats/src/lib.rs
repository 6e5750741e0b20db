//! rinkstats stats: everything derived from the loaded base tables.
//!
//! This crate builds on `rinkstats-core` to provide:
//! - Match filters (season, opponent, home/away)
//! - Team-perspective enrichment of match rows
//! - League tables with head-to-head tie-breaks, and the published tables
//! - Cumulative trend series, team summary, form and opponent records
//! - Player leaderboard and roster composition
//! - The dashboard view model, pagination and CSV/JSON export
//! - Dashboard configuration (`rinkstats.toml`)

pub mod config;
pub mod enrich;
pub mod export;
pub mod filter;
pub mod leaderboard;
pub mod roster;
pub mod standings;
pub mod summary;
pub mod trend;
pub mod view;

#[cfg(test)]
mod test_helpers;

pub use config::{ConfigError, DashboardConfig, PointsScheme};
pub use enrich::{enrich_match, enrich_matches, MatchView, Outcome, Perspective, TeamResult};
pub use filter::{MatchFilter, Venue};
pub use leaderboard::{build_leaderboard, LeaderboardEntry, LeaderboardQuery, StatKind};
pub use roster::{RoleCategory, RosterSummary};
pub use standings::{compute_standings, published_tables, PublishedTable, StandingsRow, StandingsTable};
pub use summary::{OpponentRecord, TeamSummary};
pub use trend::{cumulative_trend, TrendMetric, TrendPoint};
pub use view::{
    resolve_focus, Dashboard, DashboardRequest, DashboardView, FilterError, FilterOptions,
    FilterSelection, MatchListView, Paginated, ViewState, NO_DATA,
};
