//! rinkstats TUI: tabbed terminal dashboard over the club workbook.
//!
//! Tabs:
//! - Summary: record, form, opponent records and the cumulative trend chart
//! - Matches: paged match list
//! - Standings: computed or published league tables
//! - Players: leaderboard with stat cycling and name search
//! - Rosters: squad composition and roster list
//! - Help: keyboard shortcuts

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, Overlay, Panel, StatusLevel};

#[cfg(test)]
mod test_helpers;
