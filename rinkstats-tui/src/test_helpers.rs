//! Test helpers: a two-season club workbook built in memory.

use std::path::PathBuf;
use std::sync::Arc;

use rinkstats_core::data::{build_dataset, LoadedWorkbook, RawSheet, RawWorkbook};
use rinkstats_stats::DashboardConfig;

use crate::app::AppState;

pub fn club_workbook() -> RawWorkbook {
    RawWorkbook::new()
        .with_sheet(RawSheet::from_text(
            "Teams",
            &["team_id", "team_name"],
            &[
                vec!["T1", "Mailajoket"],
                vec!["T2", "Kiekko-Veikot"],
                vec!["T3", "HC Kotka"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Seasons",
            &["season_id", "start_year", "end_year"],
            &[vec!["2019", "2019", "2020"], vec!["2020", "2020", "2021"]],
        ))
        .with_sheet(RawSheet::from_text(
            "Matches",
            &[
                "match_id",
                "season_id",
                "date",
                "home_team_id",
                "away_team_id",
                "home_goals",
                "away_goals",
            ],
            &[
                vec!["M1", "2019", "2019-10-05", "T1", "T2", "3", "1"],
                vec!["M2", "2019", "2019-11-02", "T3", "T1", "2", "2"],
                vec!["M3", "2020", "2020-10-03", "T1", "T3", "4", "2"],
                vec!["M4", "2020", "2020-10-24", "T2", "T1", "3", "1"],
                vec!["M5", "2020", "2020-11-07", "T2", "T3", "1", "1"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Players",
            &["player_id", "full_name"],
            &[vec!["P1", "Aino Virtanen"], vec!["P2", "Mikko Koskinen"]],
        ))
        .with_sheet(RawSheet::from_text(
            "PlayerSeasonStats",
            &["stat_id", "season_id", "team_id", "player_id", "goals", "assists", "points"],
            &[
                vec!["S1", "2019", "T1", "P1", "4", "2", "6"],
                vec!["S2", "2020", "T1", "P2", "8", "1", "9"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Rosters",
            &["roster_id", "season_id", "team_id", "player_id", "role"],
            &[
                vec!["R1", "2019", "T1", "P1", "Hyökkääjä"],
                vec!["R2", "2020", "T1", "P2", "Maalivahti"],
            ],
        ))
}

pub fn club_loaded() -> Arc<LoadedWorkbook> {
    Arc::new(build_dataset(&club_workbook()).unwrap())
}

/// App with the club workbook installed and the default config.
pub fn app_with_club() -> AppState {
    let mut app = AppState::new(DashboardConfig::default(), PathBuf::from("exports"));
    app.install(club_loaded());
    app
}
