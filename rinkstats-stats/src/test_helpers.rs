//! Test helpers: a small club workbook built in memory.

use rinkstats_core::data::{build_dataset, RawSheet, RawWorkbook};
use rinkstats_core::domain::Dataset;

/// Team id of the focus club, "Mailajoket".
pub const US: &str = "T1";

/// Three seasons, three teams, one postponed match (M10).
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
            "TeamAliases",
            &["alias_name", "team_id"],
            &[vec!["KV", "T2"]],
        ))
        .with_sheet(RawSheet::from_text(
            "Seasons",
            &["season_id", "start_year", "end_year"],
            &[
                vec!["2019", "2019", "2020"],
                vec!["2020", "2020", "2021"],
                vec!["2021", "2021", "2022"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Competitions",
            &["competition_id", "competition_name", "season_id", "stage"],
            &[
                vec!["C19", "III-divisioona", "2019", "Runkosarja"],
                vec!["C20", "III-divisioona", "2020", "Runkosarja"],
                vec!["C21", "II-divisioona", "2021", "Runkosarja"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Matches",
            &[
                "match_id",
                "season_id",
                "date",
                "competition_id",
                "home_team_id",
                "away_team_id",
                "home_goals",
                "away_goals",
            ],
            &[
                vec!["M01", "2019", "2019-10-05", "C19", "T1", "T2", "3", "1"],
                vec!["M02", "2019", "2019-11-02", "C19", "T3", "T1", "2", "2"],
                vec!["M03", "2019", "2019-12-01", "C19", "T2", "T3", "0", "4"],
                vec!["M04", "2019", "2020-02-01", "C19", "T2", "T1", "1", "5"],
                vec!["M05", "2020", "2020-10-03", "C20", "T1", "T3", "4", "2"],
                vec!["M06", "2020", "2020-10-24", "C20", "T2", "T1", "3", "1"],
                vec!["M07", "2020", "2020-11-14", "C20", "T1", "T2", "2", "2"],
                vec!["M08", "2020", "2020-12-05", "C20", "T3", "T2", "1", "0"],
                vec!["M09", "2020", "2021-01-16", "C20", "T3", "T1", "0", "3"],
                vec!["M10", "2020", "2021-02-20", "C20", "T1", "T3", "", ""],
                vec!["M11", "2021", "2021-10-09", "C21", "T1", "T2", "6", "0"],
                vec!["M12", "2021", "2021-11-06", "C21", "T3", "T1", "2", "1"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Players",
            &["player_id", "full_name"],
            &[
                vec!["P1", "Aho Aatu"],
                vec!["P2", "Berg Bertta"],
                vec!["P3", "Cole Cecil"],
                vec!["P4", "Dahl Daniel"],
                vec!["P5", "Eskola Eero"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "PlayerSeasonStats",
            &[
                "stat_id",
                "season_id",
                "team_id",
                "player_id",
                "match_id",
                "goals",
                "assists",
                "penalty_minutes",
            ],
            &[
                vec!["S1", "2019", "T1", "P1", "", "10", "8", "4"],
                vec!["S2", "2019", "T1", "P2", "", "6", "3", "0"],
                vec!["S3", "2020", "T1", "P1", "", "7", "7", "2"],
                vec!["S4", "2020", "T1", "P3", "", "9", "2", "6"],
                vec!["S5", "2021", "T1", "P2", "", "1", "1", "0"],
                vec!["S6", "2021", "T1", "P1", "M11", "2", "1", "0"],
                vec!["S7", "2021", "T1", "P4", "M11", "3", "0", "0"],
                vec!["S8", "2021", "T1", "P3", "M12", "1", "0", "2"],
                vec!["S9", "2020", "T2", "P4", "", "5", "5", "0"],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Rosters",
            &[
                "roster_id",
                "season_id",
                "team_id",
                "player_id",
                "role",
                "jersey_number",
                "is_staff",
            ],
            &[
                vec!["R1", "2019", "T1", "P1", "Hyökkääjä", "17", ""],
                vec!["R2", "2019", "T1", "P2", "Puolustaja", "4", ""],
                vec!["R3", "2019", "T1", "P4", "Maalivahti", "30", ""],
                vec!["R4", "2020", "T1", "P1", "Hyökkääjä", "17", ""],
                vec!["R5", "2020", "T1", "P3", "Hyökkääjä", "9", ""],
                vec!["R6", "2020", "T1", "P4", "Maalivahti", "30", ""],
                vec!["R7", "2020", "T1", "P5", "Valmentaja", "", "x"],
                vec!["R8", "2021", "T1", "P1", "Hyökkääjä", "17", ""],
                vec!["R9", "2021", "T1", "P2", "Puolustaja", "4", ""],
            ],
        ))
        .with_sheet(RawSheet::from_text(
            "Standings",
            &["standing_id", "season_id", "competition_id", "team_id", "rank", "points"],
            &[
                vec!["ST1", "2020", "C20", "T3", "1", "6"],
                vec!["ST2", "2020", "C20", "T1", "2", "5"],
                vec!["ST3", "2020", "C20", "T2", "3", "3"],
            ],
        ))
}

pub fn club_dataset() -> Dataset {
    build_dataset(&club_workbook())
        .expect("fixture workbook matches the schema")
        .dataset
}
