//! End-to-end loader tests against real .xlsx files written to a temp dir.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rinkstats_core::data::{load_workbook, LoadError, SchemaProblem, WorkbookCache};
use rinkstats_core::domain::{SeasonId, TeamId};
use rust_xlsxwriter::Workbook;

enum Cell<'a> {
    Text(&'a str),
    Num(f64),
    Blank,
}

use Cell::{Blank, Num, Text};

fn write_sheet(workbook: &mut Workbook, name: &str, headers: &[&str], rows: &[Vec<Cell<'_>>]) {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name).unwrap();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (r, col) = ((r + 1) as u32, col as u16);
            match cell {
                Text(s) => {
                    sheet.write_string(r, col, *s).unwrap();
                }
                Num(n) => {
                    sheet.write_number(r, col, *n).unwrap();
                }
                Blank => {}
            }
        }
    }
}

fn write_club_workbook(path: &Path, include_players: bool) {
    let mut workbook = Workbook::new();
    write_sheet(
        &mut workbook,
        "Seasons",
        &["season_id", "start_year", "end_year"],
        &[
            vec![Num(2019.0), Num(2018.0), Num(2019.0)],
            vec![Num(2020.0), Num(2019.0), Num(2020.0)],
        ],
    );
    write_sheet(
        &mut workbook,
        "Teams",
        &["team_id", "team_name"],
        &[
            vec![Text("T1"), Text("Mailajoket")],
            vec![Text("T2"), Text("Kiekko-Veikot")],
            vec![Text("T3"), Text("Jää-Kotkat")],
        ],
    );
    if include_players {
        write_sheet(
            &mut workbook,
            "Players",
            &["player_id", "full_name"],
            &[
                vec![Num(1.0), Text("Aino Virtanen")],
                vec![Num(2.0), Text("Mikko Koskinen")],
            ],
        );
    }
    write_sheet(
        &mut workbook,
        "Matches",
        &[
            "match_id",
            "season_id",
            "date",
            "home_team_id",
            "away_team_id",
            "home_goals",
            "away_goals",
            "competition_id",
        ],
        &[
            // 43835 = 2020-01-05 as an Excel serial
            vec![Text("M1"), Num(2020.0), Num(43835.0), Text("T1"), Text("T2"), Num(4.0), Num(2.0), Text("C1")],
            vec![Text("M2"), Num(2020.0), Text("12.1.2020"), Text("T3"), Text("T1"), Num(1.0), Num(1.0), Text("C1")],
            vec![Text("M3"), Num(2019.0), Text("2019-02-10"), Text("T2"), Text("T1"), Blank, Blank, Text("C1")],
            vec![Text("M4"), Num(2019.0), Text("not a date"), Text("T2"), Text("T1"), Num(0.0), Num(1.0), Text("C1")],
        ],
    );
    write_sheet(
        &mut workbook,
        "PlayerSeasonStats",
        &["stat_id", "season_id", "team_id", "player_id", "goals", "assists", "match_id"],
        &[
            vec![Text("S1"), Num(2020.0), Text("T1"), Num(1.0), Num(2.0), Num(1.0), Text("M1")],
            vec![Text("S2"), Num(2020.0), Text("T1"), Num(2.0), Num(0.0), Num(2.0), Text("M1")],
            vec![Text("S3"), Num(2020.0), Text("T1"), Num(3.0), Num(5.0), Num(0.0), Blank],
        ],
    );
    write_sheet(
        &mut workbook,
        "Rosters",
        &["roster_id", "season_id", "team_id", "player_id", "role"],
        &[
            vec![Text("R1"), Num(2020.0), Text("T1"), Num(1.0), Text("Hyökkääjä")],
            vec![Text("R2"), Num(2020.0), Text("T1"), Num(2.0), Text("Maalivahti")],
        ],
    );
    workbook.save(path).unwrap();
}

#[test]
fn loads_real_xlsx_and_normalizes_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.xlsx");
    write_club_workbook(&path, true);

    let loaded = load_workbook(&path).unwrap();
    let ds = &loaded.dataset;

    // M4 has an unparseable date; S3 references player 3 who is not registered.
    assert_eq!(ds.matches.len(), 3);
    assert_eq!(ds.player_stats.len(), 2);
    assert_eq!(ds.rosters.len(), 2);
    assert_eq!(loaded.report.total_skipped(), 2);

    // Numeric ids from number cells come through without a trailing `.0`.
    assert_eq!(ds.matches[0].season, SeasonId::new("2019"));
    assert_eq!(ds.season_label(&SeasonId::new("2020")), "2019-2020");
    assert_eq!(ds.players.name(&rinkstats_core::domain::PlayerId::new("1")), Some("Aino Virtanen"));

    // Serial and Finnish dates land on the same calendar.
    let m1 = ds.matches.iter().find(|m| m.id.as_str() == "M1").unwrap();
    assert_eq!(m1.date, NaiveDate::from_ymd_opt(2020, 1, 5));
    let m2 = ds.matches.iter().find(|m| m.id.as_str() == "M2").unwrap();
    assert_eq!(m2.date, NaiveDate::from_ymd_opt(2020, 1, 12));

    // Postponed match keeps a null score.
    let m3 = ds.matches.iter().find(|m| m.id.as_str() == "M3").unwrap();
    assert_eq!(m3.score, None);

    assert_eq!(ds.resolve_team("mailajoket"), Some(TeamId::new("T1")));
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_workbook(&dir.path().join("nope.xlsx")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn missing_sheet_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.xlsx");
    write_club_workbook(&path, false);

    match load_workbook(&path) {
        Err(LoadError::Schema(err)) => {
            assert_eq!(err.problems, vec![SchemaProblem::MissingSheet("Players".into())])
        }
        other => panic!("expected missing sheet error, got {other:?}"),
    }
}

#[test]
fn cache_reuses_until_mtime_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("club.xlsx");
    write_club_workbook(&path, true);

    let mut cache = WorkbookCache::new();
    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
    assert!(cache.is_fresh(&path));

    let later = SystemTime::now() + Duration::from_secs(120);
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(later)
        .unwrap();
    assert!(!cache.is_fresh(&path));

    let third = cache.get_or_load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.len(), 1);

    assert!(cache.invalidate(&path));
    assert!(cache.is_empty());
}
