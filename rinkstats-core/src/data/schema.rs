//! Workbook schema: which sheets must exist and which columns each carries.

use super::workbook::RawWorkbook;

/// Expected layout of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSpec {
    pub name: &'static str,
    pub required: bool,
    pub columns: &'static [&'static str],
}

pub const MATCHES: &str = "Matches";
pub const TEAMS: &str = "Teams";
pub const PLAYERS: &str = "Players";
pub const ROSTERS: &str = "Rosters";
pub const PLAYER_STATS: &str = "PlayerSeasonStats";
pub const SEASONS: &str = "Seasons";
pub const TEAM_ALIASES: &str = "TeamAliases";
pub const COMPETITIONS: &str = "Competitions";
pub const STANDINGS: &str = "Standings";

/// The workbook contract. Optional sheets are validated only when present.
pub const SHEETS: &[SheetSpec] = &[
    SheetSpec {
        name: MATCHES,
        required: true,
        columns: &[
            "match_id",
            "season_id",
            "date",
            "home_team_id",
            "away_team_id",
            "home_goals",
            "away_goals",
        ],
    },
    SheetSpec {
        name: TEAMS,
        required: true,
        columns: &["team_id", "team_name"],
    },
    SheetSpec {
        name: PLAYERS,
        required: true,
        columns: &["player_id", "full_name"],
    },
    SheetSpec {
        name: ROSTERS,
        required: true,
        columns: &["roster_id", "season_id", "team_id", "player_id", "role"],
    },
    SheetSpec {
        name: PLAYER_STATS,
        required: true,
        columns: &["stat_id", "season_id", "team_id", "player_id", "goals", "assists"],
    },
    SheetSpec {
        name: SEASONS,
        required: false,
        columns: &["season_id", "start_year", "end_year"],
    },
    SheetSpec {
        name: TEAM_ALIASES,
        required: false,
        columns: &["alias_name", "team_id"],
    },
    SheetSpec {
        name: COMPETITIONS,
        required: false,
        columns: &["competition_id", "competition_name", "season_id", "stage"],
    },
    SheetSpec {
        name: STANDINGS,
        required: false,
        columns: &["standing_id", "season_id", "competition_id", "team_id", "rank"],
    },
];

/// Collect every schema problem in the workbook, in contract order.
///
/// A present sheet without a header row (an empty sheet) is accepted and
/// contributes no rows.
pub fn check(workbook: &RawWorkbook) -> Vec<SchemaProblem> {
    let mut problems = Vec::new();
    for spec in SHEETS {
        let Some(sheet) = workbook.sheet(spec.name) else {
            if spec.required {
                problems.push(SchemaProblem::MissingSheet(spec.name.to_string()));
            }
            continue;
        };
        if !sheet.has_header() {
            continue;
        }
        for column in spec.columns {
            if !sheet.has_column(column) {
                problems.push(SchemaProblem::MissingColumn {
                    sheet: spec.name.to_string(),
                    column: column.to_string(),
                });
            }
        }
    }
    problems
}

/// Fail with every schema problem at once.
pub fn validate(workbook: &RawWorkbook) -> Result<(), SchemaError> {
    let problems = check(workbook);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { problems })
    }
}

/// One way a workbook breaks the sheet contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaProblem {
    #[error("Missing required sheet: {0}")]
    MissingSheet(String),

    #[error("Missing required column '{column}' in sheet {sheet}")]
    MissingColumn { sheet: String, column: String },
}

/// A workbook that breaks the contract. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe(.problems))]
pub struct SchemaError {
    pub problems: Vec<SchemaProblem>,
}

fn describe(problems: &[SchemaProblem]) -> String {
    match problems {
        [] => "schema check failed".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => {
            let rest: Vec<String> = rest.iter().map(|p| p.to_string()).collect();
            format!("{first} (and {} more: {})", rest.len(), rest.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::workbook::RawSheet;

    fn complete() -> RawWorkbook {
        let mut wb = RawWorkbook::new();
        for spec in SHEETS.iter().filter(|s| s.required) {
            wb = wb.with_sheet(RawSheet::from_text::<&str>(spec.name, spec.columns, &[]));
        }
        wb
    }

    #[test]
    fn required_sheets_only_is_valid() {
        assert_eq!(validate(&complete()), Ok(()));
    }

    #[test]
    fn missing_sheet_named() {
        let mut wb = complete();
        wb.sheets.retain(|s| s.name != ROSTERS);
        let err = validate(&wb).unwrap_err();
        assert_eq!(err.problems, vec![SchemaProblem::MissingSheet("Rosters".into())]);
        assert_eq!(err.to_string(), "Missing required sheet: Rosters");
    }

    #[test]
    fn missing_column_in_optional_sheet_reported() {
        let wb = complete().with_sheet(RawSheet::from_text::<&str>(
            SEASONS,
            &["season_id", "start_year"],
            &[],
        ));
        assert_eq!(
            check(&wb),
            vec![SchemaProblem::MissingColumn {
                sheet: "Seasons".into(),
                column: "end_year".into(),
            }]
        );
    }

    #[test]
    fn check_lists_every_problem() {
        let wb = RawWorkbook::new().with_sheet(RawSheet::from_text::<&str>(TEAMS, &["team_id"], &[]));
        let problems = check(&wb);
        // four missing required sheets plus one missing column
        assert_eq!(problems.len(), 5);
        assert!(problems.contains(&SchemaProblem::MissingColumn {
            sheet: "Teams".into(),
            column: "team_name".into(),
        }));
    }

    #[test]
    fn validate_reports_all_problems() {
        let wb = RawWorkbook::new().with_sheet(RawSheet::from_text::<&str>(TEAMS, &["team_id"], &[]));
        let err = validate(&wb).unwrap_err();
        assert_eq!(err.problems.len(), 5);
        let sheets: Vec<&str> = err
            .problems
            .iter()
            .filter_map(|p| match p {
                SchemaProblem::MissingSheet(name) => Some(name.as_str()),
                SchemaProblem::MissingColumn { .. } => None,
            })
            .collect();
        assert_eq!(sheets, ["Matches", "Players", "Rosters", "PlayerSeasonStats"]);

        let msg = err.to_string();
        assert!(msg.starts_with("Missing required sheet: Matches (and 4 more: "), "{msg}");
        for name in ["Players", "Rosters", "PlayerSeasonStats", "'team_name'"] {
            assert!(msg.contains(name), "{name} missing from {msg}");
        }
    }

    #[test]
    fn headerless_sheet_skips_column_check() {
        let mut wb = complete();
        for sheet in &mut wb.sheets {
            if sheet.name == PLAYERS {
                sheet.headers.clear();
            }
        }
        assert_eq!(validate(&wb), Ok(()));
    }
}
