//! Workbook loading: schema check, typed row parsing, referential integrity.
//!
//! Rows that fail to parse or that break an invariant (unknown player,
//! unknown match reference, duplicate key) are quarantined: skipped, logged
//! at `warn`, and recorded in the [`LoadReport`]. Only a schema violation
//! fails the load.
//!
//! For every sheet, `kept == read - skipped`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::parse::{self, FieldError};
use super::schema::{self, SchemaError};
use super::workbook::{read_workbook, CellValue, RawRow, RawSheet, RawWorkbook};
use super::LoadError;
use crate::domain::{
    chronological, Competition, CompetitionId, Dataset, DatasetHash, Match, MatchId, PlayerId,
    PlayerStat, PublishedStanding, RosterEntry, Score, Season, SeasonId, TeamId,
};

// ─── Report ─────────────────────────────────────────────────────────

/// A row the loader refused, with the spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub sheet: String,
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCount {
    pub sheet: String,
    pub read: usize,
    pub kept: usize,
}

/// What the loader read, kept and skipped, per sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub sheets: Vec<SheetCount>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn sheet(&self, name: &str) -> Option<&SheetCount> {
        self.sheets.iter().find(|c| c.sheet == name)
    }

    pub fn skipped_in(&self, sheet: &str) -> usize {
        self.skipped.iter().filter(|s| s.sheet == sheet).count()
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, sheet: &str, row: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(sheet, row, %reason, "skipping row");
        self.skipped.push(SkippedRow {
            sheet: sheet.to_string(),
            row,
            reason,
        });
    }

    fn record(&mut self, sheet: &str, read: usize, kept: usize) {
        self.sheets.push(SheetCount {
            sheet: sheet.to_string(),
            read,
            kept,
        });
    }
}

/// The loader's output: base tables, what happened while building them,
/// and a content fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedWorkbook {
    pub dataset: Dataset,
    pub report: LoadReport,
    pub fingerprint: DatasetHash,
}

// ─── Entry points ───────────────────────────────────────────────────

/// Read, validate and normalize the workbook at `path`.
pub fn load_workbook(path: &Path) -> Result<LoadedWorkbook, LoadError> {
    let raw = read_workbook(path)?;
    let loaded = build_dataset(&raw)?;
    info!(
        path = %path.display(),
        matches = loaded.dataset.matches.len(),
        player_stats = loaded.dataset.player_stats.len(),
        rosters = loaded.dataset.rosters.len(),
        skipped = loaded.report.total_skipped(),
        fingerprint = loaded.fingerprint.short(),
        "workbook loaded"
    );
    Ok(loaded)
}

/// Validate the schema and build the normalized tables from raw sheets.
pub fn build_dataset(raw: &RawWorkbook) -> Result<LoadedWorkbook, SchemaError> {
    schema::validate(raw)?;

    let mut report = LoadReport::default();
    let mut dataset = Dataset::default();

    load_teams(raw, &mut dataset, &mut report);
    load_aliases(raw, &mut dataset, &mut report);
    load_seasons(raw, &mut dataset, &mut report);
    load_competitions(raw, &mut dataset, &mut report);
    load_players(raw, &mut dataset, &mut report);
    load_matches(raw, &mut dataset, &mut report);
    load_player_stats(raw, &mut dataset, &mut report);
    load_rosters(raw, &mut dataset, &mut report);
    load_standings(raw, &mut dataset, &mut report);

    Ok(LoadedWorkbook {
        dataset,
        report,
        fingerprint: raw.fingerprint(),
    })
}

// ─── Row plumbing ───────────────────────────────────────────────────

/// One data row plus the sheet it came from, for column lookup.
struct Row<'a> {
    sheet: &'a RawSheet,
    raw: &'a RawRow,
}

impl<'a> Row<'a> {
    fn cell(&self, column: &str) -> &'a CellValue {
        self.sheet.cell(self.raw, column)
    }

    fn id(&self, column: &'static str) -> Result<String, FieldError> {
        parse::id(self.cell(column), column)
    }

    fn optional_text(&self, column: &str) -> Option<String> {
        parse::text(self.cell(column))
    }

    fn count(&self, column: &'static str) -> Result<Option<u32>, FieldError> {
        parse::count(self.cell(column), column)
    }
}

struct Parsed<T> {
    row: usize,
    value: T,
}

/// Parse every row of `name`, quarantining field errors. Returns the number
/// of rows read (`None` when the sheet is absent) and the parsed values.
fn parse_rows<T>(
    raw: &RawWorkbook,
    name: &str,
    report: &mut LoadReport,
    mut parse_row: impl FnMut(&Row<'_>) -> Result<T, FieldError>,
) -> Option<(usize, Vec<Parsed<T>>)> {
    let sheet = raw.sheet(name)?;
    let mut parsed = Vec::with_capacity(sheet.len());
    for raw_row in &sheet.rows {
        let row = Row {
            sheet,
            raw: raw_row,
        };
        match parse_row(&row) {
            Ok(value) => parsed.push(Parsed {
                row: raw_row.number,
                value,
            }),
            Err(e) => report.skip(name, raw_row.number, e.to_string()),
        }
    }
    debug!(sheet = name, read = sheet.len(), parsed = parsed.len(), "sheet parsed");
    Some((sheet.len(), parsed))
}

// ─── Sheets ─────────────────────────────────────────────────────────

fn load_teams(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::TEAMS, report, |row| {
        Ok((
            TeamId::new(row.id("team_id")?),
            parse::required_text(row.cell("team_name"), "team_name")?,
        ))
    }) else {
        return;
    };
    for Parsed { row, value: (id, name) } in rows {
        let label = id.to_string();
        if !ds.teams.insert(id, name) {
            report.skip(schema::TEAMS, row, format!("duplicate team_id {label}"));
        }
    }
    report.record(schema::TEAMS, read, ds.teams.len());
}

fn load_aliases(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::TEAM_ALIASES, report, |row| {
        Ok((
            parse::required_text(row.cell("alias_name"), "alias_name")?,
            TeamId::new(row.id("team_id")?),
        ))
    }) else {
        return;
    };
    let mut kept = 0;
    for Parsed { row, value: (alias, team) } in rows {
        if !ds.teams.contains(&team) {
            report.skip(schema::TEAM_ALIASES, row, format!("unknown team_id {team}"));
            continue;
        }
        ds.teams.add_alias(&alias, team);
        kept += 1;
    }
    report.record(schema::TEAM_ALIASES, read, kept);
}

fn load_seasons(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::SEASONS, report, |row| {
        Ok(Season {
            id: SeasonId::new(row.id("season_id")?),
            start_year: parse::year(row.cell("start_year"), "start_year")?,
            end_year: parse::year(row.cell("end_year"), "end_year")?,
        })
    }) else {
        return;
    };
    for Parsed { row, value } in rows {
        if ds.seasons.contains_key(&value.id) {
            report.skip(schema::SEASONS, row, format!("duplicate season_id {}", value.id));
            continue;
        }
        ds.seasons.insert(value.id.clone(), value);
    }
    report.record(schema::SEASONS, read, ds.seasons.len());
}

fn load_competitions(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::COMPETITIONS, report, |row| {
        Ok(Competition {
            id: CompetitionId::new(row.id("competition_id")?),
            name: parse::required_text(row.cell("competition_name"), "competition_name")?,
            season: row.optional_text("season_id").map(SeasonId::new),
            stage: row.optional_text("stage"),
        })
    }) else {
        return;
    };
    for Parsed { row, value } in rows {
        if ds.competitions.contains_key(&value.id) {
            report.skip(
                schema::COMPETITIONS,
                row,
                format!("duplicate competition_id {}", value.id),
            );
            continue;
        }
        ds.competitions.insert(value.id.clone(), value);
    }
    report.record(schema::COMPETITIONS, read, ds.competitions.len());
}

fn load_players(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::PLAYERS, report, |row| {
        Ok((
            PlayerId::new(row.id("player_id")?),
            parse::required_text(row.cell("full_name"), "full_name")?,
        ))
    }) else {
        return;
    };
    for Parsed { row, value: (id, name) } in rows {
        let label = id.to_string();
        if !ds.players.insert(id, name) {
            report.skip(schema::PLAYERS, row, format!("duplicate player_id {label}"));
        }
    }
    report.record(schema::PLAYERS, read, ds.players.len());
}

fn load_matches(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::MATCHES, report, |row| {
        let home_goals = row.count("home_goals")?;
        let away_goals = row.count("away_goals")?;
        Ok(Match {
            id: MatchId::new(row.id("match_id")?),
            season: SeasonId::new(row.id("season_id")?),
            date: parse::date(row.cell("date"), "date")?,
            competition: row.optional_text("competition_id").map(CompetitionId::new),
            home: TeamId::new(row.id("home_team_id")?),
            away: TeamId::new(row.id("away_team_id")?),
            // A half-entered score counts as not played.
            score: match (home_goals, away_goals) {
                (Some(h), Some(a)) => Some(Score::new(h, a)),
                _ => None,
            },
            venue: row.optional_text("venue"),
        })
    }) else {
        return;
    };

    let mut ids = HashSet::new();
    let mut keys = HashSet::new();
    for Parsed { row, value } in rows {
        if value.home == value.away {
            report.skip(
                schema::MATCHES,
                row,
                format!("team {} listed as both home and away", value.home),
            );
            continue;
        }
        if !ids.insert(value.id.clone()) {
            report.skip(schema::MATCHES, row, format!("duplicate match_id {}", value.id));
            continue;
        }
        if !keys.insert(value.key()) {
            ids.remove(&value.id);
            report.skip(
                schema::MATCHES,
                row,
                "duplicate match: same season, date, home and away team",
            );
            continue;
        }
        ds.matches.push(value);
    }
    ds.matches.sort_by(chronological);
    report.record(schema::MATCHES, read, ds.matches.len());
}

fn load_player_stats(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::PLAYER_STATS, report, |row| {
        let goals = parse::count_or_zero(row.cell("goals"), "goals")?;
        let assists = parse::count_or_zero(row.cell("assists"), "assists")?;
        Ok(PlayerStat {
            id: row.id("stat_id")?,
            player: PlayerId::new(row.id("player_id")?),
            season: SeasonId::new(row.id("season_id")?),
            team: TeamId::new(row.id("team_id")?),
            match_id: row.optional_text("match_id").map(MatchId::new),
            goals,
            assists,
            points: row.count("points")?.unwrap_or(goals + assists),
            penalty_minutes: parse::count_or_zero(row.cell("penalty_minutes"), "penalty_minutes")?,
            games: row.count("games_played")?,
        })
    }) else {
        return;
    };

    let match_ids: HashSet<&MatchId> = ds.matches.iter().map(|m| &m.id).collect();
    let mut kept = Vec::with_capacity(rows.len());
    for Parsed { row, value } in rows {
        if !ds.players.contains(&value.player) {
            report.skip(
                schema::PLAYER_STATS,
                row,
                format!("unknown player_id {}", value.player),
            );
            continue;
        }
        if let Some(match_id) = &value.match_id {
            if !match_ids.contains(match_id) {
                report.skip(
                    schema::PLAYER_STATS,
                    row,
                    format!("unknown match_id {match_id}"),
                );
                continue;
            }
        }
        kept.push(value);
    }
    report.record(schema::PLAYER_STATS, read, kept.len());
    ds.player_stats = kept;
}

fn load_rosters(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::ROSTERS, report, |row| {
        let jersey = match row.count("jersey_number")? {
            Some(n) => Some(n),
            None => row.count("number")?,
        };
        Ok(RosterEntry {
            id: row.id("roster_id")?,
            season: SeasonId::new(row.id("season_id")?),
            team: TeamId::new(row.id("team_id")?),
            player: PlayerId::new(row.id("player_id")?),
            role: row.optional_text("role").unwrap_or_default(),
            jersey_number: jersey,
            is_staff: parse::flag(row.cell("is_staff")),
        })
    }) else {
        return;
    };

    let mut kept = Vec::with_capacity(rows.len());
    for Parsed { row, value } in rows {
        if !ds.players.contains(&value.player) {
            report.skip(
                schema::ROSTERS,
                row,
                format!("unknown player_id {}", value.player),
            );
            continue;
        }
        kept.push(value);
    }
    report.record(schema::ROSTERS, read, kept.len());
    ds.rosters = kept;
}

fn load_standings(raw: &RawWorkbook, ds: &mut Dataset, report: &mut LoadReport) {
    let Some((read, rows)) = parse_rows(raw, schema::STANDINGS, report, |row| {
        Ok(PublishedStanding {
            id: row.id("standing_id")?,
            season: SeasonId::new(row.id("season_id")?),
            competition: CompetitionId::new(row.id("competition_id")?),
            team: TeamId::new(row.id("team_id")?),
            rank: row.count("rank")?.ok_or(FieldError::Missing("rank"))?,
            games: row.count("games")?,
            wins: row.count("wins")?,
            draws: row.count("draws")?,
            losses: row.count("losses")?,
            goals_for: row.count("goals_for")?,
            goals_against: row.count("goals_against")?,
            points: row.count("points")?,
        })
    }) else {
        return;
    };
    ds.standings = rows.into_iter().map(|p| p.value).collect();
    report.record(schema::STANDINGS, read, ds.standings.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::data::schema::SchemaProblem;

    fn base() -> RawWorkbook {
        RawWorkbook::new()
            .with_sheet(RawSheet::from_text(
                "Teams",
                &["team_id", "team_name"],
                &[vec!["T1", "Mailajoket"], vec!["T2", "Kiekko-Veikot"]],
            ))
            .with_sheet(RawSheet::from_text(
                "Players",
                &["player_id", "full_name"],
                &[vec!["P1", "Aino Virtanen"], vec!["P2", "Mikko Koskinen"]],
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
                    vec!["M2", "2020", "12.1.2020", "T2", "T1", "2", "2"],
                    vec!["M1", "2020", "2020-01-05", "T1", "T2", "3", "1"],
                    vec!["M3", "2020", "", "T1", "T2", "", ""],
                    vec!["M4", "2020", "someday", "T1", "T2", "1", "0"],
                    vec!["M5", "2020", "2020-02-01", "T1", "T2", "x", "0"],
                ],
            ))
            .with_sheet(RawSheet::from_text(
                "PlayerSeasonStats",
                &["stat_id", "season_id", "team_id", "player_id", "match_id", "goals", "assists"],
                &[
                    vec!["S1", "2020", "T1", "P1", "M1", "2", "1"],
                    vec!["S2", "2020", "T1", "P9", "M1", "1", "0"],
                    vec!["S3", "2020", "T1", "P2", "M99", "1", "0"],
                    vec!["S4", "2020", "T1", "P2", "", "10", "12"],
                ],
            ))
            .with_sheet(RawSheet::from_text(
                "Rosters",
                &["roster_id", "season_id", "team_id", "player_id", "role", "jersey_number"],
                &[
                    vec!["R1", "2020", "T1", "P1", "Hyökkääjä", "17"],
                    vec!["R2", "2020", "T1", "P404", "Maalivahti", "1"],
                ],
            ))
    }

    #[test]
    fn counts_match_sheet_rows_minus_skipped() {
        let loaded = build_dataset(&base()).unwrap();
        for count in &loaded.report.sheets {
            assert_eq!(
                count.kept,
                count.read - loaded.report.skipped_in(&count.sheet),
                "sheet {}",
                count.sheet
            );
        }
        let matches = loaded.report.sheet("Matches").unwrap();
        assert_eq!((matches.read, matches.kept), (5, 3));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let loaded = build_dataset(&base()).unwrap();
        let reasons: Vec<&str> = loaded
            .report
            .skipped
            .iter()
            .map(|s| s.reason.as_str())
            .collect();
        assert!(reasons.iter().any(|r| r.contains("unparseable date")));
        assert!(reasons.iter().any(|r| r.contains("home_goals")));
        assert!(reasons.iter().any(|r| r.contains("unknown player_id P9")));
        assert!(reasons.iter().any(|r| r.contains("unknown match_id M99")));
        assert!(reasons.iter().any(|r| r.contains("unknown player_id P404")));
    }

    #[test]
    fn postponed_match_keeps_null_fields_and_sorts_last() {
        let ds = build_dataset(&base()).unwrap().dataset;
        let ids: Vec<&str> = ds.matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["M1", "M2", "M3"]);
        let postponed = &ds.matches[2];
        assert_eq!(postponed.date, None);
        assert_eq!(postponed.score, None);
        assert_eq!(
            ds.matches[1].date,
            NaiveDate::from_ymd_opt(2020, 1, 12)
        );
    }

    #[test]
    fn points_default_to_goals_plus_assists() {
        let ds = build_dataset(&base()).unwrap().dataset;
        let aggregate = ds.player_stats.iter().find(|s| s.id == "S4").unwrap();
        assert_eq!(aggregate.points, 22);
        assert_eq!(aggregate.match_id, None);
        assert_eq!(ds.rosters[0].jersey_number, Some(17));
    }

    #[test]
    fn schema_error_fails_fast() {
        let mut wb = base();
        wb.sheets.retain(|s| s.name != "Players");
        let err = build_dataset(&wb).unwrap_err();
        assert_eq!(err.problems, vec![SchemaProblem::MissingSheet("Players".into())]);
    }

    #[test]
    fn schema_error_names_every_missing_sheet() {
        let mut wb = base();
        wb.sheets.retain(|s| s.name != "Players" && s.name != "Rosters");
        let err = build_dataset(&wb).unwrap_err();
        assert_eq!(err.problems.len(), 2);
        let msg = err.to_string();
        assert!(msg.contains("Missing required sheet: Players"), "{msg}");
        assert!(msg.contains("Missing required sheet: Rosters"), "{msg}");
    }

    #[test]
    fn duplicate_match_key_quarantined() {
        let mut wb = base();
        for sheet in &mut wb.sheets {
            if sheet.name == "Matches" {
                let mut dup = sheet.rows[1].clone();
                dup.number = 99;
                dup.cells[0] = CellValue::Text("M1-copy".into());
                sheet.rows.push(dup);
            }
        }
        let loaded = build_dataset(&wb).unwrap();
        assert_eq!(loaded.dataset.matches.len(), 3);
        assert!(loaded
            .report
            .skipped
            .iter()
            .any(|s| s.row == 99 && s.reason.starts_with("duplicate match")));
    }

    #[test]
    fn aliases_resolve_after_load() {
        let wb = base().with_sheet(RawSheet::from_text(
            "TeamAliases",
            &["alias_name", "team_id"],
            &[vec!["MJ", "T1"], vec!["Ghosts", "T77"]],
        ));
        let loaded = build_dataset(&wb).unwrap();
        assert_eq!(loaded.dataset.resolve_team("mj"), Some(TeamId::new("T1")));
        assert_eq!(loaded.report.skipped_in("TeamAliases"), 1);
    }
}
