//! Delimited-text and JSON export of the filtered views.
//!
//! The match export always covers the full filtered list, never just the
//! page on screen. The delimiter defaults to a comma and comes from
//! `display.csv_delimiter`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::enrich::MatchView;
use crate::leaderboard::LeaderboardEntry;
use crate::standings::StandingsTable;
use crate::view::MatchListView;

fn writer(delimiter: u8) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(vec![])
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

// ─── Matches ────────────────────────────────────────────────────────

/// Columns: match_id, season, date, competition, stage, home, away,
/// home_goals, away_goals, venue, then the focus-team columns side,
/// opponent, result, goals_for, goals_against, points (blank without a
/// focus team or score).
pub fn matches_csv(list: &MatchListView, delimiter: u8) -> Result<String> {
    let mut wtr = writer(delimiter);
    wtr.write_record([
        "match_id",
        "season",
        "date",
        "competition",
        "stage",
        "home",
        "away",
        "home_goals",
        "away_goals",
        "venue",
        "side",
        "opponent",
        "result",
        "goals_for",
        "goals_against",
        "points",
    ])?;
    for m in &list.rows {
        wtr.write_record(match_record(m))?;
    }
    finish(wtr)
}

fn match_record(m: &MatchView) -> [String; 16] {
    let p = m.perspective.as_ref();
    let r = m.result();
    [
        m.id.to_string(),
        m.season_label.clone(),
        m.date_text(),
        m.competition.clone().unwrap_or_default(),
        m.stage.clone().unwrap_or_default(),
        m.home_name.clone(),
        m.away_name.clone(),
        opt(m.score.map(|s| s.home)),
        opt(m.score.map(|s| s.away)),
        m.venue.clone().unwrap_or_default(),
        opt(p.map(|p| p.side.label())),
        opt(p.map(|p| p.opponent_name.as_str())),
        opt(r.map(|r| r.outcome.code())),
        opt(r.map(|r| r.goals_for)),
        opt(r.map(|r| r.goals_against)),
        opt(r.map(|r| r.points)),
    ]
}

/// Write the match export to `path`, creating parent directories.
pub fn write_matches_csv(path: &Path, list: &MatchListView, delimiter: u8) -> Result<()> {
    let text = matches_csv(list, delimiter)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export dir: {}", dir.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

// ─── Standings / leaderboard ────────────────────────────────────────

pub fn standings_csv(tables: &[StandingsTable], delimiter: u8) -> Result<String> {
    let mut wtr = writer(delimiter);
    wtr.write_record([
        "season", "competition", "rank", "team", "gp", "w", "d", "l", "gf", "ga", "gd", "pts",
    ])?;
    for t in tables {
        for row in &t.rows {
            wtr.write_record([
                t.season_label.clone(),
                t.competition_name.clone(),
                row.rank.to_string(),
                row.team_name.clone(),
                row.played.to_string(),
                row.won.to_string(),
                row.drawn.to_string(),
                row.lost.to_string(),
                row.goals_for.to_string(),
                row.goals_against.to_string(),
                row.goal_diff().to_string(),
                row.points.to_string(),
            ])?;
        }
    }
    finish(wtr)
}

pub fn leaderboard_csv(entries: &[LeaderboardEntry], delimiter: u8) -> Result<String> {
    let mut wtr = writer(delimiter);
    wtr.write_record([
        "rank", "player", "seasons", "gp", "g", "a", "pts", "pim", "g_per_season", "a_per_season",
        "pts_per_season",
    ])?;
    for e in entries {
        wtr.write_record([
            e.rank.to_string(),
            e.name.clone(),
            e.seasons.to_string(),
            e.totals.games.to_string(),
            e.totals.goals.to_string(),
            e.totals.assists.to_string(),
            e.totals.points.to_string(),
            e.totals.penalty_minutes.to_string(),
            format!("{:.2}", e.goals_per_season),
            format!("{:.2}", e.assists_per_season),
            format!("{:.2}", e.points_per_season),
        ])?;
    }
    finish(wtr)
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Pretty JSON of any view model.
pub fn export_json<T: Serialize + ?Sized>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize view to JSON")
}
