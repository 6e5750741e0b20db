//! Team record over the filtered matches: totals, rates, extremes, form and
//! head-to-head lines per opponent.

use std::collections::BTreeMap;

use rinkstats_core::domain::TeamId;
use serde::{Deserialize, Serialize};

use crate::enrich::{MatchView, Outcome, TeamResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl Record {
    pub fn add(&mut self, r: &TeamResult) {
        self.games += 1;
        self.goals_for += r.goals_for;
        self.goals_against += r.goals_against;
        self.points += r.points;
        match r.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// `W-D-L`.
    pub fn text(&self) -> String {
        format!("{}-{}-{}", self.wins, self.draws, self.losses)
    }

    /// Percentage of games, one decimal; 0 without games.
    pub fn pct(&self, count: u32) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        round_to(f64::from(count) * 100.0 / f64::from(self.games), 1)
    }

    /// Per-game rate, two decimals; 0 without games.
    pub fn per_game(&self, total: u32) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        round_to(f64::from(total) / f64::from(self.games), 2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub record: Record,
    /// Matches in the selection without a score yet.
    pub unplayed: u32,
    pub points_per_game: f64,
    pub goals_for_per_game: f64,
    pub goals_against_per_game: f64,
    pub win_pct: f64,
    pub draw_pct: f64,
    pub loss_pct: f64,
    pub best_win: Option<MatchView>,
    pub worst_loss: Option<MatchView>,
    pub form: Form,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Oldest first.
    pub results: Vec<Outcome>,
    pub record: Record,
}

impl Form {
    /// Outcome codes, oldest first, e.g. `WWDLW`.
    pub fn streak(&self) -> String {
        self.results.iter().map(|o| o.code()).collect()
    }
}

/// Summarize `matches` from the focus team's view. Rows without a
/// perspective are ignored.
pub fn team_summary(matches: &[MatchView], form_window: usize) -> TeamSummary {
    let mut record = Record::default();
    let mut unplayed = 0;
    for m in matches.iter().filter(|m| m.perspective.is_some()) {
        match m.result() {
            Some(r) => record.add(r),
            None => unplayed += 1,
        }
    }
    let (best_win, worst_loss) = best_and_worst(matches);

    TeamSummary {
        points_per_game: record.per_game(record.points),
        goals_for_per_game: record.per_game(record.goals_for),
        goals_against_per_game: record.per_game(record.goals_against),
        win_pct: record.pct(record.wins),
        draw_pct: record.pct(record.draws),
        loss_pct: record.pct(record.losses),
        best_win: best_win.cloned(),
        worst_loss: worst_loss.cloned(),
        form: form(matches, form_window),
        record,
        unplayed,
    }
}

/// Largest-margin win and largest-margin loss. Equal margins go to the
/// earlier match.
pub fn best_and_worst(matches: &[MatchView]) -> (Option<&MatchView>, Option<&MatchView>) {
    let mut best: Option<(&MatchView, i64)> = None;
    let mut worst: Option<(&MatchView, i64)> = None;
    for m in chronological(matches) {
        let Some(r) = m.result() else { continue };
        let margin = r.goal_diff();
        match r.outcome {
            Outcome::Win if best.map_or(true, |(_, b)| margin > b) => best = Some((m, margin)),
            Outcome::Loss if worst.map_or(true, |(_, w)| margin < w) => worst = Some((m, margin)),
            _ => {}
        }
    }
    (best.map(|b| b.0), worst.map(|w| w.0))
}

/// The last `window` scored matches. Undated matches count as the most
/// recent.
pub fn form(matches: &[MatchView], window: usize) -> Form {
    let played: Vec<&MatchView> = chronological(matches)
        .into_iter()
        .filter(|m| m.result().is_some())
        .collect();
    let start = played.len().saturating_sub(window);

    let mut out = Form::default();
    for r in played[start..].iter().filter_map(|m| m.result()) {
        out.results.push(r.outcome);
        out.record.add(r);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentRecord {
    pub opponent: TeamId,
    pub name: String,
    pub record: Record,
    pub win_pct: f64,
}

/// Head-to-head totals against every opponent met, most games first, then
/// by name.
pub fn opponent_records(matches: &[MatchView]) -> Vec<OpponentRecord> {
    let mut by_opponent: BTreeMap<&TeamId, (&str, Record)> = BTreeMap::new();
    for m in matches {
        let Some(p) = &m.perspective else { continue };
        let Some(r) = &p.result else { continue };
        by_opponent
            .entry(&p.opponent)
            .or_insert_with(|| (p.opponent_name.as_str(), Record::default()))
            .1
            .add(r);
    }

    let mut rows: Vec<OpponentRecord> = by_opponent
        .into_iter()
        .map(|(opponent, (name, record))| OpponentRecord {
            opponent: opponent.clone(),
            name: name.to_string(),
            win_pct: record.pct(record.wins),
            record,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.record
            .games
            .cmp(&a.record.games)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.opponent.cmp(&b.opponent))
    });
    rows
}

fn chronological(matches: &[MatchView]) -> Vec<&MatchView> {
    let mut out: Vec<&MatchView> = matches.iter().collect();
    out.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
    out
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}
