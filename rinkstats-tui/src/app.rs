//! Application state: single-owner, main-thread only.
//!
//! Every filter change rebuilds the `DashboardView` synchronously from the
//! cached workbook. Reload goes back through the `WorkbookCache`, which only
//! re-reads the file when its modification time changed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rinkstats_core::data::{LoadError, LoadedWorkbook, WorkbookCache};
use rinkstats_stats::export::write_matches_csv;
use rinkstats_core::domain::TeamId;
use rinkstats_stats::{
    resolve_focus, Dashboard, DashboardConfig, DashboardRequest, DashboardView, FilterSelection,
    StatKind, TrendMetric, ViewState,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Which tab is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    #[default]
    Summary,
    Matches,
    Standings,
    Players,
    Rosters,
    Help,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Summary,
        Panel::Matches,
        Panel::Standings,
        Panel::Players,
        Panel::Rosters,
        Panel::Help,
    ];

    pub fn index(self) -> usize {
        match self {
            Panel::Summary => 0,
            Panel::Matches => 1,
            Panel::Standings => 2,
            Panel::Players => 3,
            Panel::Rosters => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Summary => "Summary",
            Panel::Matches => "Matches",
            Panel::Standings => "Standings",
            Panel::Players => "Players",
            Panel::Rosters => "Rosters",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Player name search on the Players tab.
    Search,
}

/// Position after `current` in a list of `len` choices, where `None` means
/// "all". Cycles all, first, ..., last, all.
pub fn next_choice(len: usize, current: Option<usize>) -> Option<usize> {
    match current {
        None if len > 0 => Some(0),
        None => None,
        Some(i) if i + 1 < len => Some(i + 1),
        Some(_) => None,
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,
    pub overlay: Overlay,
    /// First visible row in list panels.
    pub scroll: usize,

    // Data
    pub config: DashboardConfig,
    pub cache: WorkbookCache,
    pub workbook: Option<Arc<LoadedWorkbook>>,
    /// Configured team resolved against the installed workbook.
    pub focus: Option<TeamId>,
    /// Set when the workbook cannot be loaded; blocks every other view.
    pub load_error: Option<String>,

    // Request
    pub selection: FilterSelection,
    pub page: usize,
    pub stat: StatKind,
    pub trend_metric: TrendMetric,
    pub search: Option<String>,
    pub search_input: String,
    pub show_published: bool,

    // Derived
    pub view: Option<DashboardView>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(config: DashboardConfig, export_dir: PathBuf) -> Self {
        Self {
            active_panel: Panel::Summary,
            running: true,
            overlay: Overlay::None,
            scroll: 0,
            config,
            cache: WorkbookCache::new(),
            workbook: None,
            focus: None,
            load_error: None,
            selection: FilterSelection::default(),
            page: 0,
            stat: StatKind::default(),
            trend_metric: TrendMetric::default(),
            search: None,
            search_input: String::new(),
            show_published: false,
            view: None,
            status_message: None,
            export_dir,
        }
    }

    // ─── Loading ────────────────────────────────────────────────────

    /// Load (or re-validate) the configured workbook through the cache.
    pub fn reload(&mut self) {
        let path = self.config.workbook.path.clone();
        let fresh = self.cache.is_fresh(&path);
        match self.cache.get_or_load(&path) {
            Ok(loaded) => {
                if fresh && self.workbook.is_some() {
                    self.set_status("Workbook unchanged");
                    return;
                }
                self.install(loaded);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "workbook load failed");
                self.workbook = None;
                self.focus = None;
                self.view = None;
                self.load_error = Some(describe_load_error(&path, &e));
            }
        }
    }

    /// Take a loaded workbook and rebuild the view.
    pub fn install(&mut self, loaded: Arc<LoadedWorkbook>) {
        let skipped = loaded.report.total_skipped();
        let matches = loaded.dataset.matches.len();
        info!(matches, skipped, fingerprint = loaded.fingerprint.short(), "workbook installed");
        self.focus = resolve_focus(&loaded.dataset, &self.config);
        self.workbook = Some(loaded);
        self.load_error = None;
        self.recompute();
        if skipped > 0 {
            self.set_warning(format!("Loaded {matches} matches, {skipped} row(s) skipped"));
        } else {
            self.set_status(format!("Loaded {matches} matches"));
        }
    }

    /// Rebuild the dashboard view from the current request.
    pub fn recompute(&mut self) {
        let Some(wb) = self.workbook.clone() else {
            self.view = None;
            return;
        };
        let built = {
            let dash = Dashboard::with_focus(&wb.dataset, &self.config, self.focus.clone());
            dash.validate(&self.selection).map(|filter| {
                dash.build(&DashboardRequest {
                    filter,
                    page: self.page,
                    stat: self.stat,
                    trend_metric: self.trend_metric,
                    search: self.search.clone(),
                })
            })
        };
        match built {
            Ok(view) => {
                if let ViewState::Ready(p) = &view.matches {
                    self.page = p.page;
                }
                debug!(panel = self.active_panel.label(), "view rebuilt");
                self.view = Some(view);
            }
            Err(e) => {
                // Stored selections can go stale when the workbook changes.
                warn!(error = %e, "filter selection rejected, clearing");
                self.selection = FilterSelection::default();
                self.page = 0;
                self.recompute();
                self.set_warning(format!("Filters cleared: {e}"));
            }
        }
    }

    fn dashboard(&self) -> Option<(Arc<LoadedWorkbook>, DashboardConfig, Option<TeamId>)> {
        self.workbook
            .clone()
            .map(|wb| (wb, self.config.clone(), self.focus.clone()))
    }

    // ─── Filters ────────────────────────────────────────────────────

    pub fn cycle_season(&mut self) {
        let Some((wb, config, focus)) = self.dashboard() else { return };
        let options = Dashboard::with_focus(&wb.dataset, &config, focus).options();
        let current = self
            .selection
            .seasons
            .first()
            .and_then(|s| options.seasons.iter().position(|c| c.id.as_str() == s.as_str()));
        let label = match next_choice(options.seasons.len(), current) {
            Some(i) => {
                self.selection.seasons = vec![options.seasons[i].id.to_string()];
                options.seasons[i].label.clone()
            }
            None => {
                self.selection.seasons.clear();
                "all".to_string()
            }
        };
        self.filters_changed();
        self.set_status(format!("Season: {label}"));
    }

    pub fn cycle_opponent(&mut self) {
        let Some((wb, config, focus)) = self.dashboard() else { return };
        let dash = Dashboard::with_focus(&wb.dataset, &config, focus);
        if dash.focus().is_none() {
            self.set_warning("Opponent filter needs a focus team");
            return;
        }
        let options = dash.options();
        let current = self.selection.opponent.as_deref().and_then(|o| {
            options
                .opponents
                .iter()
                .position(|c| c.label == o || c.id.as_str() == o)
        });
        let label = match next_choice(options.opponents.len(), current) {
            Some(i) => {
                let label = options.opponents[i].label.clone();
                self.selection.opponent = Some(label.clone());
                label
            }
            None => {
                self.selection.opponent = None;
                "all".to_string()
            }
        };
        self.filters_changed();
        self.set_status(format!("Opponent: {label}"));
    }

    pub fn cycle_venue(&mut self) {
        let focus = self.view.as_ref().and_then(|v| v.team.as_ref()).is_some();
        if !focus {
            self.set_warning("Venue filter needs a focus team");
            return;
        }
        self.selection.venue = self.selection.venue.next();
        let label = self.selection.venue.label();
        self.filters_changed();
        self.set_status(format!("Venue: {label}"));
    }

    pub fn clear_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.search = None;
        self.filters_changed();
        self.set_status("Filters cleared");
    }

    fn filters_changed(&mut self) {
        self.page = 0;
        self.scroll = 0;
        self.recompute();
    }

    // ─── View options ───────────────────────────────────────────────

    pub fn cycle_stat(&mut self) {
        self.stat = self.stat.next();
        self.scroll = 0;
        self.recompute();
        self.set_status(format!("Leaderboard: {}", self.stat.label()));
    }

    pub fn cycle_trend_metric(&mut self) {
        self.trend_metric = self.trend_metric.next();
        self.recompute();
        self.set_status(format!("Trend: {}", self.trend_metric.label()));
    }

    pub fn toggle_published(&mut self) {
        self.show_published = !self.show_published;
        self.scroll = 0;
        let which = if self.show_published { "published" } else { "computed" };
        self.set_status(format!("Standings: {which}"));
    }

    pub fn apply_search(&mut self) {
        let needle = self.search_input.trim().to_string();
        self.search = (!needle.is_empty()).then_some(needle);
        self.search_input.clear();
        self.overlay = Overlay::None;
        self.scroll = 0;
        self.recompute();
    }

    pub fn next_page(&mut self) {
        let has_next = match self.view.as_ref().map(|v| &v.matches) {
            Some(ViewState::Ready(p)) => p.has_next(),
            _ => false,
        };
        if has_next {
            self.page += 1;
            self.recompute();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.recompute();
        }
    }

    // ─── Export ─────────────────────────────────────────────────────

    /// Write the full filtered match list (not just the visible page).
    pub fn export_matches(&mut self) {
        let Some((wb, config, focus)) = self.dashboard() else { return };
        let dash = Dashboard::with_focus(&wb.dataset, &config, focus);
        let filter = match dash.validate(&self.selection) {
            Ok(f) => f,
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };
        let list = dash.match_list(&filter);
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.export_dir.join(format!("rinkstats_matches_{stamp}.csv"));
        match write_matches_csv(&path, &list, config.display.delimiter_byte()) {
            Ok(()) => {
                info!(path = %path.display(), rows = list.len(), "matches exported");
                self.set_status(format!("Exported {} matches to {}", list.len(), path.display()));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.set_error(format!("Export failed: {e:#}"));
            }
        }
    }

    // ─── Status ─────────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    pub fn dataset(&self) -> Option<&rinkstats_core::domain::Dataset> {
        self.workbook.as_deref().map(|wb| &wb.dataset)
    }
}

/// Error screen text: schema problems go one per line.
fn describe_load_error(path: &Path, err: &LoadError) -> String {
    match err {
        LoadError::Schema(schema) if schema.problems.len() > 1 => {
            let mut text = format!("{}: invalid workbook", path.display());
            for problem in &schema.problems {
                text.push_str("\n  - ");
                text.push_str(&problem.to_string());
            }
            text
        }
        _ => format!("{}: {err}", path.display()),
    }
}
