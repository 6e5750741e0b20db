//! Filter and tab persistence: JSON save/load across restarts.

use std::path::Path;

use rinkstats_stats::{FilterSelection, StatKind, TrendMetric};
use serde::{Deserialize, Serialize};

use crate::app::{AppState, Panel};

/// Serializable subset of app state that persists across restarts.
///
/// Filters are stored as the user-facing selection, not resolved ids, so a
/// changed workbook re-validates them on the next start.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub selection: FilterSelection,
    pub active_panel: Panel,
    pub stat: StatKind,
    pub trend_metric: TrendMetric,
    pub show_published: bool,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selection: app.selection.clone(),
        active_panel: app.active_panel,
        stat: app.stat,
        trend_metric: app.trend_metric,
        show_published: app.show_published,
    }
}

/// Apply before the first load; `install` validates the selection.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.selection = state.selection;
    app.active_panel = state.active_panel;
    app.stat = state.stat;
    app.trend_metric = state.trend_metric;
    app.show_published = state.show_published;
}
