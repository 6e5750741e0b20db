//! Keyboard input dispatch: error screen, overlays, global keys, then
//! panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. A failed load blocks everything except reload and quit.
    if app.load_error.is_some() {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.running = false,
            KeyCode::Char('r') => app.reload(),
            _ => {}
        }
        return;
    }

    // 2. Overlays consume input next.
    if app.overlay == Overlay::Search {
        handle_search_overlay(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(d @ '1'..='6') => {
            let i = d as usize - '1' as usize;
            if let Some(panel) = Panel::from_index(i) {
                switch_to(app, panel);
            }
        }
        KeyCode::Char('?') => switch_to(app, Panel::Help),
        KeyCode::Tab => switch_to(app, app.active_panel.next()),
        KeyCode::BackTab => switch_to(app, app.active_panel.prev()),
        KeyCode::Char('s') => app.cycle_season(),
        KeyCode::Char('o') => app.cycle_opponent(),
        KeyCode::Char('v') => app.cycle_venue(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('m') => app.cycle_stat(),
        KeyCode::Char('x') => app.export_matches(),
        KeyCode::Char('r') => app.reload(),
        _ => handle_panel_key(app, key),
    }
}

fn switch_to(app: &mut AppState, panel: Panel) {
    if app.active_panel != panel {
        app.active_panel = panel;
        app.scroll = 0;
    }
}

fn handle_panel_key(app: &mut AppState, key: KeyEvent) {
    match (app.active_panel, key.code) {
        (_, KeyCode::Char('j') | KeyCode::Down) => app.scroll += 1,
        (_, KeyCode::Char('k') | KeyCode::Up) => app.scroll = app.scroll.saturating_sub(1),
        (_, KeyCode::Home) => app.scroll = 0,
        (Panel::Summary, KeyCode::Char('g')) => app.cycle_trend_metric(),
        (Panel::Matches, KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown) => app.next_page(),
        (Panel::Matches, KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp) => app.prev_page(),
        (Panel::Standings, KeyCode::Char('t')) => app.toggle_published(),
        (Panel::Players, KeyCode::Char('/')) => {
            app.search_input = app.search.clone().unwrap_or_default();
            app.overlay = Overlay::Search;
        }
        _ => {}
    }
}

fn handle_search_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.search_input.clear();
        }
        KeyCode::Enter => app.apply_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}
