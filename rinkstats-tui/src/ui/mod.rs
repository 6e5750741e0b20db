//! Top-level layout: tab bar, filter bar, active panel, status bar.

pub mod help_panel;
pub mod matches_panel;
pub mod overlays;
pub mod players_panel;
pub mod rosters_panel;
pub mod standings_panel;
pub mod status_bar;
pub mod summary_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // A failed load replaces the whole screen; nothing partial is shown.
    if let Some(err) = &app.load_error {
        overlays::render_load_error(f, f.area(), err);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, chunks[0], app);
    render_filter_bar(f, chunks[1], app);
    draw_panel(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    if app.overlay == Overlay::Search {
        overlays::render_search(f, chunks[2], &app.search_input);
    }
}

fn render_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let titles: Vec<Line> = Panel::ALL
        .iter()
        .map(|p| Line::from(format!(" {} {} ", p.index() + 1, p.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_panel.index())
        .style(theme::tab(false))
        .highlight_style(theme::tab(true))
        .divider(Span::styled("|", theme::muted()));
    f.render_widget(tabs, area);
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        return;
    };
    let sel = &app.selection;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.team_name.as_deref().unwrap_or("No focus team")),
            theme::accent_bold(),
        ),
        Span::styled("| Season ", theme::muted()),
        Span::styled(view.period.clone(), theme::text()),
        Span::styled(" | Opponent ", theme::muted()),
        Span::styled(sel.opponent.clone().unwrap_or_else(|| "all".into()), theme::text()),
        Span::styled(" | Venue ", theme::muted()),
        Span::styled(sel.venue.label(), theme::text()),
    ];
    if let Some(search) = &app.search {
        spans.push(Span::styled(" | Search ", theme::muted()));
        spans.push(Span::styled(format!("\"{search}\""), theme::warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if panel == Panel::Help {
        help_panel::render(f, inner);
        return;
    }
    let Some(view) = &app.view else {
        let msg = Line::from(Span::styled("No workbook loaded. Press r to load.", theme::muted()));
        f.render_widget(Paragraph::new(msg), inner);
        return;
    };

    match panel {
        Panel::Summary => summary_panel::render(f, inner, app, view),
        Panel::Matches => matches_panel::render(f, inner, app, view),
        Panel::Standings => standings_panel::render(f, inner, app, view),
        Panel::Players => players_panel::render(f, inner, app, view),
        Panel::Rosters => rosters_panel::render(f, inner, app, view),
        Panel::Help => {}
    }
}

/// Lines scrolled by `scroll`, clamped so the last line stays reachable.
pub fn scrolled(lines: Vec<Line<'_>>, scroll: usize, area: Rect) -> Paragraph<'_> {
    let max = lines.len().saturating_sub(area.height as usize);
    let offset = scroll.min(max).min(u16::MAX as usize) as u16;
    Paragraph::new(lines).scroll((offset, 0))
}

pub fn no_data(msg: &str) -> Line<'static> {
    Line::from(Span::styled(format!("({msg})"), theme::muted()))
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('.');
        out
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
