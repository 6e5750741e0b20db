//! Rosters: squad composition on the left, the roster list on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use rinkstats_stats::roster::RoleCategory;
use rinkstats_stats::{DashboardView, ViewState};

use crate::app::AppState;
use crate::theme;
use crate::ui::{no_data, scrolled, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    f.render_widget(scrolled(summary_lines(view), 0, cols[0]), cols[0]);
    f.render_widget(scrolled(roster_list(app, view), app.scroll, cols[1]), cols[1]);
}

fn summary_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let r = match &view.rosters {
        ViewState::Ready(r) => r,
        ViewState::NoData(msg) => return vec![no_data(msg)],
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Unique players  ", theme::muted()),
            Span::styled(r.unique_players.to_string(), theme::accent_bold()),
        ]),
        Line::from(vec![
            Span::styled("Goalkeepers     ", theme::muted()),
            Span::styled(r.goalkeepers.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Skaters         ", theme::muted()),
            Span::styled(r.skaters.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Staff           ", theme::muted()),
            Span::styled(r.staff.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Average squad   ", theme::muted()),
            Span::styled(format!("{:.1} (largest {})", r.average_squad, r.largest_squad), theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled(format!("{:<12} {:>7} {:>5}", "Season", "Players", "Staff"), theme::accent_bold())),
    ];
    for s in &r.squads {
        lines.push(Line::from(Span::styled(
            format!("{:<12} {:>7} {:>5}", truncate(&s.season_label, 12), s.players, s.staff),
            theme::text(),
        )));
    }
    if !r.most_seasons.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{:<22} {:>7}", "Most seasons", "Seasons"),
            theme::accent_bold(),
        )));
        for v in &r.most_seasons {
            lines.push(Line::from(Span::styled(
                format!("{:<22} {:>7}", truncate(&v.name, 22), v.seasons),
                theme::text(),
            )));
        }
    }
    lines
}

fn roster_list(app: &AppState, view: &DashboardView) -> Vec<Line<'static>> {
    let entries = match &view.roster_lines {
        ViewState::Ready(entries) => entries,
        ViewState::NoData(msg) => return vec![no_data(msg)],
    };
    let ds = app.dataset();
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<10} {:>3} {:<22} {:<11} {:<16}", "Season", "#", "Player", "Category", "Role"),
        theme::accent_bold(),
    ))];
    for l in entries {
        let season = ds.map(|d| d.season_label(&l.season)).unwrap_or_else(|| l.season.to_string());
        let category_style = match l.category {
            RoleCategory::Goalkeeper => theme::neutral(),
            RoleCategory::Skater => theme::text(),
            RoleCategory::Staff => theme::muted(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{:<10} {:>3} {:<22} ",
                    truncate(&season, 10),
                    l.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
                    truncate(&l.name, 22)
                ),
                theme::text(),
            ),
            Span::styled(format!("{:<11} ", l.category.label()), category_style),
            Span::styled(truncate(&l.role, 16), theme::muted()),
        ]));
    }
    lines
}
