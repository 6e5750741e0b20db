//! Matches: one page of the filtered list, newest first.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;
use rinkstats_stats::{DashboardView, ViewState};

use crate::app::AppState;
use crate::theme;
use crate::ui::{no_data, scrolled, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let mut lines: Vec<Line> = Vec::new();

    let page = match &view.matches {
        ViewState::Ready(p) => p,
        ViewState::NoData(msg) => {
            f.render_widget(scrolled(vec![no_data(msg)], 0, area), area);
            return;
        }
    };

    lines.push(Line::from(vec![
        Span::styled(
            format!("Page {}/{} ", page.page + 1, page.total_pages),
            theme::accent(),
        ),
        Span::styled(format!("({} matches)", page.total_items), theme::muted()),
        Span::styled("  [n/p]page [x]export all", theme::muted()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{:<10} {:<10} {:<16} {:<20} {:<20} {:>6}  {:<3}",
            "Date", "Season", "Competition", "Home", "Away", "Score", "Res"
        ),
        theme::accent_bold(),
    )));

    for m in &page.items {
        let outcome = m.outcome();
        let style = if view.team.is_some() && outcome.is_none() {
            theme::muted()
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{:<10} {:<10} {:<16} {:<20} {:<20} {:>6}  ",
                    m.date_text(),
                    truncate(&m.season_label, 10),
                    truncate(m.competition.as_deref().unwrap_or(""), 16),
                    truncate(&m.home_name, 20),
                    truncate(&m.away_name, 20),
                    m.score_text()
                ),
                style,
            ),
            match outcome {
                Some(o) => Span::styled(o.code(), theme::outcome(o)),
                None => Span::raw(""),
            },
        ]));
    }

    f.render_widget(scrolled(lines, app.scroll, area), area);
}
