//! Players: leaderboard for the selection, sorted by the chosen stat.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::Frame;
use rinkstats_stats::{DashboardView, StatKind, ViewState};

use crate::app::AppState;
use crate::theme;
use crate::ui::{no_data, scrolled, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let mut lines: Vec<Line> = Vec::new();

    let limit = match app.config.display.leaderboard_size {
        0 => "all".to_string(),
        n => format!("top {n}"),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("Sorted by {} ", app.stat.label()), theme::accent()),
        Span::styled(format!("({limit}, {})", view.period), theme::muted()),
        Span::styled("  [m]stat [/]search [c]clear", theme::muted()),
    ]));
    lines.push(Line::from(""));

    let entries = match &view.leaderboard {
        ViewState::Ready(entries) => entries,
        ViewState::NoData(msg) => {
            lines.push(no_data(msg));
            f.render_widget(scrolled(lines, 0, area), area);
            return;
        }
    };

    let columns = [
        ("GP", StatKind::Games),
        ("G", StatKind::Goals),
        ("A", StatKind::Assists),
        ("Pts", StatKind::Points),
        ("PIM", StatKind::PenaltyMinutes),
    ];
    let mut header = vec![Span::styled(format!("{:>4} {:<24} {:>4}", "#", "Player", "Szn"), theme::muted())];
    for (label, stat) in columns {
        let style = if stat == app.stat { theme::accent_bold() } else { theme::muted() };
        header.push(Span::styled(format!(" {label:>5}"), style));
    }
    header.push(Span::styled(format!(" {:>8}", "Pts/szn"), theme::muted()));
    lines.push(Line::from(header));

    for e in entries {
        let mut spans = vec![Span::styled(
            format!("{:>4} {:<24} {:>4}", e.rank, truncate(&e.name, 24), e.seasons),
            theme::text(),
        )];
        for (_, stat) in columns {
            let style = if stat == app.stat {
                theme::accent().add_modifier(Modifier::BOLD)
            } else {
                theme::text()
            };
            spans.push(Span::styled(format!(" {:>5}", e.value(stat)), style));
        }
        spans.push(Span::styled(format!(" {:>8.2}", e.points_per_season), theme::neutral()));
        lines.push(Line::from(spans));
    }

    f.render_widget(scrolled(lines, app.scroll, area), area);
}
