//! Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Navigation");
    key(&mut lines, "1-6", "Switch to tab by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle tabs forward / back");
    key(&mut lines, "j / k", "Scroll down / up");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Filters (every tab)");
    key(&mut lines, "s", "Cycle season: all, newest, ..., oldest");
    key(&mut lines, "o", "Cycle opponent of the focus team");
    key(&mut lines, "v", "Cycle venue: all, home, away");
    key(&mut lines, "c", "Clear all filters and the player search");
    key(&mut lines, "m", "Cycle leaderboard stat");
    key(&mut lines, "x", "Export the filtered match list as CSV");
    key(&mut lines, "r", "Reload the workbook if it changed on disk");
    lines.push(Line::from(""));

    section(&mut lines, "Summary");
    key(&mut lines, "g", "Cycle the trend chart metric");
    lines.push(Line::from(""));

    section(&mut lines, "Matches");
    key(&mut lines, "n / p", "Next / previous page");
    lines.push(Line::from(""));

    section(&mut lines, "Standings");
    key(&mut lines, "t", "Toggle computed / published tables");
    lines.push(Line::from(""));

    section(&mut lines, "Players");
    key(&mut lines, "/", "Search by name (ranks are kept)");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "", "Filters and the active tab are restored on the next start.");
    key(&mut lines, "", "Season totals cannot be split by opponent or venue; the");
    key(&mut lines, "", "leaderboard shows per-match lines only under those filters.");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
