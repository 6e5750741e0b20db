//! Bottom status bar: key hints for the active tab, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Panel, StatusLevel};
use crate::theme;

fn hints(panel: Panel) -> &'static str {
    match panel {
        Panel::Summary => " s:season o:opp v:venue c:clear g:trend x:export r:reload q:quit",
        Panel::Matches => " s/o/v:filter n/p:page j/k:scroll x:export q:quit",
        Panel::Standings => " s:season t:computed/published j/k:scroll q:quit",
        Panel::Players => " s/o/v:filter m:stat /:search j/k:scroll q:quit",
        Panel::Rosters => " s:season j/k:scroll q:quit",
        Panel::Help => " 1-6:tab Tab:next q:quit",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![Span::styled(hints(app.active_panel), theme::muted())];

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
