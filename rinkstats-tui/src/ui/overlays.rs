//! Overlay widgets: player search input and the blocking load-error screen.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_search(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Search players [Enter]apply [Esc]cancel ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" Name: ", theme::muted()),
            Span::styled(input, theme::text()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text).block(block), popup);
}

/// Full-screen error shown instead of the dashboard when loading fails.
pub fn render_load_error(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(70, 40, area);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Cannot load workbook ")
        .title_style(theme::negative());

    let mut text = vec![Line::from("")];
    text.extend(message.lines().map(|l| Line::from(Span::styled(l, theme::negative()))));
    text.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Fix the workbook or the path in rinkstats.toml, then press r to retry.",
            theme::muted(),
        )),
        Line::from(Span::styled("Press q to quit.", theme::muted())),
    ]);
    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}
