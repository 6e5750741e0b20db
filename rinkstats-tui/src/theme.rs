//! Colour tokens and style helpers for the dashboard.
//!
//! Neon accents on a dark terminal:
//! - **Accent**: electric cyan (focus, headings, selected tab)
//! - **Positive**: neon green (wins, positive goal difference)
//! - **Negative**: hot pink (losses, load errors)
//! - **Warning**: neon orange (draws, filter warnings)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (labels, hints)

use ratatui::style::{Color, Modifier, Style};
use rinkstats_stats::Outcome;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Highlighted row, e.g. the focus team in a table.
pub fn highlight() -> Style {
    accent_bold().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn tab(active: bool) -> Style {
    if active {
        accent_bold().add_modifier(Modifier::UNDERLINED)
    } else {
        muted()
    }
}

pub fn outcome(o: Outcome) -> Style {
    match o {
        Outcome::Win => positive(),
        Outcome::Draw => warning(),
        Outcome::Loss => negative(),
    }
}

/// Goal difference or any signed delta.
pub fn signed(value: i64) -> Style {
    match value {
        v if v > 0 => positive(),
        0 => text(),
        _ => negative(),
    }
}

/// Win percentage bands.
pub fn win_pct(pct: f64) -> Style {
    match pct {
        p if p >= 60.0 => positive(),
        p if p >= 40.0 => accent(),
        p if p >= 25.0 => neutral(),
        _ => warning(),
    }
}
