//! Summary: record, rates, form, extremes, opponent records and the
//! cumulative trend chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;
use rinkstats_stats::{DashboardView, MatchView, TrendPoint, ViewState};

use crate::app::AppState;
use crate::theme;
use crate::ui::{no_data, scrolled, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    f.render_widget(scrolled(summary_lines(view), app.scroll, cols[0]), cols[0]);

    match &view.trend {
        ViewState::Ready(points) if !points.is_empty() => {
            render_chart(f, cols[1], points, app.trend_metric.label())
        }
        ViewState::Ready(_) => f.render_widget(Paragraph::new(no_data(rinkstats_stats::NO_DATA)), cols[1]),
        ViewState::NoData(msg) => f.render_widget(Paragraph::new(no_data(msg)), cols[1]),
    }
}

fn row<'a>(label: &str, value: Vec<Span<'a>>) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{label:<16}"), theme::muted())];
    spans.extend(value);
    Line::from(spans)
}

fn match_line(m: &MatchView) -> Vec<Span<'static>> {
    vec![Span::styled(
        format!("{} {} {} {}", m.date_text(), m.home_name, m.score_text(), m.away_name),
        theme::text(),
    )]
}

fn summary_lines(view: &DashboardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let s = match &view.summary {
        ViewState::Ready(s) => s,
        ViewState::NoData(msg) => return vec![no_data(msg)],
    };
    let r = &s.record;

    lines.push(row(
        "Record (W-D-L)",
        vec![
            Span::styled(r.text(), theme::accent_bold()),
            Span::styled(format!("  {} pts", r.points), theme::text()),
        ],
    ));
    lines.push(row(
        "Games",
        vec![Span::styled(format!("{} played, {} not played", r.games, s.unplayed), theme::text())],
    ));
    lines.push(row(
        "Goals",
        vec![
            Span::styled(format!("{}-{} ", r.goals_for, r.goals_against), theme::text()),
            Span::styled(format!("({:+})", r.goal_diff()), theme::signed(r.goal_diff())),
        ],
    ));
    lines.push(row(
        "Per game",
        vec![Span::styled(
            format!(
                "{:.2} pts, {:.2} for, {:.2} against",
                s.points_per_game, s.goals_for_per_game, s.goals_against_per_game
            ),
            theme::text(),
        )],
    ));
    lines.push(row(
        "W / D / L %",
        vec![
            Span::styled(format!("{:.1}", s.win_pct), theme::win_pct(s.win_pct)),
            Span::styled(format!(" / {:.1} / {:.1}", s.draw_pct, s.loss_pct), theme::text()),
        ],
    ));

    let mut form: Vec<Span> = s
        .form
        .results
        .iter()
        .map(|o| Span::styled(format!("{} ", o.code()), theme::outcome(*o)))
        .collect();
    if form.is_empty() {
        form.push(Span::styled("-", theme::muted()));
    }
    lines.push(row("Form", form));

    if let Some(m) = &s.best_win {
        lines.push(row("Best win", match_line(m)));
    }
    if let Some(m) = &s.worst_loss {
        lines.push(row("Worst loss", match_line(m)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{:<22} {:>3} {:>8} {:>7} {:>4} {:>6}", "Opponent", "GP", "W-D-L", "GF-GA", "Pts", "Win%"),
        theme::accent_bold(),
    )));
    match &view.opponents {
        ViewState::Ready(rows) => {
            for o in rows {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(
                            "{:<22} {:>3} {:>8} {:>7} {:>4} ",
                            truncate(&o.name, 22),
                            o.record.games,
                            o.record.text(),
                            format!("{}-{}", o.record.goals_for, o.record.goals_against),
                            o.record.points
                        ),
                        theme::text(),
                    ),
                    Span::styled(format!("{:>6.1}", o.win_pct), theme::win_pct(o.win_pct)),
                ]));
            }
        }
        ViewState::NoData(msg) => lines.push(no_data(msg)),
    }
    lines
}

fn render_chart(f: &mut Frame, area: Rect, points: &[TrendPoint], label: &str) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.index as f64, p.cumulative as f64))
        .collect();

    let min_y = data.iter().map(|d| d.1).fold(0.0, f64::min);
    let max_y = data.iter().map(|d| d.1).fold(0.0, f64::max);
    let padding = ((max_y - min_y).abs() * 0.05).max(1.0);
    let (y_min, y_max) = (min_y - padding, max_y + padding);
    let x_max = points.len() as f64;

    let first = points.first().map(|p| p.date.to_string()).unwrap_or_default();
    let last = points.last().map(|p| p.date.to_string()).unwrap_or_default();

    let dataset = Dataset::default()
        .name(label.to_string())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Match", theme::muted()))
                .style(theme::muted())
                .bounds([1.0, x_max.max(2.0)])
                .labels(vec![Span::styled(first, theme::muted()), Span::styled(last, theme::muted())]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(format!("Cumulative {}", label.to_lowercase()), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
