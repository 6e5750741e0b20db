//! Standings: computed league tables, or the published ones (`t`).

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;
use rinkstats_core::domain::TeamId;
use rinkstats_stats::{DashboardView, PublishedTable, StandingsTable, ViewState};

use crate::app::AppState;
use crate::theme;
use crate::ui::{no_data, scrolled, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &DashboardView) {
    let focus = view.team.as_ref();
    let mut lines: Vec<Line> = Vec::new();

    let which = if app.show_published { "Published tables" } else { "Computed from results" };
    lines.push(Line::from(vec![
        Span::styled(which, theme::accent()),
        Span::styled("  [t]toggle", theme::muted()),
    ]));
    lines.push(Line::from(""));

    if app.show_published {
        match &view.published {
            ViewState::Ready(tables) => {
                for t in tables {
                    published_table(&mut lines, t, focus);
                }
            }
            ViewState::NoData(msg) => lines.push(no_data(msg)),
        }
    } else {
        match &view.standings {
            ViewState::Ready(tables) => {
                for t in tables {
                    computed_table(&mut lines, t, focus);
                }
            }
            ViewState::NoData(msg) => lines.push(no_data(msg)),
        }
    }

    f.render_widget(scrolled(lines, app.scroll, area), area);
}

fn title(lines: &mut Vec<Line<'_>>, season: &str, competition: &str, stage: Option<&str>) {
    let text = match stage {
        Some(stage) => format!("{season}  {competition} ({stage})"),
        None => format!("{season}  {competition}"),
    };
    lines.push(Line::from(Span::styled(text, theme::accent_bold())));
}

fn computed_table(lines: &mut Vec<Line<'_>>, t: &StandingsTable, focus: Option<&TeamId>) {
    title(lines, &t.season_label, &t.competition_name, t.stage.as_deref());
    lines.push(Line::from(Span::styled(
        format!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4}",
            "#", "Team", "GP", "W", "D", "L", "GF-GA", "GD", "Pts"
        ),
        theme::muted(),
    )));
    for r in &t.rows {
        let style = if focus == Some(&r.team) { theme::highlight() } else { theme::text() };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} ",
                    r.rank,
                    truncate(&r.team_name, 24),
                    r.played,
                    r.won,
                    r.drawn,
                    r.lost,
                    format!("{}-{}", r.goals_for, r.goals_against)
                ),
                style,
            ),
            Span::styled(format!("{:>+4} ", r.goal_diff()), theme::signed(r.goal_diff())),
            Span::styled(format!("{:>4}", r.points), style),
        ]));
    }
    lines.push(Line::from(""));
}

fn published_table(lines: &mut Vec<Line<'_>>, t: &PublishedTable, focus: Option<&TeamId>) {
    title(lines, &t.season_label, &t.competition_name, t.stage.as_deref());
    lines.push(Line::from(Span::styled(
        format!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4}",
            "#", "Team", "GP", "W", "D", "L", "GF-GA", "Pts"
        ),
        theme::muted(),
    )));
    let cell = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    for r in &t.rows {
        let style = if focus == Some(&r.team) { theme::highlight() } else { theme::text() };
        let goals = match (r.goals_for, r.goals_against) {
            (Some(gf), Some(ga)) => format!("{gf}-{ga}"),
            _ => "-".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4}",
                r.rank,
                truncate(&r.team_name, 24),
                cell(r.games),
                cell(r.wins),
                cell(r.draws),
                cell(r.losses),
                goals,
                cell(r.points)
            ),
            style,
        )));
    }
    lines.push(Line::from(""));
}
