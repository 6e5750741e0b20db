//! rinkstats CLI: inspect and export club statistics from the workbook.
//!
//! Commands:
//! - `validate`: load the workbook and report skipped rows
//! - `summary`: focus-team record, form and per-opponent breakdown
//! - `matches`: the filtered match list, newest first
//! - `standings`: computed league tables (or the published ones)
//! - `players`: leaderboard, or one player's season breakdown
//! - `rosters`: squad composition and the roster list
//! - `trend`: cumulative series of a result metric
//! - `export`: write a filtered view as CSV or JSON

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rinkstats_core::data::{LoadedWorkbook, WorkbookCache};
use rinkstats_core::domain::Dataset;
use rinkstats_stats::config::CONFIG_FILE;
use rinkstats_stats::export::{export_json, leaderboard_csv, matches_csv, standings_csv};
use rinkstats_stats::leaderboard::{player_breakdown, select_stat_rows};
use rinkstats_stats::{
    Dashboard, DashboardConfig, DashboardRequest, DashboardView, FilterSelection, MatchFilter,
    StatKind, TrendMetric, Venue, ViewState,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "rinkstats",
    about = "rinkstats: hockey club statistics from the club workbook"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Config file. Defaults to ./rinkstats.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workbook path, overriding the config.
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    /// Focus team name or alias, overriding the config.
    #[arg(long, global = true, conflicts_with = "no_team")]
    team: Option<String>,

    /// Disable the focus team; team views report no data.
    #[arg(long, global = true, default_value_t = false)]
    no_team: bool,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Season id; repeat for several. Omit for all seasons.
    #[arg(long = "season")]
    seasons: Vec<String>,

    /// Opponent team name, alias or id.
    #[arg(long)]
    opponent: Option<String>,

    /// home, away or all.
    #[arg(long, default_value = "all")]
    venue: Venue,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            seasons: self.seasons.clone(),
            opponent: self.opponent.clone(),
            venue: self.venue,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load the workbook and report what was read, kept and skipped.
    Validate,
    /// Record, rates, form, best win, worst loss and opponent records.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List filtered matches, newest first.
    Matches {
        #[command(flatten)]
        filter: FilterArgs,

        /// 1-based page of `display.page_size` rows. Omit for every row.
        #[arg(long)]
        page: Option<usize>,
    },
    /// League tables for the selected seasons.
    Standings {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show the published tables from the workbook instead.
        #[arg(long, default_value_t = false)]
        published: bool,
    },
    /// Player leaderboard for the selection.
    Players {
        #[command(flatten)]
        filter: FilterArgs,

        /// points, goals, assists, pim or games.
        #[arg(long, default_value = "points")]
        stat: StatKind,

        /// Case-insensitive name filter, applied after ranking.
        #[arg(long)]
        search: Option<String>,

        /// Rows to show. 0 shows all. Defaults to `display.leaderboard_size`.
        #[arg(long)]
        limit: Option<usize>,

        /// Show one player's season-by-season breakdown.
        #[arg(long, conflicts_with_all = ["search", "limit"])]
        player: Option<String>,
    },
    /// Squad sizes, role mix and longest-serving players.
    Rosters {
        #[command(flatten)]
        filter: FilterArgs,

        /// List every roster line instead of the summary.
        #[arg(long, default_value_t = false)]
        list: bool,
    },
    /// Cumulative series of a result metric, in date order.
    Trend {
        #[command(flatten)]
        filter: FilterArgs,

        /// points, wins, draws, losses, gf, ga or gd.
        #[arg(long, default_value = "points")]
        metric: TrendMetric,
    },
    /// Write a filtered view to a file.
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// What to export.
        #[arg(long, value_enum, default_value_t = ExportKind::Matches)]
        kind: ExportKind,

        /// Output file; parent directories are created.
        #[arg(long, short)]
        output: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// CSV delimiter, overriding `display.csv_delimiter`.
        #[arg(long)]
        delimiter: Option<char>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportKind {
    Matches,
    Standings,
    Players,
    /// The whole dashboard view (JSON only).
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.global.log_level);

    let config = resolve_config(&cli.global)?;
    let loaded = load(&config.workbook.path)?;
    let json = cli.global.json;

    match cli.command {
        Commands::Validate => run_validate(&loaded, &config, json),
        Commands::Summary { filter } => run_summary(&loaded.dataset, &config, &filter, json),
        Commands::Matches { filter, page } => run_matches(&loaded.dataset, &config, &filter, page, json),
        Commands::Standings { filter, published } => {
            run_standings(&loaded.dataset, &config, &filter, published, json)
        }
        Commands::Players {
            filter,
            stat,
            search,
            limit,
            player,
        } => match player {
            Some(name) => run_player(&loaded.dataset, &config, &filter, &name, json),
            None => run_players(&loaded.dataset, &config, &filter, stat, search, limit, json),
        },
        Commands::Rosters { filter, list } => run_rosters(&loaded.dataset, &config, &filter, list, json),
        Commands::Trend { filter, metric } => run_trend(&loaded.dataset, &config, &filter, metric, json),
        Commands::Export {
            filter,
            kind,
            output,
            format,
            delimiter,
        } => run_export(&loaded.dataset, config, &filter, kind, &output, format, delimiter),
    }
}

// ─── Setup ──────────────────────────────────────────────────────────

/// Logs go to stderr so stdout stays clean for tables and JSON.
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.trim().to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn resolve_config(args: &GlobalArgs) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None if Path::new(CONFIG_FILE).is_file() => DashboardConfig::from_file(Path::new(CONFIG_FILE))
            .with_context(|| format!("failed to load {CONFIG_FILE}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = &args.workbook {
        config.workbook.path = path.clone();
    }
    if let Some(team) = &args.team {
        config.team.name = Some(team.clone());
    }
    if args.no_team {
        config.team.name = None;
    }
    config.validate()?;
    debug!(workbook = %config.workbook.path.display(), team = ?config.team.name, "config resolved");
    Ok(config)
}

fn load(path: &Path) -> Result<Arc<LoadedWorkbook>> {
    let mut cache = WorkbookCache::new();
    let loaded = cache
        .get_or_load(path)
        .with_context(|| format!("failed to load workbook {}", path.display()))?;
    info!(
        matches = loaded.dataset.matches.len(),
        skipped = loaded.report.total_skipped(),
        fingerprint = loaded.fingerprint.short(),
        "workbook loaded"
    );
    Ok(loaded)
}

/// Resolve the filter flags against the dataset; bad names are usage errors.
fn filter_for(dash: &Dashboard<'_>, args: &FilterArgs) -> Result<MatchFilter> {
    match dash.validate(&args.selection()) {
        Ok(filter) => Ok(filter),
        Err(e) => bail!("{e}"),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", export_json(value)?);
    Ok(())
}

/// Prints the no-data message and returns `None`, or the ready value.
fn ready_or_report<'v, T>(state: &'v ViewState<T>) -> Option<&'v T> {
    match state {
        ViewState::Ready(v) => Some(v),
        ViewState::NoData(msg) => {
            println!("({msg})");
            None
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn heading(view: &DashboardView) {
    match &view.team_name {
        Some(team) => println!("{team}, {}", view.period),
        None => println!("{}", view.period),
    }
    println!();
}

// ─── Validate ───────────────────────────────────────────────────────

fn run_validate(loaded: &LoadedWorkbook, config: &DashboardConfig, json: bool) -> Result<()> {
    let report = &loaded.report;
    if json {
        return print_json(report);
    }

    let ds = &loaded.dataset;
    println!("Workbook:    {}", config.workbook.path.display());
    println!("Fingerprint: {}", loaded.fingerprint.short());
    println!(
        "Seasons: {}  Teams: {}  Players: {}  Matches: {}",
        ds.seasons.len(),
        ds.teams.len(),
        ds.players.len(),
        ds.matches.len()
    );
    println!();
    println!("{:<20} {:>8} {:>8} {:>8}", "Sheet", "Read", "Kept", "Skipped");
    println!("{}", "-".repeat(47));
    for count in &report.sheets {
        println!(
            "{:<20} {:>8} {:>8} {:>8}",
            count.sheet,
            count.read,
            count.kept,
            report.skipped_in(&count.sheet)
        );
    }

    if report.is_clean() {
        println!();
        println!("No rows skipped.");
        return Ok(());
    }
    println!();
    println!("{:<20} {:>6}  Reason", "Sheet", "Row");
    println!("{}", "-".repeat(60));
    for s in &report.skipped {
        println!("{:<20} {:>6}  {}", s.sheet, s.row, s.reason);
    }
    println!();
    println!("{} row(s) skipped.", report.total_skipped());
    Ok(())
}

// ─── Summary ────────────────────────────────────────────────────────

fn run_summary(ds: &Dataset, config: &DashboardConfig, args: &FilterArgs, json: bool) -> Result<()> {
    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;
    let view = dash.build(&DashboardRequest {
        filter,
        ..DashboardRequest::default()
    });
    if json {
        return print_json(&serde_json::json!({
            "team": view.team_name,
            "period": view.period,
            "summary": view.summary,
            "opponents": view.opponents,
        }));
    }

    heading(&view);
    let Some(s) = ready_or_report(&view.summary) else {
        return Ok(());
    };
    let r = &s.record;
    println!("Record (W-D-L):  {}", r.text());
    println!("Games:           {} played, {} not played", r.games, s.unplayed);
    println!("Points:          {} ({:.2} per game)", r.points, s.points_per_game);
    println!(
        "Goals:           {}-{} ({:+}), {:.2} for / {:.2} against per game",
        r.goals_for,
        r.goals_against,
        r.goal_diff(),
        s.goals_for_per_game,
        s.goals_against_per_game
    );
    println!(
        "Win/Draw/Loss %: {:.1} / {:.1} / {:.1}",
        s.win_pct, s.draw_pct, s.loss_pct
    );
    println!(
        "Form:            {} ({})",
        if s.form.results.is_empty() { "-".to_string() } else { s.form.streak() },
        s.form.record.text()
    );
    if let Some(m) = &s.best_win {
        println!("Best win:        {} {} {} {}", m.date_text(), m.home_name, m.score_text(), m.away_name);
    }
    if let Some(m) = &s.worst_loss {
        println!("Worst loss:      {} {} {} {}", m.date_text(), m.home_name, m.score_text(), m.away_name);
    }

    if let ViewState::Ready(rows) = &view.opponents {
        println!();
        println!(
            "{:<25} {:>4} {:>10} {:>9} {:>5} {:>7}",
            "Opponent", "GP", "W-D-L", "GF-GA", "Pts", "Win %"
        );
        println!("{}", "-".repeat(65));
        for o in rows {
            println!(
                "{:<25} {:>4} {:>10} {:>9} {:>5} {:>7.1}",
                truncate(&o.name, 25),
                o.record.games,
                o.record.text(),
                format!("{}-{}", o.record.goals_for, o.record.goals_against),
                o.record.points,
                o.win_pct
            );
        }
    }
    Ok(())
}

// ─── Matches ────────────────────────────────────────────────────────

fn run_matches(
    ds: &Dataset,
    config: &DashboardConfig,
    args: &FilterArgs,
    page: Option<usize>,
    json: bool,
) -> Result<()> {
    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;

    let (rows, footer) = match page {
        Some(0) => bail!("--page is 1-based"),
        Some(n) => {
            let view = dash.build(&DashboardRequest {
                filter,
                page: n - 1,
                ..DashboardRequest::default()
            });
            match view.matches {
                ViewState::Ready(p) => {
                    let footer = format!(
                        "Page {}/{} ({} matches)",
                        p.page + 1,
                        p.total_pages,
                        p.total_items
                    );
                    (p.items, Some(footer))
                }
                ViewState::NoData(_) => (Vec::new(), None),
            }
        }
        None => (dash.match_list(&filter).rows, None),
    };

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("({})", rinkstats_stats::NO_DATA);
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<18} {:<22} {:<22} {:>7} {:<3}",
        "Date", "Season", "Competition", "Home", "Away", "Score", "Res"
    );
    println!("{}", "-".repeat(98));
    for m in &rows {
        println!(
            "{:<10} {:<10} {:<18} {:<22} {:<22} {:>7} {:<3}",
            m.date_text(),
            m.season_label,
            truncate(m.competition.as_deref().unwrap_or(""), 18),
            truncate(&m.home_name, 22),
            truncate(&m.away_name, 22),
            m.score_text(),
            m.outcome().map(|o| o.code()).unwrap_or("")
        );
    }
    if let Some(footer) = footer {
        println!();
        println!("{footer}");
    }
    Ok(())
}

// ─── Standings ──────────────────────────────────────────────────────

fn run_standings(
    ds: &Dataset,
    config: &DashboardConfig,
    args: &FilterArgs,
    published: bool,
    json: bool,
) -> Result<()> {
    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;
    let view = dash.build(&DashboardRequest {
        filter,
        ..DashboardRequest::default()
    });

    if published {
        if json {
            return print_json(&view.published);
        }
        let Some(tables) = ready_or_report(&view.published) else {
            return Ok(());
        };
        for t in tables {
            println!("{} {}", t.season_label, t.competition_name);
            println!(
                "{:>3} {:<25} {:>4} {:>4} {:>4} {:>4} {:>9} {:>5}",
                "#", "Team", "GP", "W", "D", "L", "GF-GA", "Pts"
            );
            println!("{}", "-".repeat(64));
            let cell = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
            for r in &t.rows {
                let goals = match (r.goals_for, r.goals_against) {
                    (Some(f), Some(a)) => format!("{f}-{a}"),
                    _ => "-".to_string(),
                };
                println!(
                    "{:>3} {:<25} {:>4} {:>4} {:>4} {:>4} {:>9} {:>5}",
                    r.rank,
                    truncate(&r.team_name, 25),
                    cell(r.games),
                    cell(r.wins),
                    cell(r.draws),
                    cell(r.losses),
                    goals,
                    cell(r.points)
                );
            }
            println!();
        }
        return Ok(());
    }

    if json {
        return print_json(&view.standings);
    }
    let Some(tables) = ready_or_report(&view.standings) else {
        return Ok(());
    };
    for t in tables {
        match &t.stage {
            Some(stage) => println!("{} {} ({stage})", t.season_label, t.competition_name),
            None => println!("{} {}", t.season_label, t.competition_name),
        }
        println!(
            "{:>3} {:<25} {:>4} {:>4} {:>4} {:>4} {:>9} {:>5} {:>5}",
            "#", "Team", "GP", "W", "D", "L", "GF-GA", "GD", "Pts"
        );
        println!("{}", "-".repeat(70));
        for r in &t.rows {
            let marker = if view.team.as_ref() == Some(&r.team) { "*" } else { " " };
            println!(
                "{:>3}{marker}{:<25} {:>4} {:>4} {:>4} {:>4} {:>9} {:>+5} {:>5}",
                r.rank,
                truncate(&r.team_name, 25),
                r.played,
                r.won,
                r.drawn,
                r.lost,
                format!("{}-{}", r.goals_for, r.goals_against),
                r.goal_diff(),
                r.points
            );
        }
        println!();
    }
    Ok(())
}

// ─── Players ────────────────────────────────────────────────────────

fn run_players(
    ds: &Dataset,
    config: &DashboardConfig,
    args: &FilterArgs,
    stat: StatKind,
    search: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(limit) = limit {
        config.display.leaderboard_size = limit;
    }
    let dash = Dashboard::new(ds, &config);
    let filter = filter_for(&dash, args)?;
    let view = dash.build(&DashboardRequest {
        filter,
        stat,
        search,
        ..DashboardRequest::default()
    });
    if json {
        return print_json(&view.leaderboard);
    }

    heading(&view);
    let Some(entries) = ready_or_report(&view.leaderboard) else {
        return Ok(());
    };
    println!("Sorted by {}", stat.label());
    println!(
        "{:>4} {:<25} {:>4} {:>5} {:>5} {:>5} {:>5} {:>5} {:>8}",
        "#", "Player", "Szn", "GP", "G", "A", "Pts", "PIM", "Pts/szn"
    );
    println!("{}", "-".repeat(74));
    for e in entries {
        println!(
            "{:>4} {:<25} {:>4} {:>5} {:>5} {:>5} {:>5} {:>5} {:>8.2}",
            e.rank,
            truncate(&e.name, 25),
            e.seasons,
            e.totals.games,
            e.totals.goals,
            e.totals.assists,
            e.totals.points,
            e.totals.penalty_minutes,
            e.points_per_season
        );
    }
    Ok(())
}

fn run_player(ds: &Dataset, config: &DashboardConfig, args: &FilterArgs, name: &str, json: bool) -> Result<()> {
    let hits = ds.players.search(name);
    let player = match hits.as_slice() {
        [one] => (*one).clone(),
        [] => bail!("no player matches '{name}'"),
        many => {
            let names: Vec<String> = many.iter().map(|id| ds.players.display_name(id)).collect();
            bail!("'{name}' matches {} players: {}", many.len(), names.join(", "));
        }
    };

    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;
    let admitted = dash.filtered_matches(&filter);
    let rows = select_stat_rows(&ds.player_stats, &filter, &admitted);
    let lines = player_breakdown(ds, &rows, &player);
    if json {
        return print_json(&lines);
    }

    println!("{}", ds.players.display_name(&player));
    println!();
    if lines.is_empty() {
        println!("({})", rinkstats_stats::NO_DATA);
        return Ok(());
    }
    println!(
        "{:<10} {:<22} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "Season", "Team", "GP", "G", "A", "Pts", "PIM"
    );
    println!("{}", "-".repeat(66));
    for l in &lines {
        println!(
            "{:<10} {:<22} {:>5} {:>5} {:>5} {:>5} {:>5}",
            l.season_label,
            truncate(&l.team_name, 22),
            l.totals.games,
            l.totals.goals,
            l.totals.assists,
            l.totals.points,
            l.totals.penalty_minutes
        );
    }
    Ok(())
}

// ─── Rosters ────────────────────────────────────────────────────────

fn run_rosters(ds: &Dataset, config: &DashboardConfig, args: &FilterArgs, list: bool, json: bool) -> Result<()> {
    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;
    let view = dash.build(&DashboardRequest {
        filter,
        ..DashboardRequest::default()
    });

    if list {
        if json {
            return print_json(&view.roster_lines);
        }
        heading(&view);
        let Some(lines) = ready_or_report(&view.roster_lines) else {
            return Ok(());
        };
        println!("{:<10} {:>4} {:<25} {:<12} {:<20}", "Season", "#", "Player", "Category", "Role");
        println!("{}", "-".repeat(75));
        for l in lines {
            println!(
                "{:<10} {:>4} {:<25} {:<12} {:<20}",
                ds.season_label(&l.season),
                l.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
                truncate(&l.name, 25),
                l.category.label(),
                truncate(&l.role, 20)
            );
        }
        return Ok(());
    }

    if json {
        return print_json(&view.rosters);
    }
    heading(&view);
    let Some(r) = ready_or_report(&view.rosters) else {
        return Ok(());
    };
    println!("Unique players:  {}", r.unique_players);
    println!(
        "Goalkeepers: {}  Skaters: {}  Staff: {}",
        r.goalkeepers, r.skaters, r.staff
    );
    println!("Average squad:   {:.1} (largest {})", r.average_squad, r.largest_squad);
    println!();
    println!("{:<12} {:>8} {:>6}", "Season", "Players", "Staff");
    println!("{}", "-".repeat(28));
    for s in &r.squads {
        println!("{:<12} {:>8} {:>6}", s.season_label, s.players, s.staff);
    }
    if !r.most_seasons.is_empty() {
        println!();
        println!("{:<25} {:>8}", "Most seasons", "Seasons");
        println!("{}", "-".repeat(34));
        for v in &r.most_seasons {
            println!("{:<25} {:>8}", truncate(&v.name, 25), v.seasons);
        }
    }
    Ok(())
}

// ─── Trend ──────────────────────────────────────────────────────────

fn run_trend(
    ds: &Dataset,
    config: &DashboardConfig,
    args: &FilterArgs,
    metric: TrendMetric,
    json: bool,
) -> Result<()> {
    let dash = Dashboard::new(ds, config);
    let filter = filter_for(&dash, args)?;
    let view = dash.build(&DashboardRequest {
        filter,
        trend_metric: metric,
        ..DashboardRequest::default()
    });
    if json {
        return print_json(&view.trend);
    }

    heading(&view);
    let Some(points) = ready_or_report(&view.trend) else {
        return Ok(());
    };
    println!("{:>4} {:<10} {:<10} {:>6} {:>10}", "#", "Date", "Match", "Value", "Cumulative");
    println!("{}", "-".repeat(44));
    for p in points {
        println!(
            "{:>4} {:<10} {:<10} {:>6} {:>10}",
            p.index,
            p.date.to_string(),
            p.match_id.to_string(),
            p.value,
            p.cumulative
        );
    }
    println!();
    println!("{}: {}", metric.label(), points.last().map_or(0, |p| p.cumulative));
    Ok(())
}

// ─── Export ─────────────────────────────────────────────────────────

fn run_export(
    ds: &Dataset,
    mut config: DashboardConfig,
    args: &FilterArgs,
    kind: ExportKind,
    output: &Path,
    format: ExportFormat,
    delimiter: Option<char>,
) -> Result<()> {
    if let Some(d) = delimiter {
        config.display.csv_delimiter = d;
        config.validate()?;
    }
    if kind == ExportKind::Dashboard && format == ExportFormat::Csv {
        bail!("the dashboard export is JSON only; pass --format json");
    }
    // Exports are never cut to the on-screen leaderboard size.
    config.display.leaderboard_size = 0;

    let dash = Dashboard::new(ds, &config);
    let filter = filter_for(&dash, args)?;
    let delim = config.display.delimiter_byte();

    let text = match (kind, format) {
        (ExportKind::Matches, ExportFormat::Csv) => matches_csv(&dash.match_list(&filter), delim)?,
        (ExportKind::Matches, ExportFormat::Json) => export_json(&dash.match_list(&filter).rows)?,
        (kind, format) => {
            let view = dash.build(&DashboardRequest {
                filter,
                ..DashboardRequest::default()
            });
            match (kind, format) {
                (ExportKind::Standings, ExportFormat::Csv) => {
                    standings_csv(view.standings.ready().map_or(&[][..], |v| v.as_slice()), delim)?
                }
                (ExportKind::Standings, ExportFormat::Json) => export_json(&view.standings)?,
                (ExportKind::Players, ExportFormat::Csv) => {
                    leaderboard_csv(view.leaderboard.ready().map_or(&[][..], |v| v.as_slice()), delim)?
                }
                (ExportKind::Players, ExportFormat::Json) => export_json(&view.leaderboard)?,
                _ => export_json(&view)?,
            }
        }
    };

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export dir: {}", dir.display()))?;
    }
    std::fs::write(output, &text).with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = text.len(), "export written");
    println!("Wrote {}", output.display());
    Ok(())
}
