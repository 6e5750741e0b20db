//! rinkstats-tui binary: terminal setup, logging, the event loop.
//!
//! Usage: `rinkstats-tui [CONFIG]`. Without an argument `./rinkstats.toml`
//! is used when present, otherwise the built-in defaults.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rinkstats_stats::config::CONFIG_FILE;
use rinkstats_stats::DashboardConfig;
use rinkstats_tui::app::AppState;
use rinkstats_tui::{input, persistence, ui};

fn main() -> Result<()> {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rinkstats");
    let state_path = config_dir.join("state.json");
    setup_logging(&config_dir);

    let config = load_config()?;
    info!(workbook = %config.workbook.path.display(), "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(config, PathBuf::from("exports"));
    persistence::apply(&mut app, persistence::load(&state_path));
    app.reload();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    if let Err(e) = persistence::save(&state_path, &persistence::extract(&app)) {
        warn!(error = %e, path = %state_path.display(), "failed to save state");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

fn load_config() -> Result<DashboardConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None if Path::new(CONFIG_FILE).is_file() => DashboardConfig::from_file(Path::new(CONFIG_FILE))
            .with_context(|| format!("failed to load {CONFIG_FILE}")),
        None => Ok(DashboardConfig::default()),
    }
}

/// Logs go to `rinkstats-tui.log` in the config dir; the terminal belongs
/// to the UI. If the file cannot be opened, logging stays off.
fn setup_logging(config_dir: &Path) {
    if std::fs::create_dir_all(config_dir).is_err() {
        return;
    }
    let Ok(file) = File::create(config_dir.join("rinkstats-tui.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    tracing_subscriber::registry().with(filter).with(layer).init();
}
