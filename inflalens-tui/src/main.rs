//! InflaLens TUI — five-panel terminal dashboard with vim-style navigation.
//!
//! Panels:
//! 1. Symbols — multi-select list of price-index symbols
//! 2. Risk — risk distribution pie per correlation category
//! 3. Trends — dated parameter values for a selected symbol
//! 4. Summary — classified correlations per selected symbol
//! 5. Help — keyboard shortcuts and risk buckets
//!
//! Usage: `inflalens-tui [CONFIG]`. Without an argument `./inflalens.toml`
//! is used when present, defaults otherwise.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::error;
use tracing_subscriber::EnvFilter;

use inflalens_core::{AppConfig, Dataset};

use crate::app::AppState;

fn main() -> Result<()> {
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inflalens");
    init_logging(&state_dir);

    // Everything fatal happens before the terminal is taken over.
    let config_arg = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::discover(config_arg.as_deref()).context("failed to load configuration")?;
    let thresholds = config.thresholds().context("invalid risk thresholds")?;
    let dataset = Dataset::load(&config.data).context("failed to load data")?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = state_dir.join("state.json");
    let persisted = persistence::load(&state_path);

    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut app = AppState::new(Arc::new(dataset), thresholds, export_dir);
    persistence::apply(&mut app, persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        error!(error = %e, path = %state_path.display(), "failed to save state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `inflalens.log` in the state directory; the terminal belongs to
/// the UI. Logging is skipped if the file cannot be created.
fn init_logging(dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("inflalens.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
