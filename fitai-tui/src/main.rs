// fitai-tui/src/main.rs
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fitai_lib::CoachService;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{error, info};

mod app; // Application state
mod ui; // UI rendering logic

use crate::app::App;

const TICK_RATE: Duration = Duration::from_millis(100);
const LOG_FILE: &str = "fitai-tui.log";

fn main() -> Result<()> {
    // Initialize the library service
    let service = CoachService::initialize().context("Failed to initialize CoachService")?;
    init_logging(service.get_config_path())?;
    let mut app = App::new(service)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("tui exited with error: {err:?}");
        eprintln!("Error: {:?}", err); // Print errors to stderr
    }

    Ok(())
}

/// Logs go to a file beside the config file.
fn init_logging(config_path: &Path) -> Result<()> {
    let log_path = config_path
        .parent()
        .map_or_else(|| Path::new(LOG_FILE).to_path_buf(), |dir| dir.join(LOG_FILE));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {log_path:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Timers and pending coach replies move even without input
        app.on_tick(Instant::now());

        terminal.draw(|f| ui::render_ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events
                if key.kind == KeyEventKind::Press {
                    // Pass key event to the app's input handler
                    app.handle_key_event(key)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
