//! usertable - Terminal User Administration Table
//!
//! Browse and maintain a small set of user records: search by name or
//! email, sort by any column, page through results, select rows for bulk
//! deletion and create or edit users through a validated form.

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use usertable::application::{App, AppMode, TableController};
use usertable::infrastructure::Settings;
use usertable::presentation::{render_ui, InputHandler};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Entry point for the usertable terminal application.
///
/// Parses settings, loads the seed users, sets up the terminal and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the seed cannot be loaded, the log file cannot be
/// created, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::parse();
    init_logging(&settings)?;

    let rows = settings.load_rows()?;
    info!(count = rows.len(), page_size = settings.page_size.rows(), "starting usertable");
    let table = TableController::new(rows)?.with_page_size(settings.page_size);
    let mut app = App::new(table);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Installs a file-backed subscriber when `--log-file` is given. The
/// terminal belongs to the UI, so nothing is logged otherwise.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log_level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Polls for input with a short timeout so the search debounce and toast
/// timers fire even while no keys are pressed. Quits on 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick();
    }
}
