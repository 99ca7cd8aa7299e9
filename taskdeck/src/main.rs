//! `TaskDeck` — terminal task tracker.
//!
//! Launches the TUI against a task API server. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! cargo run --bin taskdeck -- --api-url http://127.0.0.1:8080
//!
//! # Or via environment variables
//! TASKDECK_API_URL=http://127.0.0.1:8080 cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::{App, StoreCommand};
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::gateway::http::HttpGateway;
use taskdeck::modal::ModalError;
use taskdeck::store::TaskStore;
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api_url = %config.api_url, "taskdeck starting");

    let gateway = match HttpGateway::new(&config.api_url, config.request_timeout) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {e}");
            return Ok(());
        }
    };
    let store = TaskStore::new(gateway);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, store, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut store: TaskStore<HttpGateway>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(config.page_size);

    // Initial load; a failure leaves an empty table with an error in the
    // status bar, and `r` retries.
    match store.load().await {
        Ok(()) => app.sync_tasks(store.tasks()),
        Err(e) => app.set_status(format!("Load failed: {e}")),
    }

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for terminal input events. Store commands are dispatched
        // inline, one at a time — a confirm suspends the loop until the
        // server answers.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = app.handle_key_event(key) {
                dispatch(&mut app, &mut store, command).await;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Dispatch a store command and fold the outcome back into the app.
async fn dispatch(app: &mut App, store: &mut TaskStore<HttpGateway>, command: StoreCommand) {
    let result = match command {
        StoreCommand::Load => store.load().await.map_err(ModalError::from),
        StoreCommand::ConfirmAdd => app.add_modal.confirm(store).await,
        StoreCommand::CommitStatus(status) => app.edit_modal.commit_status(store, status).await,
        StoreCommand::SubmitDescription => app.edit_modal.submit_description(store).await,
        StoreCommand::ConfirmRemove => app.remove_modal.confirm(store).await,
    };

    match result {
        Ok(()) => app.set_status(""),
        Err(e) => {
            tracing::warn!(error = %e, "store command failed");
            app.set_status(e.to_string());
        }
    }
    app.sync_tasks(store.tasks());
}
