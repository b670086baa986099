//! `TaskPilot` — terminal client for scoring and prioritising tasks.
//!
//! Launches the TUI and sends task lists to a scoring backend on demand.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskpilot/config.toml`).
//!
//! ```bash
//! # Backend on the default address (http://127.0.0.1:8000)
//! cargo run --bin taskpilot
//!
//! # Custom backend and initial ordering
//! cargo run --bin taskpilot -- --server-url http://planner.local:8000 \
//!     --strategy deadline
//!
//! # Or via environment variables
//! TASKPILOT_SERVER_URL=http://planner.local:8000 cargo run
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
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskpilot::app::{App, Effect};
use taskpilot::config::{CliArgs, ClientConfig};
use taskpilot::net::{self, NetCommand, NetEvent};
use taskpilot::scoring::ScoringError;
use taskpilot::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(server = %config.server_url, "taskpilot starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskpilot exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskpilot.log");
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
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client_config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new()
        .with_strategy(client_config.default_strategy)
        .with_max_title_len(client_config.max_title_len);

    // Without a usable backend the app still works for local task entry.
    let (cmd_tx, mut evt_rx) = match client_config
        .to_net_config()
        .map_err(|e| e.to_string())
        .and_then(|c| net::spawn_net(c).map_err(|e| e.to_string()))
    {
        Ok((tx, rx)) => (Some(tx), Some(rx)),
        Err(e) => {
            app.raise_alert(format!("Scoring unavailable: {e}"));
            (None, None)
        }
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending NetEvents (non-blocking).
        if let Some(ref mut rx) = evt_rx {
            drain_net_events(&mut app, rx);
        }

        // Step 3: Poll for terminal input events.
        if event::poll(client_config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let effects = app.handle_key_event(key);
            run_effects(&mut app, effects, cmd_tx.as_ref());
        }

        if app.should_quit {
            if let Some(ref tx) = cmd_tx {
                let _ = tx.try_send(NetCommand::Shutdown);
            }
            return Ok(());
        }
    }
}

/// Carry out effects that need the outside world.
///
/// Rendering happens on every loop iteration and alerts are already stored
/// on the app, so only submissions need work here. A submission that cannot
/// be queued is reported back as a transport failure.
fn run_effects(app: &mut App, effects: Vec<Effect>, cmd_tx: Option<&mpsc::Sender<NetCommand>>) {
    for effect in effects {
        let Effect::Submit {
            request_id,
            endpoint,
            tasks,
        } = effect
        else {
            continue;
        };

        let failure = match cmd_tx {
            None => Some("scoring backend not configured"),
            Some(tx) => match tx.try_send(NetCommand::Submit {
                request_id,
                endpoint,
                tasks,
            }) {
                Ok(()) => None,
                Err(mpsc::error::TrySendError::Full(_)) => Some("too many requests in flight"),
                Err(mpsc::error::TrySendError::Closed(_)) => Some("network task stopped"),
            },
        };

        if let Some(reason) = failure {
            app.apply_response(
                request_id,
                endpoint,
                Err(ScoringError::Transport(reason.to_string())),
            );
        }
    }
}

/// Drain all pending `NetEvent`s from the receiver and apply them to the app.
fn drain_net_events(app: &mut App, rx: &mut mpsc::Receiver<NetEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            NetEvent::Completed {
                request_id,
                endpoint,
                result,
            } => {
                app.apply_response(request_id, endpoint, result);
            }
        }
    }
}
