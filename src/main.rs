//! # Tunnelscope
//!
//! Tunnelscope is a Terminal User Interface (TUI) that walks through setting up
//! a VPN tunnel and visualizes a simulated connection: a network map, live
//! telemetry, a copyable config snippet, and diagnostic reports. Nothing here
//! touches a real network.
//!
//! ## Modules
//! - [`app`]: Core application state and key handling.
//! - [`catalog`]: Static protocols, regions, deployment targets, and glossary.
//! - [`presets`]: AWS resource presets and default resolution.
//! - [`session`]: The selection, simulated connection, and its lifecycle.
//! - [`telemetry`]: Metric baselines, noise, and the sampling schedule.
//! - [`diagnostics`]: Connect and troubleshoot reports.
//! - [`snippet`]: Config snippet generation.
//! - [`settings`]: The persisted settings slot.
//! - [`ui`]: TUI rendering and widget definitions.
//!
//! Logs go to a file (default `/tmp/tunnelscope.log`) so they never corrupt the UI.

mod app;
mod catalog;
mod cli;
mod clipboard;
mod constants;
mod diagnostics;
mod event;
mod presets;
mod session;
mod settings;
mod snippet;
mod telemetry;
mod theme;
mod ui;
mod utils;

use app::App;
use clap::Parser;
use cli::args::Args;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use event::{Event, EventHandler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use settings::SettingsStore;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments
    let args = Args::parse();
    let _guard = setup_tracing(&args);

    let store = match &args.settings {
        Some(path) => SettingsStore::new(utils::expand_tilde(path)),
        None => SettingsStore::default_location()
            .wrap_err("could not locate the settings directory")?,
    };

    // Handle CLI commands (snippet, import, reset)
    if let Some(command) = &args.command {
        if cli::commands::handle_command(command, &store)? {
            return Ok(());
        }
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Run the TUI application
    let terminal = ratatui::init();
    let result = run_tui(terminal, App::new(store, rng));
    ratatui::restore();

    result
}

/// Sets up file-based tracing. Logging to stdout/stderr would corrupt the TUI.
/// The returned guard must live until exit so buffered lines are flushed.
fn setup_tracing(args: &Args) -> WorkerGuard {
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tunnelscope={log_level}")));

    let log_dir = args
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = args
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("tunnelscope.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Runs the main TUI event loop.
fn run_tui(mut terminal: ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let events = EventHandler::new(constants::DEFAULT_TICK_RATE);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match events.next()? {
            Event::Key(key_event) => app.handle_key(key_event),
            Event::Tick => app.on_tick(),
            Event::Resize(width, height) => app.on_resize(width, height),
        }
    }

    tracing::info!("{} exiting", constants::APP_NAME);
    Ok(())
}
