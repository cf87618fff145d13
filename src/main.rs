// ABOUTME: Main entry point for Luyona with TUI and CLI support
//
// Binary: luyona
// Usage: luyona [COMMAND]
// - No command: launches the onboarding TUI
// - profile: print the stored profile
// - status: show the local session
// - sign-out: end the local session
// - reset: delete local data
// - config: print the effective configuration

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::Duration,
};
use tokio::sync::mpsc::UnboundedReceiver;

mod app;
mod cli;
mod components;
mod config;
mod flows;
mod scheduler;
mod screens;
mod services;
mod wizard;

use app::{App, AppState, EventHandler};
use components::LayoutComponent;
use config::AppConfig;
use scheduler::{Scheduler, TimerFired};
use services::Services;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // `config --validate` reports problems itself; everything else runs on defaults
    let cli::config::EffectiveConfig { config, fallback } = cli::config::effective_config(false)?;
    if let Err(e) = setup_logging(&config) {
        eprintln!("Logging disabled: {:#}", e);
    }
    setup_panic_handler();
    if let Some(reason) = fallback {
        tracing::warn!("{}", reason);
        eprintln!("Warning: {}", reason);
    }

    let data_dir = config.data_dir()?;
    let services = Services::local(&data_dir);

    let result = match args.command {
        Some(cli::Commands::Profile) => cli::status::profile(&services, args.format).await,
        Some(cli::Commands::Status) => cli::status::execute(&services, args.format).await,
        Some(cli::Commands::SignOut) => cli::account::sign_out(&services).await,
        Some(cli::Commands::Reset(reset_args)) => cli::account::reset(reset_args, &data_dir).await,
        Some(cli::Commands::Config(config_args)) => cli::config::execute(&config_args, args.format),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => run_tui(config, services).await,
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(config: AppConfig, services: Services) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    let tick_rate = config.timing.tick_rate();
    let (scheduler, mut timers) = Scheduler::new();
    let mut app = App::new(AppState::new(config, scheduler), services);
    let mut layout = LayoutComponent::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Flush any pending terminal events so stray keypresses don't reach the splash
    while event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = event::read();
    }

    let result = run_tui_loop(&mut app, &mut layout, &mut terminal, &mut timers, tick_rate).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    if let Some(message) = &app.state.error_message {
        eprintln!("{message}");
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    timers: &mut UnboundedReceiver<TimerFired>,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) =
                        EventHandler::handle_key_event(key_event, &mut app.state)
                    {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        // Timers only post messages; state changes happen here, one at a time
        while let Ok(fired) = timers.try_recv() {
            app.state.on_timer(fired);
        }

        app.tick().await?;

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging(config: &AppConfig) -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = config.log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    // JSONL log file with timestamp; the TUI owns stdout
    let log_file = log_dir.join(format!(
        "luyona-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luyona=info".into()),
        )
        .init();
    Ok(())
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
