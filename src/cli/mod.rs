// ABOUTME: CLI argument parsing and command routing for luyona
//
// Provides command-line interface for:
// - Launching the onboarding TUI (tui, default)
// - Inspecting the local session and stored profile (status, profile)
// - Ending the session or wiping local data (sign-out, reset)
// - Printing or checking configuration (config)

pub mod account;
pub mod config;
pub mod status;

use clap::{Parser, Subcommand, ValueEnum};

/// Luyona onboarding in the terminal
#[derive(Parser)]
#[command(name = "luyona")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Print the stored profile of the signed-in user
    Profile,

    /// Show who is signed in and whether a profile exists
    Status,

    /// End the local session
    SignOut,

    /// Delete all local data (session, profiles, logs)
    Reset(ResetArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the reset command
#[derive(clap::Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Fail if the config file cannot be read or is invalid
    #[arg(long)]
    pub validate: bool,
}
