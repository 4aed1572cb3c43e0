// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # TrustList CLI
//!
//! The `trustlist` binary manages a wallet address book: contacts with trust
//! levels and tags, plus the tag catalog itself.
//!
//! ## Modes
//!
//! - **One-shot**: each command loads configuration and seed data, runs, and exits
//! - **Shell**: `trustlist shell` keeps the directory in memory and tracks a
//!   connected wallet; mutations require a connection
//!
//! ## Commands
//!
//! - `trustlist contact list|show|add|edit|remove|apply-suggestion|bulk-trust|bulk-delete|tags`
//! - `trustlist tag list|show|create|edit|remove` - Tag catalog
//! - `trustlist config show|validate|generate` - Configuration management
//! - `trustlist shell` - Interactive session

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use trustlist_cli::commands::{self, ConfigCommand, ContactCommand, TagCommand};
use trustlist_cli::embedded::Directory;

/// TrustList - wallet address book with trust levels
#[derive(Parser)]
#[command(name = "trustlist")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "TRUSTLIST_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TRUSTLIST_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Contact operations
    #[command(name = "contact")]
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },

    /// Tag catalog operations
    #[command(name = "tag")]
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Interactive session with a connected wallet
    #[command(name = "shell")]
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Contact { command }) => {
            let directory = Directory::bootstrap(cli.config)?;
            commands::contact::handle_command(command, &directory).await
        }
        Some(Commands::Tag { command }) => {
            let directory = Directory::bootstrap(cli.config)?;
            commands::tag::handle_command(command, &directory).await
        }
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        Some(Commands::Shell) => {
            let directory = Directory::bootstrap(cli.config)?;
            debug!(config = %directory.config.metadata.name, "Starting shell");
            commands::shell::run(&directory).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
