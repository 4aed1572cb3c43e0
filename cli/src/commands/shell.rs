// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Interactive shell
//!
//! Keeps one directory and one wallet session alive across commands. Reads
//! are open to anyone; anything that changes contacts or tags needs a
//! connected wallet. Events raised by a command are echoed after it runs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{contact, tag, ContactCommand, TagCommand};
use crate::embedded::Directory;
use trustlist_core::domain::session::WalletSession;

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "trustlist>", disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Contact operations
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },

    /// Tag catalog operations
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },

    /// Connect a wallet (the demo wallet when no address is given)
    Connect {
        #[arg(value_name = "ADDRESS")]
        address: Option<String>,

        #[arg(long)]
        alias: Option<String>,
    },

    /// Disconnect the current wallet
    Disconnect,

    /// Show the connected wallet
    Whoami,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

impl ShellCommand {
    pub fn is_mutation(&self) -> bool {
        match self {
            ShellCommand::Contact { command } => command.is_mutation(),
            ShellCommand::Tag { command } => command.is_mutation(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub async fn run(directory: &Directory) -> Result<()> {
    let mut session = WalletSession::new();
    let mut events = directory.event_bus.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{}",
        "TrustList shell. Type 'help' for commands, 'connect' to use the demo wallet.".bold()
    );

    loop {
        prompt(&session)?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                render_parse_error(&e);
                continue;
            }
        };

        match execute(parsed.command, directory, &mut session).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
        }

        for event in events.drain() {
            println!("{}", format!("  • {}", event.summary()).dimmed());
        }
    }

    Ok(())
}

pub async fn execute(
    command: ShellCommand,
    directory: &Directory,
    session: &mut WalletSession,
) -> Result<Flow> {
    if command.is_mutation() {
        session.require_connected()?;
    }

    match command {
        ShellCommand::Contact { command } => contact::handle_command(command, directory).await?,
        ShellCommand::Tag { command } => tag::handle_command(command, directory).await?,
        ShellCommand::Connect { address, alias } => {
            match address {
                Some(address) => session.connect(&address, alias)?,
                None => session.connect_demo()?,
            }
            tracing::debug!(wallet = ?session.address(), "Wallet connected");
            println!(
                "{}",
                format!("✓ Connected as {}", session.label().unwrap_or_default()).green()
            );
        }
        ShellCommand::Disconnect => {
            if session.is_connected() {
                session.disconnect();
                println!("{}", "✓ Disconnected".green());
            } else {
                println!("{}", "No wallet connected.".yellow());
            }
        }
        ShellCommand::Whoami => match session.address() {
            Some(address) => {
                println!(
                    "[{}] {}",
                    session.initials().unwrap_or_default().bold(),
                    session.alias().unwrap_or("(no alias)")
                );
                println!("  {}", address);
            }
            None => println!("{}", "No wallet connected.".yellow()),
        },
        ShellCommand::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

/// Help and usage errors both render through clap. Falls back to plain
/// stderr when clap cannot write.
fn render_parse_error(e: &clap::Error) {
    if let Err(write_err) = e.print() {
        tracing::debug!(error = %write_err, "Failed to render clap output");
        eprintln!("{}", e);
    }
}

fn prompt(session: &WalletSession) -> Result<()> {
    let label = match session.label() {
        Some(label) => label.cyan(),
        None => "disconnected".dimmed(),
    };
    print!("trustlist [{}]> ", label);
    std::io::stdout().flush().context("Failed to flush prompt")
}

/// Split a line into words, honouring single quotes, double quotes and
/// backslash escapes.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                let escaped = chars.next().context("Trailing backslash")?;
                current.push(escaped);
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        anyhow::bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
