// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! # lensesctl
//!
//! Command-line client for Lenses. Connection settings are kept as named
//! contexts in `lensesctl.yml`, with passwords encrypted at rest, and can be
//! overridden per invocation with flags.

#![deny(
    nonstandard_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

mod client;
mod commands;
mod error;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use lenses::auth::Authentication;
use lenses::config::{ConnectionArgs, Manager};
use log::{debug, error};
use serde_json::Value;
use std::process;

use crate::error::LensesctlError;
use crate::output::OutputHandler;

/// Command-line client for Lenses
#[derive(Parser)]
#[command(
    name = "lensesctl",
    version,
    about = "Command-line client for Lenses",
    long_about = "lensesctl talks to a Lenses instance using named connection \
                  contexts stored in lensesctl.yml. Passwords are stored \
                  encrypted and every setting can be overridden with flags.",
    after_long_help = "CONFIGURATION SOURCES (highest to lowest priority):\n  \
        1. Command-line flags (--host, --user, --pass, --kerberos-*, etc.)\n  \
        2. --config FILE, or the first of ./lensesctl.yml, \
        <executable dir>/lensesctl.yml, ~/.lenses/lensesctl.yml\n  \
        3. LENSESCTL_CONTEXT (environment or ./.env) selects the context \
        for one invocation\n\n\
        Run `lensesctl configure --host=URL --user=USER --pass=PASSWORD` \
        to create a configuration file."
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except results
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available output formats
#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output (default)
    Json,
    /// YAML output
    Yaml,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Manage connection contexts
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },
    /// Save the current context with the given flags applied
    Configure {
        /// Discard the stored settings of the current context first
        #[arg(long)]
        reset: bool,
    },
    /// Show the resolved configuration
    Info,
    /// Send an authenticated GET request to the Lenses API
    Api {
        /// Request path, e.g. /api/v1/environments
        #[arg(value_name = "PATH")]
        path: String,
    },
}

/// Context management actions
#[derive(Subcommand)]
enum ContextAction {
    /// List all contexts
    List,
    /// Show the current context
    Current,
    /// Make a context the current one
    Use {
        /// Context name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove a context
    #[command(visible_alias = "delete")]
    Remove {
        /// Context name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let output = OutputHandler::new(cli.format, cli.quiet);

    let mut manager = Manager::new(cli.connection);
    let valid = match manager.load() {
        Ok(valid) => valid,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            output.error(e.into());
            process::exit(1);
        }
    };
    debug!(
        "Resolved context {} (valid: {valid})",
        manager.current_context()
    );

    match cli.command {
        Some(ref command) => {
            let result =
                execute_command(command, &mut manager, valid, &output).await;

            match result {
                Ok(response) => {
                    output.success(response);
                }
                Err(e) => {
                    error!("Command failed: {e}");
                    output.error(e);
                    process::exit(1);
                }
            }
        }
        None => handle_no_command(&manager, valid),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    pretty_env_logger::formatted_builder()
        .filter_level(log_level)
        .target(pretty_env_logger::env_logger::Target::Stderr)
        .init();
}

fn handle_no_command(manager: &Manager, valid: bool) {
    use std::io::IsTerminal;

    print_config_summary(manager, valid);

    if manager.loaded_from().is_none() {
        eprintln!("No configuration file found.");
        if std::io::stdin().is_terminal() {
            eprintln!("  Tip: Run `lensesctl configure --host=URL --user=USER --pass=PASSWORD` to create one.");
        }
        eprintln!();
    }

    let mut cmd = Cli::command();
    let _ = cmd.print_help();
}

fn print_config_summary(manager: &Manager, valid: bool) {
    if let Some(path) = manager.loaded_from() {
        eprintln!("Configuration:  {}", path.display());
    } else {
        eprintln!("Configuration:  (flags only)");
    }
    eprintln!("Context:        {}", manager.current_context());

    let profile = manager.current_profile();
    let host = profile
        .map(|profile| profile.host.as_str())
        .filter(|host| !host.is_empty())
        .unwrap_or("(not set)");
    let authentication = profile
        .and_then(|profile| profile.authentication.as_ref())
        .map_or("(not set)", Authentication::kind);
    eprintln!("Host:           {host}");
    eprintln!("Authentication: {authentication}");
    eprintln!("Usable:         {}", if valid { "yes" } else { "no" });
    eprintln!();
}

async fn execute_command(
    command: &Commands,
    manager: &mut Manager,
    valid: bool,
    output: &OutputHandler,
) -> Result<Value, LensesctlError> {
    match command {
        Commands::Context { action } => {
            commands::context::execute(action, manager, output)
        }
        Commands::Configure { reset } => {
            commands::configure::execute(*reset, manager, output)
        }
        Commands::Info => commands::info::execute(manager, valid),
        Commands::Api { path } => {
            commands::api::execute(path, manager, valid).await
        }
    }
}
