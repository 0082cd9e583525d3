// ============================================================================
// drapto-cli/src/main.rs
// ============================================================================
//
// MAIN ENTRY POINT: Drapto CLI Application
//
// This file contains the main entry point for the Drapto CLI application,
// a batch media re-encoding tool built on drapto-core. It handles
// command-line argument parsing, logging setup, daemonization, and
// dispatching to the `encode` command handler.
//
// KEY COMPONENTS:
// - Command-line argument parsing (via clap)
// - Logging configuration (env_logger for interactive runs, fern for
//   daemonized / file-backed runs)
// - Daemonization support (via daemonize)
//
// ARCHITECTURE:
// 1. Main parses arguments and sets up the environment
// 2. The `encode` command handler implements the pipeline run
// 3. Core logic is delegated to the drapto-core library
//
// AI-ASSISTANT-INFO: Entry point for CLI application, handles arg parsing and command dispatch

// ---- Internal crate imports ----
use drapto_cli::commands::encode::{parse_log_level, run_encode};
use drapto_cli::logging::{get_timestamp, setup_file_logging};
use drapto_cli::terminal;
use drapto_cli::{Cli, Commands};

// ---- External crate imports ----
use anyhow::{Context, Result};
use clap::Parser;
use daemonize::Daemonize;

// ---- Standard library imports ----
use std::io::{self, Write};

// ---- Logging imports ----
use env_logger::Env;
use log::Level;

/// Main entry point for the Drapto CLI application.
///
/// 1. Parses command-line arguments
/// 2. Configures color and logging
/// 3. Daemonizes unless `--interactive` was passed
/// 4. Dispatches to `run_encode`
fn main() -> Result<()> {
    let cli_args = Cli::parse();
    let interactive_mode = cli_args.interactive;

    if cli_args.verbose && std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "drapto=debug");
        }
    }

    terminal::set_color(!cli_args.no_color);
    terminal::register_cli_reporter();

    match cli_args.command {
        Commands::Encode(args) => {
            let output_dir = args.target_dir.clone().unwrap_or_else(|| args.output_dir.clone());
            let log_dir = args.log_dir.clone().unwrap_or_else(|| output_dir.join("logs"));

            let main_log_filename = format!("drapto_encode_run_{}.log", get_timestamp());
            let main_log_path = log_dir.join(&main_log_filename);

            let level = parse_log_level(&args.log_level);

            if interactive_mode {
                env_logger::Builder::from_env(Env::default().default_filter_or("drapto=info"))
                    .format(|buf, record| {
                        if record.level() != Level::Info {
                            writeln!(buf, "[{}] {}", record.level(), record.args())
                        } else {
                            writeln!(buf, "{}", record.args())
                        }
                    })
                    .init();
            } else {
                setup_file_logging(&main_log_path, level)
                    .with_context(|| format!("Failed to set up file logging to: {}", main_log_path.display()))?;
            }

            if log::log_enabled!(log::Level::Trace) {
                log::info!("Trace level logging enabled.");
            } else if log::log_enabled!(log::Level::Debug) {
                log::info!("Debug level logging enabled.");
            }

            if !interactive_mode {
                terminal::print_daemon_log_info(&main_log_path);
                terminal::print_daemon_starting();

                if let Err(e) = io::stderr().flush() {
                    eprintln!("Warning: Failed to flush stderr before daemonizing: {}", e);
                }

                std::fs::create_dir_all(&log_dir)
                    .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

                let daemonize = Daemonize::new().working_directory(".");

                daemonize.start().with_context(|| "Failed to start daemon process")?;
            }

            run_encode(args, interactive_mode)
        }
    }
    .map_err(|e| anyhow::anyhow!("{e}"))
}
