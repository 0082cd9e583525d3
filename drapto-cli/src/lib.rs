// ============================================================================
// drapto-cli/src/lib.rs
// ============================================================================
//
// LIBRARY COMPONENT: Drapto CLI Application
//
// This file defines the library portion of the Drapto CLI application, which
// contains the core functionality, argument definitions, and command logic.
// The binary crate (main.rs) depends on this library crate for its implementation.
//
// KEY COMPONENTS:
// - Command-line argument structures (cli module)
// - Command implementations (commands module)
// - Logging utilities (logging module)
// - Terminal output and the CliProgressReporter (terminal module)
//
// ARCHITECTURE:
// - cli.rs: Defines the command-line interface using clap
// - commands/: Contains the `encode` subcommand implementation
// - logging.rs: Provides logging utilities (env_logger / fern setup)
// - terminal.rs: Terminal styling and the ProgressReporter implementation
//
// AI-ASSISTANT-INFO: Library component for CLI application, contains core functionality

// ---- Module declarations ----
/// Command-line interface definitions using clap
pub mod cli;

/// Command implementations for each subcommand
pub mod commands;

/// Logging utilities and helper functions
pub mod logging;

/// Terminal UI components, styling, and the ProgressReporter implementation
pub mod terminal;

// ---- Public re-exports ----
// These items are re-exported to make them directly accessible to the binary crate
// and integration tests without requiring explicit imports from submodules

/// Command-line interface types
pub use cli::{Cli, Commands, EncodeArgs};

/// Command implementation functions
pub use commands::encode::run_encode;
