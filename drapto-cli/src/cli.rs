// ============================================================================
// drapto-cli/src/cli.rs
// ============================================================================
//
// COMMAND-LINE INTERFACE: Argument Definitions
//
// Defines the command-line interface using clap: the top-level `Cli`
// structure, its `Commands` enum, and the `EncodeArgs` for the `encode`
// subcommand, covering the external CLI surface the pipeline exposes
// (worker count, raw-file archival, skip/manual-mode overrides, audio/
// iphone presets, ntfy notifications, log level).
//
// USAGE EXAMPLES:
// - Basic: drapto encode -i input_dir -o output_dir
// - Advanced: drapto encode -i input_dir -o output_dir --processes 4 --manual-mode --ntfy https://ntfy.sh/topic
//
// AI-ASSISTANT-INFO: CLI argument definitions using clap

// ---- External crate imports ----
use clap::{Parser, Subcommand};

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// CLI ARGUMENT DEFINITIONS
// ============================================================================

/// Main CLI structure that defines the application's command-line interface.
///
/// # Example
/// ```
/// drapto --interactive encode -i input_dir -o output_dir
/// ```
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Drapto: batch media re-encoding pipeline",
    long_about = "Probes, plans, and re-encodes a directory of media files via drapto-core."
)]
pub struct Cli {
    /// The subcommand to execute (e.g., encode)
    #[command(subcommand)]
    pub command: Commands,

    /// Run in interactive mode (foreground) instead of daemonizing.
    #[arg(long, global = true, default_value_t = false)]
    pub interactive: bool,

    /// Enable debug-level logging (equivalent to RUST_LOG=drapto=debug).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored terminal output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,
}

/// Enum of available subcommands for the Drapto CLI application.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the probe/pre-encode/encode pipeline over an input directory.
    Encode(EncodeArgs),
}

/// Arguments for the `encode` command.
///
/// # Examples
///
/// Basic usage:
/// ```
/// drapto encode -i /path/to/videos -o /path/to/output
/// ```
///
/// Advanced usage:
/// ```
/// drapto encode -i /videos -o /out --processes 4 --move-raw-file --manual-mode
/// ```
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    // ---- Required Arguments ----

    /// Input directory containing media files to process.
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_path: PathBuf,

    /// Directory where encoded files, logs, and quarantined inputs will be written.
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs).
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Optional alias for `--output`, naming the run's target directory.
    #[arg(long = "target-dir", value_name = "TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    // ---- Worker Pool ----

    /// Number of files to process in parallel.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub processes: usize,

    /// Shuffle discovered files before dispatch.
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,

    // ---- Archival / Naming ----

    /// Move each original input into a `_raw` archive tree on success.
    #[arg(long, default_value_t = false)]
    pub move_raw_file: bool,

    /// Skip the filename-normalization step normally applied to outputs.
    #[arg(long, default_value_t = false)]
    pub not_rename: bool,

    // ---- Pipeline Behavior ----

    /// Bypass the oversize-marker skip rule and allow manual CRF fallback
    /// when every candidate encoder fails CRF search.
    #[arg(long, default_value_t = false)]
    pub manual_mode: bool,

    /// Permit files with no surviving audio stream to proceed rather than
    /// failing with `NoSuitableAudio`.
    #[arg(long, default_value_t = false)]
    pub allow_no_audio: bool,

    /// Plan and encode only the audio track, dropping video streams.
    #[arg(long, default_value_t = false)]
    pub audio_only: bool,

    /// Apply the iPhone-oriented encode preset.
    #[arg(long, default_value_t = false)]
    pub iphone_specific_task: bool,

    // ---- Logging ----

    /// Minimum log level written to the log file (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    // ---- Notification Options ----

    /// Optional: ntfy.sh topic URL for run-progress notifications.
    /// Can also be set via the DRAPTO_NTFY_TOPIC environment variable.
    #[arg(long, value_name = "TOPIC_URL", env = "DRAPTO_NTFY_TOPIC")]
    pub ntfy: Option<String>,
}
