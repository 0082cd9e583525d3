// ============================================================================
// drapto-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types and Result Definitions
//
// This module defines the custom error handling infrastructure for the drapto-core
// library. It provides a comprehensive error type hierarchy that covers all possible
// error conditions that can occur during the probe / pre-encode / encode pipeline.
//
// KEY COMPONENTS:
// - CoreError: Enum of all possible errors with descriptive messages
// - CoreResult: Type alias for Result<T, CoreError> for consistent return types
// - SkipReason: a non-error outcome for files the pipeline deliberately skips
//
// ERROR CATEGORIES:
// - I/O and filesystem errors (Io, PathError)
// - External command errors (Command with CommandErrorKind)
// - Parsing errors (FfprobeParse, JsonParseError)
// - Probe errors (NoDuration, NoStreamsFound)
// - Pre-encode decision errors (CrfSearchExhausted, NoSuitableAudio, UnsupportedContainer)
// - Encode execution errors (TranscoderFailed, ContainerIncompatible, OversizeExhausted)
// - Orchestrator errors (ToolMissing, InvalidArguments, Interrupted)
// - Notification errors (NotificationError)
//
// USAGE:
// Functions in the library return CoreResult<T> to provide consistent error
// handling. Consumers can use the ? operator to propagate errors or match
// on specific error variants for custom handling. Per-file failures are
// caught at the worker boundary and handed to the ErrorRouter rather than
// aborting the run; see worker_pool.rs.
//
// AI-ASSISTANT-INFO: Error handling infrastructure for the drapto-core library

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Represents the kind of command error that occurred.
#[derive(Debug)]
pub enum CommandErrorKind {
    /// Error occurred when attempting to start a command
    Start(io::Error),

    /// Error occurred when waiting for a command to complete
    Wait(io::Error),

    /// Command completed but returned a non-zero exit status
    Failed(ExitStatus, String), // exit status and stderr output
}

/// Represents an error that occurred when executing an external command.
#[derive(Debug)]
pub struct CommandError {
    /// The name of the command that failed (e.g., "ffmpeg", "ffprobe")
    pub command: String,

    /// The specific kind of error that occurred
    pub kind: CommandErrorKind,
}

/// A reason a file was deliberately skipped rather than failed.
///
/// Skips resolve locally to the skip ledger (see worker_pool.rs) and never
/// reach the ErrorRouter.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    AlreadyEncoded,
    BitRateBelowThreshold { bit_rate_bps: u64, floor_bps: u64 },
    ContainerBlacklisted(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyEncoded => write!(f, "already encoded"),
            SkipReason::BitRateBelowThreshold { bit_rate_bps, floor_bps } => {
                write!(f, "bit rate {bit_rate_bps} bps below floor {floor_bps} bps")
            }
            SkipReason::ContainerBlacklisted(fmt_name) => {
                write!(f, "container format `{fmt_name}` is blacklisted")
            }
        }
    }
}

/// Comprehensive error type for the drapto-core library.
///
/// This enum represents all possible errors that can occur during the
/// probe / pre-encode / encode pipeline. Each variant includes a descriptive
/// error message and, where appropriate, additional context about the error.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- I/O and Filesystem Errors ----
    /// Standard I/O errors from the std::io module
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// General path-related errors (invalid paths, missing files, etc.)
    #[error("Path error: {0}")]
    PathError(String),

    // ---- External Command Errors ----
    /// Errors that occur when executing external commands
    #[error("{}", format_command_error(.0))]
    Command(CommandError),

    // ---- Parsing Errors ----
    /// Errors that occur when parsing ffprobe output
    #[error("ffprobe output parsing error: {0}")]
    FfprobeParse(String),

    /// Errors that occur when parsing JSON output
    #[error("Failed to parse JSON output: {0}")]
    JsonParseError(String),

    /// Errors from serde_json (EncodeState sidecar, quarantine probe snapshot)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors that occur when extracting media information
    #[error("Failed to extract media information: {0}")]
    VideoInfoError(String),

    // ---- Discovery Errors ----
    /// Error indicating that no suitable input files were found
    #[error("No suitable input files found in input directory")]
    NoFilesFound,

    /// General operation failure
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    // ---- Probe Errors (spec 4.1) ----
    /// No duration could be determined from format or stream metadata
    #[error("no duration could be determined for {0}")]
    NoDuration(PathBuf),

    /// ffmpeg reported no usable streams, or probing found none of interest
    #[error("no usable video/audio/subtitle streams found for {0}")]
    NoStreamsFound(String),

    // ---- PreEncoder Errors (spec 4.3) ----
    /// Every candidate encoder failed CRF search and manual fallback was not permitted
    #[error("CRF search exhausted all candidate encoders for {0}")]
    CrfSearchExhausted(PathBuf),

    /// No audio stream survived language/codec selection
    #[error("no audio stream survived selection for {0}")]
    NoSuitableAudio(PathBuf),

    /// The input or target container is not supported for output
    #[error("container format `{0}` is not supported for output")]
    UnsupportedContainer(String),

    // ---- Encoder Errors (spec 4.5) ----
    /// The transcoder process failed and no retry path applies
    #[error("transcoder failed for {path}: {source}")]
    TranscoderFailed { path: PathBuf, source: CommandError },

    /// The output container rejected the chosen streams and the fallback container also failed
    #[error("output container incompatible with chosen streams for {0}")]
    ContainerIncompatible(PathBuf),

    /// CRF escalation reached the retry limit or CRF ceiling without meeting the size target
    #[error("oversize retries exhausted for {0} (last ratio {1:.3})")]
    OversizeExhausted(PathBuf, f64),

    // ---- Orchestrator Errors (spec 7) ----
    /// A required external tool could not be found on PATH or the configured module directory
    #[error("required external tool not found: {0}")]
    ToolMissing(String),

    /// CLI or configuration arguments failed validation
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The run was interrupted (e.g. by a signal) while draining in-flight work
    #[error("run interrupted")]
    Interrupted,

    // ---- Notification Errors ----
    /// Errors that occur when sending notifications
    #[error("Notification error: {0}")]
    NotificationError(String),
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for Result using our custom error type.
pub type CoreResult<T> = Result<T, CoreError>;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper function to format command errors for display.
/// This is used by the thiserror #[error] attribute for the Command variant.
fn format_command_error(err: &CommandError) -> String {
    match &err.kind {
        CommandErrorKind::Start(io_err) => {
            format!("Failed to execute {}: {}", err.command, io_err)
        }
        CommandErrorKind::Wait(io_err) => {
            format!("Failed to wait for {}: {}", err.command, io_err)
        }
        CommandErrorKind::Failed(status, stderr) => {
            format!(
                "Command {} failed with status {}. Stderr: {}",
                err.command, status, stderr
            )
        }
    }
}

// ============================================================================
// CONVERSION FUNCTIONS
// ============================================================================

/// Convenience function to create a CommandStart error
pub fn command_start_error(command: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::Command(CommandError {
        command: command.into(),
        kind: CommandErrorKind::Start(error),
    })
}

/// Convenience function to create a CommandWait error
pub fn command_wait_error(command: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::Command(CommandError {
        command: command.into(),
        kind: CommandErrorKind::Wait(error),
    })
}

/// Convenience function to create a CommandFailed error
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::Command(CommandError {
        command: command.into(),
        kind: CommandErrorKind::Failed(status, stderr.into()),
    })
}

/// Classifies an error into the directory name `ErrorRouter` uses to bucket
/// quarantined input under `encode_error/<kind>/...` (spec 4.6).
pub fn error_kind_label(err: &CoreError) -> &'static str {
    match err {
        CoreError::NoDuration(_) => "no_duration",
        CoreError::NoStreamsFound(_) => "no_streams",
        CoreError::CrfSearchExhausted(_) => "crf_search_exhausted",
        CoreError::NoSuitableAudio(_) => "no_suitable_audio",
        CoreError::UnsupportedContainer(_) => "unsupported_container",
        CoreError::TranscoderFailed { .. } => "transcoder_failed",
        CoreError::ContainerIncompatible(_) => "container_incompatible",
        CoreError::FfprobeParse(_) | CoreError::JsonParseError(_) | CoreError::VideoInfoError(_) | CoreError::Json(_) => {
            "probe_malformed"
        }
        CoreError::Io(_) | CoreError::PathError(_) => "io",
        _ => "other",
    }
}
