//! # drapto-core
//!
//! Core library for the batch media transcoding pipeline: probe source
//! files, decide what to encode and how (PreEncoder), drive the transcoder
//! and its retry loops (Encoder), and route failures and skips to the
//! right place (ErrorRouter, skip ledger). `drapto-cli` is a thin front end
//! over this crate's `run_pipeline` entry point.
//!
//! ## Architecture
//!
//! The pipeline is a five-stage sequence per file, orchestrated by
//! `worker_pool::run_pipeline` across a rayon-backed worker pool:
//!
//! 1. `discovery` enumerates candidate files under `PipelineConfig::input_dir`.
//! 2. `media::probe` inspects each file into a `MediaInfo` snapshot.
//! 3. `pre_encode::decide` turns a `MediaInfo` into a `Skipped` outcome or a
//!    persisted `EncodePlan`, consulting `external::CrfSearchHelper` and
//!    `language::LanguageClassifier`.
//! 4. `encode::run` drives `external::Transcoder` against the plan, handling
//!    container-incompatibility and oversize retries.
//! 5. Success is logged (`logger`) and the raw input optionally archived;
//!    failures are quarantined (`error_router`); skips append to a ledger.
//!
//! External collaborators (`Transcoder`, `CrfSearchHelper`, `LanguageClassifier`,
//! `notifications::Notifier`) are abstracted behind narrow traits so the
//! pipeline can be driven against fakes in tests; `external::process` and
//! `notifications` hold the real, process/network-backed implementations.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use drapto_core::{PipelineConfigBuilder, run_pipeline, Collaborators};
//! use drapto_core::external::process::{ProcessTranscoder, ProcessCrfSearchHelper};
//! use std::path::PathBuf;
//!
//! let config = PipelineConfigBuilder::new()
//!     .input_dir(PathBuf::from("/path/to/input"))
//!     .output_dir(PathBuf::from("/path/to/output"))
//!     .log_dir(PathBuf::from("/path/to/logs"))
//!     .processes(2)
//!     .build();
//!
//! let transcoder = ProcessTranscoder;
//! let crf_helper = ProcessCrfSearchHelper;
//! struct NoopClassifier;
//! impl drapto_core::language::LanguageClassifier for NoopClassifier {
//!     fn classify(&self, _clip: &std::path::Path) -> drapto_core::CoreResult<drapto_core::language::ClassificationResult> {
//!         Ok(drapto_core::language::ClassificationResult { language: "unknown".into(), confidence: 0.0 })
//!     }
//! }
//! let classifier = NoopClassifier;
//!
//! let collaborators = Collaborators {
//!     transcoder: &transcoder,
//!     crf_helper: &crf_helper,
//!     language_classifier: &classifier,
//!     notifier: None,
//! };
//!
//! let outcomes = run_pipeline(&config, &collaborators).unwrap();
//! ```
//!
//! ## AI-ASSISTANT-INFO
//!
//! Core library for the probe/pre-encode/encode media pipeline: file
//! discovery, media probing, encode planning, transcoding, and error routing.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

/// Pipeline configuration structures and constants
pub mod config;

/// Finding processable media files under the input directory
pub mod discovery;

/// Custom error types, result alias, and skip-reason type
pub mod error;

/// Trait abstractions over out-of-process collaborators (transcoder, CRF search)
pub mod external;

/// Host identifier used on success records and notifications
pub mod host;

/// Language detection for streams lacking a container language tag
pub mod language;

/// Success-record and combined-log writing
pub mod logger;

/// Probed media file data model and probing
pub mod media;

/// Structured quarantine tree for files that fail the pipeline
pub mod error_router;

/// Push notification services for run progress
pub mod notifications;

/// Pure functions mapping input paths to the persisted output tree
pub mod output_paths;

/// EncodePlan data model produced by PreEncoder
pub mod plan;

/// Turns a probed MediaInfo into a skip outcome or a resolved EncodePlan
pub mod pre_encode;

/// Runs an EncodePlan through the transcoder, handling retries
pub mod encode;

/// Durable per-file scratch state for resuming interrupted runs
pub mod state;

/// Terminal progress reporting
pub mod progress_reporting;

/// Common formatting and hashing utilities
pub mod utils;

/// Top-level pipeline orchestration across a worker pool
pub mod worker_pool;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// ----- Configuration -----
pub use config::{PipelineConfig, PipelineConfigBuilder};

// ----- File Discovery -----
pub use discovery::find_processable_files;

// ----- Error Handling -----
pub use error::{CoreError, CoreResult, SkipReason};

// ----- Media -----
pub use media::{MediaInfo, StreamInfo, StreamKind};

// ----- Encode Plan -----
pub use plan::{EncodePlan, PlanMode, PlannedStream, StreamDirective};

// ----- Pipeline Orchestration -----
pub use worker_pool::{run_pipeline, Collaborators, FileOutcome};

// ----- Success Records -----
pub use logger::SuccessRecord;

// ----- External Collaborators -----
pub use external::{CrfSearchHelper, CrfSearchResult, Transcoder, TranscodeOutcome};

// ----- Notification Services -----
pub use notifications::Notifier;

// ----- Utility Functions -----
pub use utils::{format_bytes, format_duration};
