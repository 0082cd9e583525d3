// ============================================================================
// drapto-core/src/config/mod.rs
// ============================================================================
//
// CONFIGURATION: Pipeline Configuration Structures and Constants
//
// This module defines the configuration structures and constants used
// throughout the drapto-core pipeline: skip thresholds, the encoder
// priority list, CRF search tolerances, audio/subtitle selection rules,
// and the worker pool's concurrency and layout settings.
//
// KEY COMPONENTS:
// - PipelineConfig: Main, immutable configuration structure for the library
// - PipelineConfigBuilder: Builder pattern for creating PipelineConfig instances
// - Default constants: Predefined values for common settings
//
// USAGE:
// Instances of PipelineConfig are created by consumers of the library (like
// drapto-cli) and passed to `run_pipeline`. drapto-core never reads
// environment variables or CLI flags directly; all tunables arrive through
// this struct.
//
// AI-ASSISTANT-INFO: Configuration structures and constants for the drapto-core library

// ---- Module declarations ----
mod builder;

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Re-exports ----
pub use builder::PipelineConfigBuilder;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default encoder priority list tried in order during CRF search (spec 4.3).
pub const DEFAULT_ENCODER_PRIORITY: &[&str] = &["libsvtav1", "libaom-av1", "libx265"];

/// Default minimum container bitrate below which a file is skipped (spec 4.3).
pub const DEFAULT_BITRATE_FLOOR_BPS: u64 = 500_000;

/// Default list of container formats that are never re-encoded.
pub const DEFAULT_CONTAINER_BLACKLIST: &[&str] = &["gif", "webp"];

/// Default filename marker identifying files already processed in automatic mode.
pub const DEFAULT_OVERSIZE_MARKER: &str = "_encoded";

/// Default `comment` metadata sentinel identifying a file this pipeline already encoded (spec 4.3).
pub const DEFAULT_ALREADY_ENCODED_SENTINEL: &str = "drapto";

/// Default target VMAF score the CRF search aims to meet or exceed.
pub const DEFAULT_TARGET_VMAF: u8 = 95;

/// Default interval, in seconds, at which the CRF-search helper samples the source.
pub const DEFAULT_SAMPLE_EVERY_SECS: u32 = 60;

/// Default ceiling on encoded size as a percentage of source size during CRF search.
pub const DEFAULT_MAX_ENCODED_PERCENT: u8 = 90;

/// Default percentage by which CRF is escalated on each oversize retry.
pub const DEFAULT_MANUAL_CRF_INCREMENT_PERCENT: u8 = 10;

/// Default number of oversize retries before a file moves to the oversize bucket.
pub const DEFAULT_MAX_OVERSIZE_RETRIES: u8 = 3;

/// Default oversize ratio threshold (realized size / source size) above which a retry fires.
pub const DEFAULT_OVERSIZE_RATIO: f64 = 1.0;

/// Default per-channel audio bitrate budget, in bits per second.
pub const DEFAULT_AUDIO_BITRATE_PER_CHANNEL_BPS: u32 = 48_000;

/// Default set of codec names considered "opus-family" and thus copy-eligible.
pub const DEFAULT_OPUS_FAMILY_CODECS: &[&str] = &["opus"];

/// Default extension allow-list for discovery (spec 6).
pub const DEFAULT_EXTENSION_ALLOWLIST: &[&str] = &["mkv", "mp4", "mov", "avi", "ts", "m2ts"];

/// Default number of parallel workers.
pub const DEFAULT_PROCESSES: usize = 1;

// ============================================================================
// PIPELINE CONFIGURATION
// ============================================================================

/// Immutable configuration for a single pipeline run.
///
/// All fields have sensible defaults except the three path fields, which a
/// caller must supply via [`PipelineConfigBuilder`]. `drapto-core` treats
/// this struct as read-only after construction; it is cloned into each
/// worker, never mutated in place.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    // ---- Path Configuration ----
    /// Directory containing input media files to process
    pub input_dir: PathBuf,
    /// Directory where encoded output files will be saved
    pub output_dir: PathBuf,
    /// Directory for per-run logs (combined log, per-file success logs)
    pub log_dir: PathBuf,

    // ---- Worker Pool (spec 4.8, 5) ----
    /// Number of parallel workers
    pub processes: usize,
    /// Shuffle discovered files before dispatch
    pub shuffle: bool,
    /// Extensions considered during discovery (lowercase, no leading dot)
    pub extension_allowlist: Vec<String>,
    /// Move the original input into a `_raw` archive tree on success
    pub move_raw_file: bool,
    /// Skip the filename-normalization step CLI front-ends usually apply
    pub not_rename: bool,

    // ---- Skip Rules (spec 4.3) ----
    pub bitrate_floor_bps: u64,
    pub container_blacklist: Vec<String>,
    pub oversize_marker: String,
    pub oversize_marker_case_sensitive: bool,
    /// `comment` metadata value written by a prior drapto run; an exact match skips re-encoding.
    pub already_encoded_sentinel: String,

    // ---- CRF Search (spec 4.3) ----
    pub encoder_priority: Vec<String>,
    pub target_vmaf: u8,
    pub sample_every_secs: u32,
    pub max_encoded_percent: u8,
    pub manual_mode: bool,

    // ---- Oversize Retry (spec 4.5) ----
    pub manual_crf_increment_percent: u8,
    pub max_oversize_retries: u8,
    pub oversize_ratio: f64,

    // ---- Audio / Subtitle Selection (spec 4.3) ----
    pub audio_bitrate_per_channel_bps: u32,
    pub opus_family_codecs: Vec<String>,
    pub language_allowlist: Vec<String>,
    pub allow_no_audio: bool,
    pub audio_only: bool,

    // ---- Modes ----
    /// Apply the iPhone-oriented preset (spec 6 CLI surface)
    pub iphone_specific_task: bool,

    // ---- Notification Settings ----
    pub ntfy_topic: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("."),

            processes: DEFAULT_PROCESSES,
            shuffle: false,
            extension_allowlist: DEFAULT_EXTENSION_ALLOWLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            move_raw_file: false,
            not_rename: false,

            bitrate_floor_bps: DEFAULT_BITRATE_FLOOR_BPS,
            container_blacklist: DEFAULT_CONTAINER_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            oversize_marker: DEFAULT_OVERSIZE_MARKER.to_string(),
            oversize_marker_case_sensitive: false,
            already_encoded_sentinel: DEFAULT_ALREADY_ENCODED_SENTINEL.to_string(),

            encoder_priority: DEFAULT_ENCODER_PRIORITY.iter().map(|s| s.to_string()).collect(),
            target_vmaf: DEFAULT_TARGET_VMAF,
            sample_every_secs: DEFAULT_SAMPLE_EVERY_SECS,
            max_encoded_percent: DEFAULT_MAX_ENCODED_PERCENT,
            manual_mode: false,

            manual_crf_increment_percent: DEFAULT_MANUAL_CRF_INCREMENT_PERCENT,
            max_oversize_retries: DEFAULT_MAX_OVERSIZE_RETRIES,
            oversize_ratio: DEFAULT_OVERSIZE_RATIO,

            audio_bitrate_per_channel_bps: DEFAULT_AUDIO_BITRATE_PER_CHANNEL_BPS,
            opus_family_codecs: DEFAULT_OPUS_FAMILY_CODECS.iter().map(|s| s.to_string()).collect(),
            language_allowlist: Vec::new(),
            allow_no_audio: false,
            audio_only: false,

            iphone_specific_task: false,

            ntfy_topic: None,
        }
    }
}

impl PipelineConfig {
    /// Whether `name` (a container format name, lowercase) is blacklisted.
    pub fn is_container_blacklisted(&self, name: &str) -> bool {
        self.container_blacklist.iter().any(|b| b.eq_ignore_ascii_case(name))
    }

    /// Whether `filename` carries the oversize/already-encoded marker.
    pub fn has_oversize_marker(&self, filename: &str) -> bool {
        if self.oversize_marker_case_sensitive {
            filename.contains(&self.oversize_marker)
        } else {
            filename.to_lowercase().contains(&self.oversize_marker.to_lowercase())
        }
    }
}
