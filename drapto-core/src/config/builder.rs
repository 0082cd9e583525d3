// ============================================================================
// drapto-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for PipelineConfig
//
// This module implements the builder pattern for the PipelineConfig
// structure, providing a fluent API for creating and configuring
// PipelineConfig instances. It allows for more readable and maintainable
// configuration code, with sensible defaults.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for PipelineConfig

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::PipelineConfig;

/// Builder for creating [`PipelineConfig`] instances.
#[derive(Debug, Clone)]
pub struct PipelineConfigBuilder {
    inner: PipelineConfig,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineConfigBuilder {
    /// Creates a new builder seeded with the pipeline's default settings.
    pub fn new() -> Self {
        Self {
            inner: PipelineConfig::default(),
            input_dir: None,
            output_dir: None,
            log_dir: None,
        }
    }

    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn log_dir(mut self, log_dir: PathBuf) -> Self {
        self.log_dir = Some(log_dir);
        self
    }

    pub fn processes(mut self, processes: usize) -> Self {
        self.inner.processes = processes.max(1);
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.inner.shuffle = shuffle;
        self
    }

    pub fn extension_allowlist(mut self, extensions: Vec<String>) -> Self {
        self.inner.extension_allowlist = extensions;
        self
    }

    pub fn move_raw_file(mut self, move_raw_file: bool) -> Self {
        self.inner.move_raw_file = move_raw_file;
        self
    }

    pub fn not_rename(mut self, not_rename: bool) -> Self {
        self.inner.not_rename = not_rename;
        self
    }

    pub fn bitrate_floor_bps(mut self, floor: u64) -> Self {
        self.inner.bitrate_floor_bps = floor;
        self
    }

    pub fn container_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.inner.container_blacklist = blacklist;
        self
    }

    pub fn oversize_marker(mut self, marker: &str) -> Self {
        self.inner.oversize_marker = marker.to_string();
        self
    }

    pub fn oversize_marker_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.inner.oversize_marker_case_sensitive = case_sensitive;
        self
    }

    pub fn already_encoded_sentinel(mut self, sentinel: &str) -> Self {
        self.inner.already_encoded_sentinel = sentinel.to_string();
        self
    }

    pub fn encoder_priority(mut self, priority: Vec<String>) -> Self {
        self.inner.encoder_priority = priority;
        self
    }

    pub fn target_vmaf(mut self, vmaf: u8) -> Self {
        self.inner.target_vmaf = vmaf;
        self
    }

    pub fn sample_every_secs(mut self, secs: u32) -> Self {
        self.inner.sample_every_secs = secs;
        self
    }

    pub fn max_encoded_percent(mut self, percent: u8) -> Self {
        self.inner.max_encoded_percent = percent;
        self
    }

    pub fn manual_mode(mut self, manual_mode: bool) -> Self {
        self.inner.manual_mode = manual_mode;
        self
    }

    pub fn manual_crf_increment_percent(mut self, percent: u8) -> Self {
        self.inner.manual_crf_increment_percent = percent;
        self
    }

    pub fn max_oversize_retries(mut self, retries: u8) -> Self {
        self.inner.max_oversize_retries = retries;
        self
    }

    pub fn oversize_ratio(mut self, ratio: f64) -> Self {
        self.inner.oversize_ratio = ratio;
        self
    }

    pub fn audio_bitrate_per_channel_bps(mut self, bps: u32) -> Self {
        self.inner.audio_bitrate_per_channel_bps = bps;
        self
    }

    pub fn opus_family_codecs(mut self, codecs: Vec<String>) -> Self {
        self.inner.opus_family_codecs = codecs;
        self
    }

    pub fn language_allowlist(mut self, languages: Vec<String>) -> Self {
        self.inner.language_allowlist = languages;
        self
    }

    pub fn allow_no_audio(mut self, allow: bool) -> Self {
        self.inner.allow_no_audio = allow;
        self
    }

    pub fn audio_only(mut self, audio_only: bool) -> Self {
        self.inner.audio_only = audio_only;
        self
    }

    pub fn iphone_specific_task(mut self, enable: bool) -> Self {
        self.inner.iphone_specific_task = enable;
        self
    }

    pub fn ntfy_topic(mut self, topic: &str) -> Self {
        self.inner.ntfy_topic = Some(topic.to_string());
        self
    }

    /// Builds a [`PipelineConfig`] from the builder.
    ///
    /// # Panics
    ///
    /// Panics if `input_dir`, `output_dir`, or `log_dir` were never set.
    pub fn build(mut self) -> PipelineConfig {
        self.inner.input_dir = self.input_dir.expect("input_dir is required");
        self.inner.output_dir = self.output_dir.expect("output_dir is required");
        self.inner.log_dir = self.log_dir.expect("log_dir is required");
        self.inner
    }
}
