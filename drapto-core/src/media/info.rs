// ============================================================================
// drapto-core/src/media/info.rs
// ============================================================================
//
// MEDIA DATA MODEL: MediaInfo and StreamInfo
//
// Immutable snapshot of one input file, as produced by `probe::probe`. Once
// constructed, a MediaInfo is never mutated -- PreEncoder and Encoder only
// ever read from it.
//
// AI-ASSISTANT-INFO: MediaInfo/StreamInfo data model, spec section 3

use std::path::PathBuf;

/// The three stream kinds the pipeline cares about. Anything else
/// (data, attachment, ...) is dropped during probing (spec open question:
/// non-video/audio/subtitle streams are dropped silently).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

/// A single stream's descriptor, in the order it appeared in the container.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Original stream index in the source container.
    pub index: usize,
    pub kind: StreamKind,
    pub codec_name: String,
    /// Normalized lowercase three-letter language code, if present.
    pub language: Option<String>,
    pub channels: Option<u32>,
    pub sample_rate_hz: Option<u32>,
    /// Preferred bitrate. `None` if neither ffprobe field was present.
    pub bit_rate_bps: Option<u64>,
    /// `BPS-eng` tag fallback, kept separately for diagnostics (spec open question).
    pub bps_eng_bit_rate: Option<u64>,
    pub avg_frame_rate: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl StreamInfo {
    /// The bitrate PreEncoder should actually use: `bit_rate_bps` wins when
    /// non-zero, otherwise fall back to the `BPS-eng` diagnostic tag.
    pub fn effective_bit_rate_bps(&self) -> Option<u64> {
        match self.bit_rate_bps {
            Some(bps) if bps > 0 => Some(bps),
            _ => self.bps_eng_bit_rate.filter(|bps| *bps > 0),
        }
    }
}

/// Immutable, normalized snapshot of one input file (spec section 3).
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub md5: String,
    pub sha256: String,
    /// Absence is a hard error for video inputs; enforced by `probe::probe`.
    pub duration_seconds: Option<f64>,
    pub container_format: String,
    pub container_bitrate_bps: Option<u64>,
    pub comment_tag: Option<String>,
    pub video_streams: Vec<StreamInfo>,
    pub audio_streams: Vec<StreamInfo>,
    pub subtitle_streams: Vec<StreamInfo>,
}

impl MediaInfo {
    pub fn has_video(&self) -> bool {
        !self.video_streams.is_empty()
    }

    /// The maximum width across kept video streams, used for CRF-tier selection.
    pub fn max_video_width(&self) -> Option<u32> {
        self.video_streams.iter().filter_map(|s| s.width).max()
    }
}
