// ============================================================================
// drapto-core/src/plan.rs
// ============================================================================
//
// ENCODE PLAN DATA MODEL (spec 3, 9)
//
// `EncodePlan` is the product of `PreEncoder`: a fully-decided, immutable
// description of exactly what `Encoder` should do for one input file. Its
// `mode` is a tagged variant dispatched on directly by `Encoder`, rather
// than a trait object -- mirrors how `external/ffmpeg.rs::EncodeParams`
// feeds `build_ffmpeg_args` as a plain value.
//
// AI-ASSISTANT-INFO: EncodePlan data model, spec section 3 / design note 9

use std::path::PathBuf;

/// What kind of encode this plan describes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanMode {
    Video,
    AudioOnly,
    PhonePreset,
}

/// What to do with one stream during encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDirective {
    Copy,
    Reencode { codec: String, bitrate_bps: Option<u32> },
}

/// A single kept stream plus the action to take on it.
#[derive(Debug, Clone)]
pub struct PlannedStream {
    pub source_index: usize,
    pub directive: StreamDirective,
}

/// The fully-decided plan for encoding one input file (spec 3).
#[derive(Debug, Clone)]
pub struct EncodePlan {
    pub input: PathBuf,
    pub mode: PlanMode,
    pub video_encoder: String,
    /// 0..=63, checked by the invariant in `pre_encode::crf_search`.
    pub video_crf: u32,
    pub estimated_size_ratio: f64,
    pub kept_video_streams: Vec<PlannedStream>,
    pub kept_audio_streams: Vec<PlannedStream>,
    pub kept_subtitle_streams: Vec<PlannedStream>,
    pub output_container: String,
    pub comment_payload: String,
    /// Per-stream output frame-rate cap (spec 4.3/4.5), applied via `-r` to
    /// every re-encoded video stream to prevent variable-frame-rate mixing.
    pub capped_frame_rate: Option<f64>,
}

impl EncodePlan {
    /// `video_crf in [0, 63]` and at least one kept video stream for video-mode plans.
    pub fn validate_invariants(&self) -> Result<(), String> {
        if self.video_crf > 63 {
            return Err(format!("video_crf {} out of range [0,63]", self.video_crf));
        }
        if self.mode == PlanMode::Video && self.kept_video_streams.is_empty() {
            return Err("video-mode plan must keep at least one video stream".to_string());
        }
        Ok(())
    }
}
