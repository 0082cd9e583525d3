// ============================================================================
// drapto-core/src/pre_encode/streams.rs
// ============================================================================
//
// STREAM SELECTION (spec 4.3)
//
// Decides which of a probed file's streams survive into the EncodePlan, and
// what to do with each one. Three independent passes -- video, audio,
// subtitle -- each producing `PlannedStream`s keyed by the stream's original
// index so `Encoder` can emit `-map`/`-c:*` pairs in input order.
//
// AI-ASSISTANT-INFO: stream selection, spec section 4.3

use crate::config::PipelineConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::LanguageClassifier;
use crate::language;
use crate::media::{MediaInfo, StreamInfo};
use crate::plan::{PlannedStream, StreamDirective};

/// Video streams with a missing `avg_frame_rate` are dropped; kept streams'
/// frame rate is reported capped at the maximum among kept streams (the cap
/// itself is applied by Encoder via `-r`, this just computes the value).
pub fn select_video(video_streams: &[StreamInfo]) -> (Vec<PlannedStream>, Option<f64>) {
    let kept: Vec<&StreamInfo> = video_streams.iter().filter(|s| s.avg_frame_rate.is_some()).collect();
    let capped_frame_rate = kept.iter().filter_map(|s| s.avg_frame_rate).fold(None, |acc, fr| {
        Some(acc.map_or(fr, |m: f64| m.max(fr)))
    });
    let planned = kept
        .iter()
        .map(|s| PlannedStream {
            source_index: s.index,
            directive: StreamDirective::Reencode { codec: "libsvtav1".to_string(), bitrate_bps: None },
        })
        .collect();
    (planned, capped_frame_rate)
}

/// Audio selection (spec 4.3): copy opus-family streams that already meet the
/// sample-rate threshold; otherwise reencode to opus at
/// `min(stream.bit_rate_bps, channels * per_channel_budget)`. A stream is
/// kept only if its language passes the allow-list (empty allow-list means
/// "keep everything"), running `LanguageDetector` when the tag is absent.
pub fn select_audio(
    config: &PipelineConfig,
    audio_streams: &[StreamInfo],
    classifier: &dyn LanguageClassifier,
    input_path: &std::path::Path,
    duration_secs: f64,
) -> CoreResult<Vec<PlannedStream>> {
    const OPUS_COPY_SAMPLE_RATE_FLOOR_HZ: u32 = 48_000;

    let mut planned = Vec::new();
    for stream in audio_streams {
        let language = match &stream.language {
            Some(lang) if !lang.is_empty() => lang.clone(),
            _ => language::detect_language(classifier, input_path, duration_secs, 3),
        };

        if !language_allowed(config, &language) {
            continue;
        }

        let is_opus_family = config
            .opus_family_codecs
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&stream.codec_name));
        let meets_sample_rate = stream.sample_rate_hz.unwrap_or(0) >= OPUS_COPY_SAMPLE_RATE_FLOOR_HZ;

        let directive = if is_opus_family && meets_sample_rate {
            StreamDirective::Copy
        } else {
            let channel_budget_bps =
                stream.channels.unwrap_or(2) * config.audio_bitrate_per_channel_bps;
            let bitrate_bps = stream
                .effective_bit_rate_bps()
                .map(|bps| bps.min(channel_budget_bps as u64))
                .unwrap_or(channel_budget_bps as u64) as u32;
            StreamDirective::Reencode { codec: "libopus".to_string(), bitrate_bps: Some(bitrate_bps) }
        };

        planned.push(PlannedStream { source_index: stream.index, directive });
    }

    if planned.is_empty() && !config.allow_no_audio {
        return Err(CoreError::NoSuitableAudio(input_path.to_path_buf()));
    }

    Ok(planned)
}

/// Subtitle selection (spec 4.3): keep streams whose language passes the
/// allow-list; copy when the codec is compatible with `output_container`,
/// else reencode to a compatible text codec.
pub fn select_subtitle(
    config: &PipelineConfig,
    subtitle_streams: &[StreamInfo],
    output_container: &str,
) -> Vec<PlannedStream> {
    subtitle_streams
        .iter()
        .filter(|s| match &s.language {
            Some(lang) => language_allowed(config, lang),
            None => true,
        })
        .map(|s| {
            let directive = if subtitle_codec_compatible(&s.codec_name, output_container) {
                StreamDirective::Copy
            } else {
                StreamDirective::Reencode { codec: "mov_text".to_string(), bitrate_bps: None }
            };
            PlannedStream { source_index: s.index, directive }
        })
        .collect()
}

fn language_allowed(config: &PipelineConfig, language: &str) -> bool {
    config.language_allowlist.is_empty()
        || config.language_allowlist.iter().any(|l| l.eq_ignore_ascii_case(language))
}

fn subtitle_codec_compatible(codec_name: &str, output_container: &str) -> bool {
    match output_container {
        "mp4" => matches!(codec_name, "mov_text" | "tx3g"),
        _ => true, // mkv accepts effectively any subtitle codec
    }
}
