// ============================================================================
// drapto-core/src/encode/command.rs
// ============================================================================
//
// TRANSCODER ARGUMENT CONSTRUCTION (spec 4.5, 6)
//
// Builds a transcoder invocation deterministically from an `EncodePlan`:
// per-video-stream `-map`/`-c:v`/`-crf`/`-r`, per-audio-stream
// `-map`/`-c:a:<n>`/`-b:a:<n>`, per-subtitle-stream `-map`/`-c:s:<n>`, plus
// `-metadata comment=<payload>`. Generalizes the teacher's
// `external/ffmpeg.rs::build_ffmpeg_args`, which built a fixed
// svtav1+opus pipeline directly from `EncodeParams`; here the arguments are
// driven entirely by the plan's per-stream directives so any mix of
// copy/reencode actions across kinds is expressible.
//
// AI-ASSISTANT-INFO: transcoder argument construction, spec section 4.5 / 6

use crate::plan::{EncodePlan, PlannedStream, StreamDirective};

/// Builds the full argument list (everything after `-i <input>`, before the
/// output path) for one attempt at encoding `plan`.
pub fn build_args(plan: &EncodePlan, capped_frame_rate: Option<f64>) -> Vec<String> {
    let mut args = Vec::new();

    for stream in &plan.kept_video_streams {
        push_map(&mut args, stream.source_index);
        match &stream.directive {
            StreamDirective::Copy => {
                args.push("-c:v".to_string());
                args.push("copy".to_string());
            }
            StreamDirective::Reencode { codec, .. } => {
                args.push("-c:v".to_string());
                args.push(codec.clone());
                args.push("-crf".to_string());
                args.push(plan.video_crf.to_string());
                if let Some(fps) = capped_frame_rate {
                    args.push("-r".to_string());
                    args.push(format!("{fps}"));
                }
            }
        }
    }

    for (n, stream) in plan.kept_audio_streams.iter().enumerate() {
        push_map(&mut args, stream.source_index);
        push_stream_codec(&mut args, "a", n, &stream.directive);
        if let StreamDirective::Reencode { bitrate_bps: Some(bps), .. } = &stream.directive {
            args.push(format!("-b:a:{n}"));
            args.push(format!("{bps}"));
        }
    }

    for (n, stream) in plan.kept_subtitle_streams.iter().enumerate() {
        push_map(&mut args, stream.source_index);
        push_stream_codec(&mut args, "s", n, &stream.directive);
    }

    args.push("-metadata".to_string());
    args.push(format!("comment={}", plan.comment_payload));

    args
}

fn push_map(args: &mut Vec<String>, source_index: usize) {
    args.push("-map".to_string());
    args.push(format!("0:{source_index}"));
}

fn push_stream_codec(args: &mut Vec<String>, kind: &str, n: usize, directive: &StreamDirective) {
    args.push(format!("-c:{kind}:{n}"));
    match directive {
        StreamDirective::Copy => args.push("copy".to_string()),
        StreamDirective::Reencode { codec, .. } => args.push(codec.clone()),
    }
}

/// The extra CRF an oversize retry should use, per spec 4.5:
/// `ceil(crf * manual_crf_increment_percent / 100)`, escalated additively.
pub fn escalate_crf(current_crf: u32, manual_crf_increment_percent: u8) -> u32 {
    let increment = ((current_crf as f64 * manual_crf_increment_percent as f64) / 100.0).ceil() as u32;
    current_crf + increment.max(1)
}

fn planned_stream_with(source_index: usize, directive: StreamDirective) -> PlannedStream {
    PlannedStream { source_index, directive }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanMode;
    use std::path::PathBuf;

    fn base_plan() -> EncodePlan {
        EncodePlan {
            input: PathBuf::from("in.mkv"),
            mode: PlanMode::Video,
            video_encoder: "libsvtav1".to_string(),
            video_crf: 27,
            estimated_size_ratio: 0.6,
            kept_video_streams: vec![planned_stream_with(
                0,
                StreamDirective::Reencode { codec: "libsvtav1".to_string(), bitrate_bps: None },
            )],
            kept_audio_streams: vec![planned_stream_with(
                1,
                StreamDirective::Reencode { codec: "libopus".to_string(), bitrate_bps: Some(96_000) },
            )],
            kept_subtitle_streams: vec![planned_stream_with(2, StreamDirective::Copy)],
            output_container: "mkv".to_string(),
            comment_payload: "{}".to_string(),
            capped_frame_rate: Some(23.976),
        }
    }

    #[test]
    fn builds_map_and_codec_args_per_stream_kind() {
        let plan = base_plan();
        let args = build_args(&plan, Some(23.976));
        assert!(args.windows(2).any(|w| w == ["-map", "0:0"]));
        assert!(args.windows(2).any(|w| w == ["-c:v", "libsvtav1"]));
        assert!(args.windows(2).any(|w| w == ["-crf", "27"]));
        assert!(args.windows(2).any(|w| w == ["-map", "0:1"]));
        assert!(args.windows(2).any(|w| w == ["-c:a:0", "libopus"]));
        assert!(args.windows(2).any(|w| w == ["-b:a:0", "96000"]));
        assert!(args.windows(2).any(|w| w == ["-map", "0:2"]));
        assert!(args.windows(2).any(|w| w == ["-c:s:0", "copy"]));
        assert!(args.iter().any(|a| a.starts_with("comment=")));
    }

    #[test]
    fn escalate_crf_applies_ceiling_percentage() {
        assert_eq!(escalate_crf(27, 10), 30); // ceil(27*0.1) = 3
        assert_eq!(escalate_crf(27, 1), 28); // ceil(27*0.01) = 1 -> minimum bump of 1
    }
}
