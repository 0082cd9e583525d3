// ============================================================================
// drapto-core/src/encode/mod.rs
// ============================================================================
//
// ENCODER COMPONENT (spec 4.5)
//
// Runs a resolved `EncodePlan` through the `Transcoder`, handling the two
// retry loops spec 4.5 describes: container-incompatibility (MP4 first, MKV
// fallback on a detected stream-write error, fatal on a second failure) and
// oversize (escalate CRF by `manual_crf_increment_percent` up to
// `max_oversize_retries` or `crf > 63`).
//
// Grounded on the teacher's `external/ffmpeg.rs::run_ffmpeg_encode`
// event-loop shape, generalized: that function built one fixed svtav1/opus
// invocation and handled success/failure inline; here the invocation comes
// from `command::build_args` and retries are a loop around `Transcoder::run`
// driven by the plan's current CRF/container, not the body of the call.
//
// AI-ASSISTANT-INFO: Encoder orchestration + retry loops, spec section 4.5

pub mod command;

use std::time::Instant;

use crate::config::PipelineConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::Transcoder;
use crate::host;
use crate::logger::SuccessRecord;
use crate::media::MediaInfo;
use crate::plan::EncodePlan;

/// Fallback container tried after MP4 reports a stream-write incompatibility.
const FALLBACK_CONTAINER: &str = "mkv";

/// Runs `plan` to completion, handling container and oversize retries.
pub fn run(
    transcoder: &dyn Transcoder,
    config: &PipelineConfig,
    plan: &EncodePlan,
    media: &MediaInfo,
    output_path: &std::path::Path,
) -> CoreResult<SuccessRecord> {
    let started = Instant::now();
    let duration_secs = media.duration_seconds.unwrap_or(0.0);

    let mut attempt_crf = plan.video_crf;
    let mut oversize_retries: u8 = 0;
    let mut container_retried = false;
    let mut current_output = output_path.to_path_buf();

    loop {
        let args = command::build_args(
            &EncodePlan { video_crf: attempt_crf, ..plan.clone() },
            plan.capped_frame_rate,
        );

        match transcoder.run(&plan.input, &current_output, &args, duration_secs) {
            Ok(outcome) => {
                let realized_size_ratio = if media.size_bytes > 0 {
                    outcome.output_size_bytes as f64 / media.size_bytes as f64
                } else {
                    0.0
                };

                if realized_size_ratio > config.oversize_ratio {
                    let escalated = command::escalate_crf(attempt_crf, config.manual_crf_increment_percent);
                    oversize_retries += 1;
                    if escalated > 63 || oversize_retries > config.max_oversize_retries {
                        return Err(CoreError::OversizeExhausted(plan.input.clone(), realized_size_ratio));
                    }
                    attempt_crf = escalated;
                    continue;
                }

                return Ok(SuccessRecord {
                    input_path: plan.input.clone(),
                    output_path: outcome.output_path,
                    encoder: plan.video_encoder.clone(),
                    crf: attempt_crf,
                    estimated_size_ratio: plan.estimated_size_ratio,
                    realized_size_ratio,
                    input_size_bytes: media.size_bytes,
                    output_size_bytes: outcome.output_size_bytes,
                    elapsed_secs: started.elapsed().as_secs_f64(),
                    host: host::host_identifier(),
                });
            }
            Err(CoreError::NoStreamsFound(_)) if !container_retried => {
                container_retried = true;
                current_output = current_output.with_extension(FALLBACK_CONTAINER);
                continue;
            }
            Err(CoreError::NoStreamsFound(_)) => {
                return Err(CoreError::ContainerIncompatible(plan.input.clone()));
            }
            Err(other) => {
                return Err(other);
            }
        }
    }
}
