// ============================================================================
// drapto-core/src/external/process.rs
// ============================================================================
//
// PROCESS-BACKED COLLABORATORS
//
// Real implementations of the `Transcoder` and `CrfSearchHelper` traits.
// `ProcessTranscoder` generalizes the teacher's ffmpeg-sidecar event loop
// (spawn, watch `FfmpegEvent::{Progress,Error,Log}`, classify the failure on
// a non-zero exit) to a plan-agnostic runner that takes a fully-built
// argument list rather than constructing svtav1/opus args itself -- that
// construction now lives in `encode::command`, closer to the plan it serves.
//
// `ProcessCrfSearchHelper` shells out to the `crf-search` helper binary per
// the wire contract in spec section 6 and parses its stdout.
//
// AI-ASSISTANT-INFO: process-backed Transcoder/CrfSearchHelper, spec 4.3/4.5/6

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use crate::error::{command_failed_error, command_start_error, command_wait_error, CoreError, CoreResult};
use crate::language::{ClassificationResult, LanguageClassifier};
use crate::progress_reporting;

use super::{CrfSearchHelper, CrfSearchResult, Transcoder, TranscodeOutcome};

/// Real `Transcoder` backed by the ffmpeg-sidecar process runner.
pub struct ProcessTranscoder;

impl Transcoder for ProcessTranscoder {
    fn run(
        &self,
        input: &Path,
        output: &Path,
        args: &[String],
        duration_secs: f64,
    ) -> CoreResult<TranscodeOutcome> {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut cmd = FfmpegCommand::new();
        cmd.arg("-y").arg("-i").arg(input);
        for arg in args {
            cmd.arg(arg);
        }
        cmd.arg(output);

        let started = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))?;

        let mut stderr_buffer = String::new();
        let iter = child
            .iter()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))?;

        for event in iter {
            match event {
                FfmpegEvent::Progress(progress) => {
                    if duration_secs > 0.0 {
                        if let Ok(current_secs) = parse_ffmpeg_time(&progress.time) {
                            let percent = ((current_secs / duration_secs) * 100.0).clamp(0.0, 100.0) as f32;
                            let elapsed_wall_clock = started.elapsed().as_secs_f64().max(0.001);
                            let avg_fps = progress.frame as f64 / elapsed_wall_clock;
                            let remaining_secs = if progress.speed > 0.0 {
                                ((duration_secs - current_secs) / progress.speed as f64).max(0.0)
                            } else {
                                0.0
                            };
                            progress_reporting::report_encode_progress(
                                percent,
                                current_secs,
                                duration_secs,
                                progress.speed,
                                avg_fps as f32,
                                std::time::Duration::from_secs_f64(remaining_secs),
                            );
                        }
                    }
                }
                FfmpegEvent::Error(message) => {
                    stderr_buffer.push_str(&message);
                    stderr_buffer.push('\n');
                }
                FfmpegEvent::Log(_level, message) => {
                    stderr_buffer.push_str(&message);
                    stderr_buffer.push('\n');
                }
                FfmpegEvent::ParsedOutput(_) => {}
                _ => {}
            }
        }

        let status = child
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))?;

        if !status.success() {
            if stderr_buffer.contains("No streams found") {
                return Err(CoreError::NoStreamsFound(input.display().to_string()));
            }
            return Err(command_failed_error("ffmpeg (sidecar)", status, stderr_buffer));
        }

        let output_size_bytes = std::fs::metadata(output)?.len();
        Ok(TranscodeOutcome {
            output_path: output.to_path_buf(),
            output_size_bytes,
        })
    }
}

/// Parses ffmpeg's `HH:MM:SS.ms` progress timestamp into seconds.
fn parse_ffmpeg_time(time_str: &str) -> CoreResult<f64> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 3 {
        return Err(CoreError::FfprobeParse(format!("malformed ffmpeg time: {time_str}")));
    }
    let hours: f64 = parts[0]
        .parse()
        .map_err(|_| CoreError::FfprobeParse(format!("malformed ffmpeg time: {time_str}")))?;
    let minutes: f64 = parts[1]
        .parse()
        .map_err(|_| CoreError::FfprobeParse(format!("malformed ffmpeg time: {time_str}")))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| CoreError::FfprobeParse(format!("malformed ffmpeg time: {time_str}")))?;
    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Real `CrfSearchHelper` backed by the external `crf-search` binary
/// (spec section 6: `crf-search -e <encoder> -i <path> --sample-every <secs>
/// --max-encoded-percent <pct> --min-vmaf <score>`).
pub struct ProcessCrfSearchHelper;

impl CrfSearchHelper for ProcessCrfSearchHelper {
    fn search(
        &self,
        input: &Path,
        encoder: &str,
        sample_every_secs: u32,
        max_encoded_percent: u8,
        min_vmaf: u8,
    ) -> CoreResult<CrfSearchResult> {
        let output = Command::new("crf-search")
            .arg("-e")
            .arg(encoder)
            .arg("-i")
            .arg(input)
            .arg("--sample-every")
            .arg(sample_every_secs.to_string())
            .arg("--max-encoded-percent")
            .arg(max_encoded_percent.to_string())
            .arg("--min-vmaf")
            .arg(min_vmaf.to_string())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CoreError::ToolMissing("crf-search".to_string())
                } else {
                    command_start_error("crf-search", e)
                }
            })?;

        if !output.status.success() {
            return Err(command_failed_error(
                "crf-search",
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        parse_crf_search_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses `crf-search`'s stdout: a `crf <N>` line and a `<N.N>%` line.
fn parse_crf_search_output(stdout: &str) -> CoreResult<CrfSearchResult> {
    let mut crf = None;
    let mut encoded_percent = None;

    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("crf ") {
            crf = rest.trim().parse::<u32>().ok();
        } else if let Some(rest) = line.strip_suffix('%') {
            encoded_percent = rest.trim().parse::<f64>().ok();
        }
    }

    match (crf, encoded_percent) {
        (Some(crf), Some(encoded_percent)) => Ok(CrfSearchResult { crf, encoded_percent }),
        _ => Err(CoreError::FfprobeParse(format!(
            "could not parse crf-search output: {stdout}"
        ))),
    }
}

/// Real `LanguageClassifier` backed by the external `language-classify`
/// helper binary (spec section 6: `language-classify -i <path> --offset
/// <secs> --duration <secs>`), extracting a clip of the input with ffmpeg
/// and handing it to the classifier over stdout.
pub struct ProcessLanguageClassifier;

impl LanguageClassifier for ProcessLanguageClassifier {
    fn classify(&self, path: &Path, offset_secs: f64, duration_secs: f64) -> CoreResult<ClassificationResult> {
        let output = Command::new("language-classify")
            .arg("-i")
            .arg(path)
            .arg("--offset")
            .arg(offset_secs.to_string())
            .arg("--duration")
            .arg(duration_secs.to_string())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CoreError::ToolMissing("language-classify".to_string())
                } else {
                    command_start_error("language-classify", e)
                }
            })?;

        if !output.status.success() {
            return Err(command_failed_error(
                "language-classify",
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        parse_language_classify_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses `language-classify`'s stdout: a `lang <code>` line and a
/// `confidence <0.0-1.0>` line.
fn parse_language_classify_output(stdout: &str) -> CoreResult<ClassificationResult> {
    let mut language = None;
    let mut confidence = None;

    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("lang ") {
            language = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("confidence ") {
            confidence = rest.trim().parse::<f32>().ok();
        }
    }

    match (language, confidence) {
        (Some(language), Some(confidence)) => Ok(ClassificationResult { language, confidence }),
        _ => Err(CoreError::FfprobeParse(format!(
            "could not parse language-classify output: {stdout}"
        ))),
    }
}
