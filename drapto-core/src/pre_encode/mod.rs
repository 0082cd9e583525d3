// ============================================================================
// drapto-core/src/pre_encode/mod.rs
// ============================================================================
//
// PREENCODER COMPONENT (spec 4.3, 4.4)
//
// Turns one probed `MediaInfo` into either a `Skipped` outcome or a fully
// resolved, persisted `EncodePlan`, driving the `Fresh -> Probed -> Decided
// -> Planned -> Persisted` state machine described in spec 4.4. Submodules
// hold the individual decision rules: `skip` (first-match skip rules),
// `crf_search` (encoder/CRF selection), `streams` (per-kind stream selection).
//
// AI-ASSISTANT-INFO: PreEncoder orchestration, spec section 4.3 / 4.4

mod crf_search;
mod skip;
mod streams;

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::{CoreError, CoreResult, SkipReason};
use crate::external::{CrfSearchHelper, LanguageClassifier};
use crate::media::MediaInfo;
use crate::output_paths;
use crate::plan::{EncodePlan, PlanMode};
use crate::state::{self, EncodeState};

/// What PreEncoder decided for one file.
pub enum PreEncodeOutcome {
    Skipped(SkipReason),
    Planned(EncodePlan),
}

/// Default output container; MP4 is tried first per spec 4.5's
/// container-incompatibility retry (MP4 -> MKV).
const DEFAULT_CONTAINER: &str = "mp4";

/// Drives PreEncoder end-to-end for one probed file.
///
/// `output_dir` and `encoder_name_hint` are needed up front to compute the
/// `EncodeState` sidecar path for resume, since that path is keyed on the
/// eventual output location rather than the input.
#[allow(clippy::too_many_arguments)]
pub fn decide(
    config: &PipelineConfig,
    crf_helper: &dyn CrfSearchHelper,
    language_classifier: &dyn LanguageClassifier,
    media: &MediaInfo,
    input_dir: &Path,
) -> CoreResult<PreEncodeOutcome> {
    if let Some(reason) = skip::evaluate(config, media) {
        return Ok(PreEncodeOutcome::Skipped(reason));
    }

    if !media.has_video() {
        return Err(CoreError::NoStreamsFound(media.path.display().to_string()));
    }

    let relative = output_paths::mirror_relative_path(input_dir, &media.path)?;

    let mode = if config.audio_only {
        PlanMode::AudioOnly
    } else if config.iphone_specific_task {
        PlanMode::PhonePreset
    } else {
        PlanMode::Video
    };

    let (kept_video_streams, capped_frame_rate) = streams::select_video(&media.video_streams);
    if mode == PlanMode::Video && kept_video_streams.is_empty() {
        return Err(CoreError::NoStreamsFound(media.path.display().to_string()));
    }

    let duration_secs = media.duration_seconds.unwrap_or(0.0);
    let kept_audio_streams = streams::select_audio(
        config,
        &media.audio_streams,
        language_classifier,
        &media.path,
        duration_secs,
    )?;
    let kept_subtitle_streams = streams::select_subtitle(config, &media.subtitle_streams, DEFAULT_CONTAINER);

    // Check for a resumable EncodeState before spending a CRF search. A
    // loaded state is only trusted if its fingerprint still matches the
    // input's current md5 + encoder/crf; a mismatch means the input or the
    // prior decision changed underneath it, so the stale state is discarded
    // and CRF search runs fresh (spec 4.4).
    let probe_encoded_output =
        output_paths::encoded_output_path(&config.output_dir, "probe", &relative, DEFAULT_CONTAINER);
    let sidecar_path = output_paths::state_sidecar_path(&probe_encoded_output);

    let crf_choice = match EncodeState::load(&sidecar_path)? {
        Some(existing) if existing.matches(&state::fingerprint(&media.md5, &existing.encoder, existing.crf, DEFAULT_CONTAINER)) => {
            crf_search::CrfChoice {
                encoder: existing.encoder.clone(),
                crf: existing.crf,
                estimated_size_ratio: 1.0,
            }
        }
        Some(_) => {
            std::fs::remove_file(&sidecar_path).ok();
            crf_search::search(crf_helper, config, &media.path)?
        }
        None => crf_search::search(crf_helper, config, &media.path)?,
    };

    let fingerprint = state::fingerprint(&media.md5, &crf_choice.encoder, crf_choice.crf, DEFAULT_CONTAINER);

    let comment_payload = build_comment_payload(media, &crf_choice);

    let plan = EncodePlan {
        input: media.path.clone(),
        mode,
        video_encoder: crf_choice.encoder.clone(),
        video_crf: crf_choice.crf,
        estimated_size_ratio: crf_choice.estimated_size_ratio,
        kept_video_streams,
        kept_audio_streams,
        kept_subtitle_streams,
        output_container: DEFAULT_CONTAINER.to_string(),
        comment_payload,
        capped_frame_rate,
    };

    plan.validate_invariants().map_err(CoreError::InvalidArguments)?;

    let encoded_output = output_paths::encoded_output_path(
        &config.output_dir,
        &plan.video_encoder,
        &relative,
        &plan.output_container,
    );
    let state_path = output_paths::state_sidecar_path(&encoded_output);
    EncodeState::fresh(&plan.video_encoder, plan.video_crf, fingerprint).persist(&state_path)?;

    Ok(PreEncodeOutcome::Planned(plan))
}

fn build_comment_payload(media: &MediaInfo, crf_choice: &crf_search::CrfChoice) -> String {
    format!(
        "{{\"comment\":\"drapto\",\"encoders\":\"{}\",\"CRF\":{},\"source file\":\"{}\",\"source file size\":{},\"source file md5\":\"{}\",\"source file sha256\":\"{}\",\"estimated ratio\":{:.4}}}",
        crf_choice.encoder,
        crf_choice.crf,
        media.path.display(),
        media.size_bytes,
        media.md5,
        media.sha256,
        crf_choice.estimated_size_ratio,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::{FakeCrfSearchHelper, FakeLanguageClassifier};
    use crate::external::CrfSearchResult;
    use crate::media::{StreamInfo, StreamKind};
    use tempfile::TempDir;

    fn sample_media(input_dir: &Path, name: &str) -> MediaInfo {
        MediaInfo {
            path: input_dir.join(name),
            size_bytes: 10_000_000,
            md5: "d".into(),
            sha256: "s".into(),
            duration_seconds: Some(600.0),
            container_format: "matroska".into(),
            container_bitrate_bps: Some(5_000_000),
            comment_tag: None,
            video_streams: vec![StreamInfo {
                index: 0,
                kind: StreamKind::Video,
                codec_name: "h264".into(),
                language: None,
                channels: None,
                sample_rate_hz: None,
                bit_rate_bps: None,
                bps_eng_bit_rate: None,
                avg_frame_rate: Some(23.976),
                width: Some(1920),
                height: Some(1080),
            }],
            audio_streams: vec![StreamInfo {
                index: 1,
                kind: StreamKind::Audio,
                codec_name: "aac".into(),
                language: Some("eng".into()),
                channels: Some(2),
                sample_rate_hz: Some(48_000),
                bit_rate_bps: Some(192_000),
                bps_eng_bit_rate: None,
                avg_frame_rate: None,
                width: None,
                height: None,
            }],
            subtitle_streams: vec![],
        }
    }

    #[test]
    fn skipped_file_never_reaches_crf_search() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = PipelineConfig::default();
        cfg.input_dir = tmp.path().to_path_buf();
        cfg.output_dir = tmp.path().join("out");
        let media = sample_media(tmp.path(), "movie_encoded.mkv");
        let helper = FakeCrfSearchHelper::always_exhausted();
        let classifier = FakeLanguageClassifier { language: "eng".into(), confidence: 0.9 };
        let outcome = decide(&cfg, &helper, &classifier, &media, &cfg.input_dir).unwrap();
        assert!(matches!(outcome, PreEncodeOutcome::Skipped(SkipReason::AlreadyEncoded)));
    }

    #[test]
    fn planned_file_persists_encode_state() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = PipelineConfig::default();
        cfg.input_dir = tmp.path().to_path_buf();
        cfg.output_dir = tmp.path().join("out");
        let media = sample_media(tmp.path(), "movie.mkv");
        let helper = FakeCrfSearchHelper::always_returning(27, 60.0);
        let classifier = FakeLanguageClassifier { language: "eng".into(), confidence: 0.9 };
        let outcome = decide(&cfg, &helper, &classifier, &media, &cfg.input_dir).unwrap();
        match outcome {
            PreEncodeOutcome::Planned(plan) => {
                assert_eq!(plan.video_crf, 27);
                assert_eq!(plan.kept_audio_streams.len(), 1);
                let relative = output_paths::mirror_relative_path(&cfg.input_dir, &media.path).unwrap();
                let encoded_output = output_paths::encoded_output_path(
                    &cfg.output_dir,
                    &plan.video_encoder,
                    &relative,
                    &plan.output_container,
                );
                let state_path = output_paths::state_sidecar_path(&encoded_output);
                assert!(state_path.exists());
            }
            PreEncodeOutcome::Skipped(_) => panic!("expected a planned outcome"),
        }
    }

    #[test]
    fn stale_encode_state_with_mismatched_fingerprint_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = PipelineConfig::default();
        cfg.input_dir = tmp.path().to_path_buf();
        cfg.output_dir = tmp.path().join("out");
        let media = sample_media(tmp.path(), "movie.mkv");

        let relative = output_paths::mirror_relative_path(&cfg.input_dir, &media.path).unwrap();
        let probe_encoded_output =
            output_paths::encoded_output_path(&cfg.output_dir, "probe", &relative, DEFAULT_CONTAINER);
        let sidecar_path = output_paths::state_sidecar_path(&probe_encoded_output);
        let stale = crate::state::EncodeState::fresh(
            "libsvtav1",
            20,
            crate::state::fingerprint("some-other-md5", "libsvtav1", 20, DEFAULT_CONTAINER),
        );
        stale.persist(&sidecar_path).unwrap();

        let helper = FakeCrfSearchHelper::always_returning(27, 60.0);
        let classifier = FakeLanguageClassifier { language: "eng".into(), confidence: 0.9 };
        let outcome = decide(&cfg, &helper, &classifier, &media, &cfg.input_dir).unwrap();
        match outcome {
            PreEncodeOutcome::Planned(plan) => assert_eq!(plan.video_crf, 27),
            PreEncodeOutcome::Skipped(_) => panic!("expected a planned outcome"),
        }
    }

    #[test]
    fn video_less_media_is_no_streams_found() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = PipelineConfig::default();
        cfg.input_dir = tmp.path().to_path_buf();
        cfg.output_dir = tmp.path().join("out");
        let mut media = sample_media(tmp.path(), "movie.mkv");
        media.video_streams.clear();
        let helper = FakeCrfSearchHelper::always_returning(27, 60.0);
        let classifier = FakeLanguageClassifier { language: "eng".into(), confidence: 0.9 };
        let result = decide(&cfg, &helper, &classifier, &media, &cfg.input_dir);
        assert!(matches!(result, Err(CoreError::NoStreamsFound(_))));
    }
}
