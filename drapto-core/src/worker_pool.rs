// ============================================================================
// drapto-core/src/worker_pool.rs
// ============================================================================
//
// WORKERPOOL COMPONENT (spec 4.8, 5)
//
// Top-level pipeline orchestration: enumerate candidates via `discovery`,
// dispatch each to a rayon worker, and drive the per-file
// Probe -> PreEncoder -> Encoder sequence, routing soft skips to the skip
// ledger, oversize-exhausted files to a dedicated oversize bucket, and
// everything else that fails to the ErrorRouter. Workers are data-parallel
// via rayon, mirroring the teacher's `rayon`-based `ParallelEncoder`
// dispatch generalized to the new per-file pipeline.
//
// AI-ASSISTANT-INFO: WorkerPool orchestration, spec section 4.8 / 5

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::discovery;
use crate::encode;
use crate::error::{CoreError, CoreResult, SkipReason};
use crate::error_router;
use crate::external::{CrfSearchHelper, LanguageClassifier, Transcoder};
use crate::logger::{self, SuccessRecord};
use crate::media::{self, MediaInfo};
use crate::notifications::Notifier;
use crate::output_paths;
use crate::pre_encode::{self, PreEncodeOutcome};
use crate::progress_reporting;

/// Outcome of one file's pipeline run, used to build the run-level summary.
pub enum FileOutcome {
    Success(SuccessRecord),
    Skipped { path: PathBuf, reason: SkipReason },
    /// CRF escalation exhausted its retries/ceiling without meeting the size
    /// target (spec 4.5). Routed to a dedicated oversize bucket, distinct
    /// from the error quarantine tree (spec 4.6).
    Oversize { path: PathBuf, ratio: f64 },
    Errored { path: PathBuf, err: CoreError },
}

/// A per-file failure plus whatever `MediaInfo` was available when it
/// occurred, so the caller can pass it on to `error_router::quarantine`'s
/// `probe.json` sibling whenever probing succeeded before the failure.
struct FileRunError {
    err: CoreError,
    media: Option<MediaInfo>,
}

/// The external collaborators a pipeline run needs, grouped for a single
/// constructor argument rather than four separate trait-object parameters.
pub struct Collaborators<'a> {
    pub transcoder: &'a (dyn Transcoder + Sync),
    pub crf_helper: &'a (dyn CrfSearchHelper + Sync),
    pub language_classifier: &'a (dyn LanguageClassifier + Sync),
    pub notifier: Option<&'a (dyn Notifier + Sync)>,
}

/// Runs the full pipeline for every discovered file under `config.input_dir`.
pub fn run_pipeline(config: &PipelineConfig, collaborators: &Collaborators) -> CoreResult<Vec<FileOutcome>> {
    let candidates = discovery::find_processable_files(
        &config.input_dir,
        &config.extension_allowlist,
        config.shuffle,
    )?;

    progress_reporting::report_section(&format!("Processing {} file(s)", candidates.len()));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.processes.max(1))
        .build()
        .map_err(|e| CoreError::OperationFailed(format!("failed to build worker pool: {e}")))?;

    let skip_ledger = Mutex::new(());

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        candidates
            .into_par_iter()
            .map(|path| process_one_file(config, collaborators, &path, &skip_ledger))
            .collect()
    });

    shutdown(config, &outcomes)?;

    Ok(outcomes)
}

fn process_one_file(
    config: &PipelineConfig,
    collaborators: &Collaborators,
    path: &Path,
    skip_ledger: &Mutex<()>,
) -> FileOutcome {
    match run_single_file(config, collaborators, path, skip_ledger) {
        Ok(FileOutcome::Success(record)) => {
            if let Some(notifier) = collaborators.notifier {
                notify_best_effort(notifier, config, &format!("encoded {}", path.display()));
            }
            FileOutcome::Success(record)
        }
        Ok(other) => other,
        Err(FileRunError { err, media }) => {
            progress_reporting::report_encode_error(path, &err.to_string());

            if let CoreError::OversizeExhausted(_, ratio) = &err {
                let ratio = *ratio;
                return match route_to_oversize(config, path) {
                    Ok(_) => FileOutcome::Oversize { path: path.to_path_buf(), ratio },
                    Err(router_err) => FileOutcome::Errored { path: path.to_path_buf(), err: router_err },
                };
            }

            match error_router::quarantine(&config.output_dir, &config.input_dir, path, &err, media.as_ref()) {
                Ok(_) => FileOutcome::Errored { path: path.to_path_buf(), err },
                Err(router_err) => FileOutcome::Errored { path: path.to_path_buf(), err: router_err },
            }
        }
    }
}

/// Moves `input_path` into the oversize bucket under `config.output_dir`,
/// mirroring its relative path (spec 4.5/4.6).
fn route_to_oversize(config: &PipelineConfig, input_path: &Path) -> CoreResult<PathBuf> {
    let relative = output_paths::mirror_relative_path(&config.input_dir, input_path)?;
    let dest = output_paths::oversize_path(&config.output_dir, &relative);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(input_path, &dest)?;
    Ok(dest)
}

fn run_single_file(
    config: &PipelineConfig,
    collaborators: &Collaborators,
    path: &Path,
    skip_ledger: &Mutex<()>,
) -> Result<FileOutcome, FileRunError> {
    let media: MediaInfo = media::probe(path).map_err(|err| FileRunError { err, media: None })?;

    let outcome = pre_encode::decide(
        config,
        collaborators.crf_helper,
        collaborators.language_classifier,
        &media,
        &config.input_dir,
    )
    .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;

    let plan = match outcome {
        PreEncodeOutcome::Skipped(reason) => {
            append_skip_ledger(config, path, &reason, skip_ledger)
                .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;
            return Ok(FileOutcome::Skipped { path: path.to_path_buf(), reason });
        }
        PreEncodeOutcome::Planned(plan) => plan,
    };

    let relative = output_paths::mirror_relative_path(&config.input_dir, path)
        .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;
    let output_path = output_paths::encoded_output_path(
        &config.output_dir,
        &plan.video_encoder,
        &relative,
        &plan.output_container,
    );

    progress_reporting::report_encode_start(path, &output_path);
    let record = encode::run(collaborators.transcoder, config, &plan, &media, &output_path)
        .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;

    let success_log = output_paths::success_log_path(&output_path, &date_stamp(), &rand_suffix());
    logger::write_success_log(&success_log, &record).map_err(|err| FileRunError { err, media: Some(media.clone()) })?;
    logger::append_to_combined_log(&output_paths::combined_log_path(&config.output_dir), &success_log)
        .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;

    if config.move_raw_file {
        let archive_path = output_paths::raw_archive_path(&config.output_dir, &relative);
        if let Some(parent) = archive_path.parent() {
            std::fs::create_dir_all(parent).map_err(CoreError::from).map_err(|err| FileRunError { err, media: Some(media.clone()) })?;
        }
        std::fs::rename(path, archive_path)
            .map_err(CoreError::from)
            .map_err(|err| FileRunError { err, media: Some(media.clone()) })?;
    }

    Ok(FileOutcome::Success(record))
}

fn append_skip_ledger(
    config: &PipelineConfig,
    path: &Path,
    reason: &SkipReason,
    skip_ledger: &Mutex<()>,
) -> CoreResult<()> {
    use std::io::Write;

    let _guard = skip_ledger.lock().unwrap();
    let ledger_path = output_paths::skip_ledger_path(&config.output_dir);
    if let Some(parent) = ledger_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(ledger_path)?;
    writeln!(file, "{}\t{}", path.display(), reason)?;
    Ok(())
}

fn notify_best_effort(notifier: &dyn Notifier, config: &PipelineConfig, message: &str) {
    if let Some(topic) = &config.ntfy_topic {
        if let Err(e) = notifier.send(topic, message, Some("drapto"), Some(3), Some("drapto")) {
            log::warn!("notification failed: {e}");
        }
    }
}

/// Shutdown housekeeping (spec 4.8): remove empty directories left behind in
/// the input tree, and move the `_raw` archive to a completion root if no
/// errored files remain.
fn shutdown(config: &PipelineConfig, outcomes: &[FileOutcome]) -> CoreResult<()> {
    remove_empty_dirs(&config.input_dir)?;

    let any_errors = outcomes.iter().any(|o| matches!(o, FileOutcome::Errored { .. }));
    if !any_errors && config.move_raw_file {
        let raw_root = config.output_dir.join("_raw");
        if raw_root.exists() {
            let completed_root = config.output_dir.join("_raw_complete");
            std::fs::rename(&raw_root, &completed_root).ok();
        }
    }

    Ok(())
}

fn remove_empty_dirs(dir: &Path) -> CoreResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            remove_empty_dirs(&path)?;
            if std::fs::read_dir(&path)?.next().is_none() {
                std::fs::remove_dir(&path).ok();
            }
        }
    }
    Ok(())
}

fn date_stamp() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

fn rand_suffix() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..6).map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_empty_dirs_prunes_nested_empty_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        remove_empty_dirs(tmp.path()).unwrap();
        assert!(!tmp.path().join("a").exists());
    }

    #[test]
    fn remove_empty_dirs_keeps_directories_with_files() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("keep.mkv"), b"x").unwrap();
        remove_empty_dirs(tmp.path()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn route_to_oversize_moves_file_under_dedicated_bucket() {
        let tmp = TempDir::new().unwrap();
        let input_dir = tmp.path().join("in");
        std::fs::create_dir_all(&input_dir).unwrap();
        let input_path = input_dir.join("movie.mkv");
        std::fs::write(&input_path, b"fake media").unwrap();

        let mut config = PipelineConfig::default();
        config.input_dir = input_dir.clone();
        config.output_dir = tmp.path().join("out");

        let dest = route_to_oversize(&config, &input_path).unwrap();
        assert!(!input_path.exists());
        assert!(dest.exists());
        assert_eq!(dest, config.output_dir.join("oversize").join("movie.mkv"));
    }
}
