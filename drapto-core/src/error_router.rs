// ============================================================================
// drapto-core/src/error_router.rs
// ============================================================================
//
// ERROR ROUTER COMPONENT (spec 4.6)
//
// Quarantines a failed input under `encode_error/<ErrorKind>/<mirror>/...`,
// writing a diagnostic report and, when available, a probe snapshot
// alongside it, then frees the original input path. Soft skips never reach
// this component (they resolve locally to the skip ledger in worker_pool.rs).
//
// AI-ASSISTANT-INFO: ErrorRouter quarantine tree, spec section 4.6

use std::path::{Path, PathBuf};

use crate::error::{error_kind_label, CoreError, CoreResult};
use crate::media::MediaInfo;
use crate::output_paths;

/// Result of routing one failed file: where it ended up.
#[derive(Debug)]
pub struct QuarantineRecord {
    pub quarantined_path: PathBuf,
    pub error_kind: &'static str,
}

/// Moves `input_path` into the quarantine tree under `output_dir`, writing a
/// diagnostic report (`error.txt`) and, if `media` is available, a probe
/// snapshot (`probe.json`) beside it.
pub fn quarantine(
    output_dir: &Path,
    input_dir: &Path,
    input_path: &Path,
    err: &CoreError,
    media: Option<&MediaInfo>,
) -> CoreResult<QuarantineRecord> {
    let relative = output_paths::mirror_relative_path(input_dir, input_path)?;
    let error_kind = error_kind_label(err);
    let quarantined_path = output_paths::quarantine_path(output_dir, error_kind, &relative);

    if let Some(parent) = quarantined_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(input_path, &quarantined_path)?;

    let report_path = output_paths::quarantine_error_report_path(&quarantined_path);
    std::fs::write(&report_path, build_error_report(input_path, err))?;

    if let Some(media) = media {
        let probe_path = output_paths::quarantine_probe_path(&quarantined_path);
        let json = serde_json::to_string_pretty(&MediaInfoSnapshot::from(media))?;
        std::fs::write(&probe_path, json)?;
    }

    Ok(QuarantineRecord { quarantined_path, error_kind })
}

fn build_error_report(input_path: &Path, err: &CoreError) -> String {
    format!(
        "input: {}\nerror_kind: {}\nmessage: {}\n",
        input_path.display(),
        error_kind_label(err),
        err,
    )
}

/// A serializable subset of `MediaInfo` for the quarantine's `probe.json`.
#[derive(serde::Serialize)]
struct MediaInfoSnapshot {
    path: PathBuf,
    size_bytes: u64,
    md5: String,
    sha256: String,
    duration_seconds: Option<f64>,
    container_format: String,
    video_stream_count: usize,
    audio_stream_count: usize,
    subtitle_stream_count: usize,
}

impl From<&MediaInfo> for MediaInfoSnapshot {
    fn from(media: &MediaInfo) -> Self {
        Self {
            path: media.path.clone(),
            size_bytes: media.size_bytes,
            md5: media.md5.clone(),
            sha256: media.sha256.clone(),
            duration_seconds: media.duration_seconds,
            container_format: media.container_format.clone(),
            video_stream_count: media.video_streams.len(),
            audio_stream_count: media.audio_streams.len(),
            subtitle_stream_count: media.subtitle_streams.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn quarantine_moves_file_and_writes_report() {
        let tmp = TempDir::new().unwrap();
        let input_dir = tmp.path().join("in");
        std::fs::create_dir_all(&input_dir).unwrap();
        let input_path = input_dir.join("movie.mkv");
        std::fs::write(&input_path, b"fake media").unwrap();
        let output_dir = tmp.path().join("out");

        let err = CoreError::NoDuration(input_path.clone());
        let record = quarantine(&output_dir, &input_dir, &input_path, &err, None).unwrap();

        assert!(!input_path.exists());
        assert!(record.quarantined_path.exists());
        assert_eq!(record.error_kind, "no_duration");
        let report_path = output_paths::quarantine_error_report_path(&record.quarantined_path);
        assert!(report_path.exists());
    }
}
