// ============================================================================
// drapto-core/src/output_paths.rs
// ============================================================================
//
// OUTPUT PATHS COMPONENT (spec 4.8, 6)
//
// Pure functions mapping an input path, chosen encoder, and output container
// to the persisted layout under a run's output directory:
//
//   <output_dir>/<encoder>_encoded/<mirror>.<ext>      -- encoded output
//   <output_dir>/<encoder>_encoded/<mirror>.state.json -- EncodeState sidecar
//   <output_dir>/<encoder>_encoded/<mirror>.cmd.txt    -- recorded invocation
//   <output_dir>/<encoder>_encoded/<mirror>.log_<ts>_<rand>.yaml -- success log
//   <output_dir>/_raw/<mirror>.<original ext>          -- archived original
//   <output_dir>/encode_error/<kind>/<mirror>.<ext>    -- quarantined input
//   <output_dir>/oversize/<mirror>.<ext>               -- oversize-exhausted input
//   <output_dir>/skipped.txt                           -- append-only skip ledger
//   <output_dir>/combined_log.yaml                     -- end-of-run combined log
//
// Grounded on `reference/drapto-cli/src/output_path.rs::resolve_output_path`,
// generalized from a single CLI-facing output path into the whole persisted
// tree the WorkerPool and ErrorRouter write to.
//
// AI-ASSISTANT-INFO: OutputPaths component, pure path-mapping functions

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// The relative path of `input_path` with respect to `input_dir`, used as
/// the "mirror" segment reproduced under every output subtree.
pub fn mirror_relative_path(input_dir: &Path, input_path: &Path) -> CoreResult<PathBuf> {
    input_path
        .strip_prefix(input_dir)
        .map(Path::to_path_buf)
        .map_err(|_| {
            CoreError::PathError(format!(
                "{} is not under input directory {}",
                input_path.display(),
                input_dir.display()
            ))
        })
}

fn with_extension(relative: &Path, ext: &str) -> PathBuf {
    relative.with_extension(ext)
}

/// Directory holding all encoded output for one encoder name.
pub fn encoded_root(output_dir: &Path, encoder_name: &str) -> PathBuf {
    output_dir.join(format!("{encoder_name}_encoded"))
}

/// Final encoded media file path.
pub fn encoded_output_path(
    output_dir: &Path,
    encoder_name: &str,
    relative: &Path,
    container_ext: &str,
) -> PathBuf {
    encoded_root(output_dir, encoder_name).join(with_extension(relative, container_ext))
}

/// `EncodeState` sidecar path alongside the encoded output, spec 4.4.
pub fn state_sidecar_path(encoded_output: &Path) -> PathBuf {
    append_suffix(encoded_output, "state.json")
}

/// Recorded transcoder invocation, for auditing / reproduction.
pub fn command_record_path(encoded_output: &Path) -> PathBuf {
    append_suffix(encoded_output, "cmd.txt")
}

/// Per-file success-log path with a date + random-suffix filename (spec 4.7).
pub fn success_log_path(encoded_output: &Path, date_stamp: &str, rand_suffix: &str) -> PathBuf {
    append_suffix(encoded_output, &format!("log_{date_stamp}_{rand_suffix}.yaml"))
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Archive location for the original input file when `move_raw_file` is set.
pub fn raw_archive_path(output_dir: &Path, relative: &Path) -> PathBuf {
    output_dir.join("_raw").join(relative)
}

/// Quarantine location under `encode_error/<kind>/...` (spec 4.6).
pub fn quarantine_path(output_dir: &Path, error_kind: &str, relative: &Path) -> PathBuf {
    output_dir.join("encode_error").join(error_kind).join(relative)
}

/// Oversize-bucket location under `oversize/...`, distinct from the
/// `encode_error` quarantine tree (spec 4.5/4.6).
pub fn oversize_path(output_dir: &Path, relative: &Path) -> PathBuf {
    output_dir.join("oversize").join(relative)
}

/// Diagnostic file written next to a quarantined input (command/exit code/tails).
pub fn quarantine_error_report_path(quarantined_input: &Path) -> PathBuf {
    quarantined_input.with_file_name(format!(
        "{}.error.txt",
        quarantined_input.file_name().and_then(|n| n.to_str()).unwrap_or("input")
    ))
}

/// Diagnostic MediaInfo snapshot written next to a quarantined input.
pub fn quarantine_probe_path(quarantined_input: &Path) -> PathBuf {
    quarantined_input.with_file_name(format!(
        "{}.probe.json",
        quarantined_input.file_name().and_then(|n| n.to_str()).unwrap_or("input")
    ))
}

/// Append-only skip ledger path.
pub fn skip_ledger_path(output_dir: &Path) -> PathBuf {
    output_dir.join("skipped.txt")
}

/// End-of-run combined log path.
pub fn combined_log_path(output_dir: &Path) -> PathBuf {
    output_dir.join("combined_log.yaml")
}
