// ============================================================================
// drapto-core/src/logger.rs
// ============================================================================
//
// LOGGER COMPONENT (spec 4.7)
//
// Writes one structured success document per encoded file (YAML, date +
// random-suffix filename per `output_paths::success_log_path`), and
// concatenates all of a run's per-file documents into
// `output_paths::combined_log_path` at shutdown.
//
// Grounded on the teacher's serde_yaml-free pattern of hand-built summaries
// plus `output_path.rs`'s path-construction style; `SuccessRecord` mirrors
// the fields spec 3 calls out (input identity, chosen encoder/CRF, estimated
// and realized size ratio, elapsed time, host identifier).
//
// AI-ASSISTANT-INFO: SuccessRecord + per-file/combined log writers, spec 4.7

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Structured record of one successful encode (spec 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessRecord {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoder: String,
    pub crf: u32,
    pub estimated_size_ratio: f64,
    pub realized_size_ratio: f64,
    pub input_size_bytes: u64,
    pub output_size_bytes: u64,
    pub elapsed_secs: f64,
    pub host: String,
}

/// Writes one success document next to the encoded output.
pub fn write_success_log(path: &Path, record: &SuccessRecord) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(record)
        .map_err(|e| crate::error::CoreError::OperationFailed(format!("failed to serialize success log: {e}")))?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Appends one file's success-log contents to the run's combined document.
pub fn append_to_combined_log(combined_log_path: &Path, per_file_log_path: &Path) -> CoreResult<()> {
    use std::io::Write;

    if let Some(parent) = combined_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = std::fs::read_to_string(per_file_log_path)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(combined_log_path)?;
    writeln!(file, "---")?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
