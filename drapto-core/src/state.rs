// ============================================================================
// drapto-core/src/state.rs
// ============================================================================
//
// ENCODE STATE SIDECAR (spec 3, 4.4)
//
// A small durable record of PreEncoder's in-flight decisions, written next
// to the eventual output path (see `output_paths::state_sidecar_path`) so a
// crashed or restarted run can resume `Planned` without re-running CRF
// search. Matching `plan_fingerprint` jumps straight to `Planned`; a
// mismatch discards the stored state and starts over.
//
// Grounded on the teacher's general `serde`/`serde_json` small-struct-to-file
// idiom (see `notifications.rs`'s use of serde for ntfy payloads).
//
// AI-ASSISTANT-INFO: EncodeState persistence, spec section 3 / 4.4

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Durable per-file scratch record (spec 3).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncodeState {
    /// Hash of the decided plan's salient fields; a mismatch invalidates this state.
    pub plan_fingerprint: String,
    pub encoder: String,
    pub crf: u32,
    pub attempt_count: u32,
    pub last_error_kind: Option<String>,
}

impl EncodeState {
    pub fn fresh(encoder: &str, crf: u32, plan_fingerprint: String) -> Self {
        Self {
            plan_fingerprint,
            encoder: encoder.to_string(),
            crf,
            attempt_count: 0,
            last_error_kind: None,
        }
    }

    /// Reads and parses a sidecar file, returning `Ok(None)` if it doesn't exist.
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the sidecar file atomically via a temp-file-then-rename.
    pub fn persist(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Whether this stored state still applies to a freshly-derived plan fingerprint.
    pub fn matches(&self, plan_fingerprint: &str) -> bool {
        self.plan_fingerprint == plan_fingerprint
    }
}

/// Computes a stable fingerprint over the input's content hash plus the
/// salient decided-plan fields, used to validate a resumed `EncodeState`
/// sidecar (spec 3: "stable hash over MediaInfo.md5 + relevant plan fields").
pub fn fingerprint(media_md5: &str, encoder: &str, crf: u32, output_container: &str) -> String {
    crate::utils::hash_bytes(format!("{media_md5}:{encoder}:{crf}:{output_container}").as_bytes())
}
