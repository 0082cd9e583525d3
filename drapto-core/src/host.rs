// ============================================================================
// drapto-core/src/host.rs
// ============================================================================
//
// HOST IDENTIFICATION
//
// A single place for the host identifier that gets stamped onto every
// SuccessRecord and notification. Pulled out of the inline `hostname::get()`
// call the pipeline used to make at the top of its per-file loop.
//
// AI-ASSISTANT-INFO: hostname crate wrapper

/// Returns a best-effort host identifier, falling back to `"unknown-host"`
/// if the hostname can't be determined or isn't valid UTF-8.
pub fn host_identifier() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown-host".to_string())
}
