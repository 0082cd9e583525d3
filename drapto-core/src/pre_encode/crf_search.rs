// ============================================================================
// drapto-core/src/pre_encode/crf_search.rs
// ============================================================================
//
// CRF SEARCH (spec 4.3, 5)
//
// Tries each candidate encoder in `config.encoder_priority` order, invoking
// the external CRF-search helper and tracking the candidate with the lowest
// `encoded_percent`. A result outside documented bounds (`crf > 63` or
// `encoded_percent > max_encoded_percent`) is treated as a failed candidate,
// same as a helper error. If every candidate errors or is out of bounds,
// falls back to the manual CRF on the first candidate when `manual_mode` is
// set; otherwise the search is exhausted.
//
// AI-ASSISTANT-INFO: CRF search loop, spec section 4.3

use std::path::Path;

use crate::config::PipelineConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::CrfSearchHelper;

/// CRF the manual fallback uses when no encoder's search succeeds and
/// `manual_mode` permits a fallback rather than failing outright.
const MANUAL_CRF: u32 = 27;

/// The winning encoder/CRF choice from a search, plus the estimated ratio.
#[derive(Debug, Clone)]
pub struct CrfChoice {
    pub encoder: String,
    pub crf: u32,
    pub estimated_size_ratio: f64,
}

/// Runs CRF search across `config.encoder_priority`, returning the best
/// (lowest `encoded_percent`) result, or `CrfSearchExhausted` if every
/// candidate errors and no manual fallback applies.
pub fn search(
    helper: &dyn CrfSearchHelper,
    config: &PipelineConfig,
    input: &Path,
) -> CoreResult<CrfChoice> {
    let mut best: Option<CrfChoice> = None;

    for encoder in &config.encoder_priority {
        match helper.search(
            input,
            encoder,
            config.sample_every_secs,
            config.max_encoded_percent,
            config.target_vmaf,
        ) {
            Ok(result) if result.crf > 63 || result.encoded_percent > config.max_encoded_percent as f64 => {
                continue;
            }
            Ok(result) => {
                let ratio = result.encoded_percent / 100.0;
                let candidate = CrfChoice {
                    encoder: encoder.clone(),
                    crf: result.crf,
                    estimated_size_ratio: ratio,
                };
                let is_better = match &best {
                    None => true,
                    Some(current) => candidate.estimated_size_ratio < current.estimated_size_ratio,
                };
                if is_better {
                    best = Some(candidate);
                }
            }
            Err(_) => continue,
        }
    }

    if let Some(choice) = best {
        return Ok(choice);
    }

    if config.manual_mode {
        if let Some(encoder) = config.encoder_priority.first() {
            return Ok(CrfChoice {
                encoder: encoder.clone(),
                crf: MANUAL_CRF,
                estimated_size_ratio: 1.0,
            });
        }
    }

    Err(CoreError::CrfSearchExhausted(input.to_path_buf()))
}
