// ============================================================================
// drapto-core/src/pre_encode/skip.rs
// ============================================================================
//
// PREENCODER SKIP RULES (spec 4.3)
//
// Evaluated in order, first match wins: already-encoded comment-tag sentinel,
// filename oversize marker (automatic mode only), bitrate below floor,
// container in blacklist. `no_streams` is deliberately NOT a skip -- the
// caller turns a video-less `MediaInfo` into `CoreError::NoStreamsFound`
// instead, since spec 4.3 classifies it as a quarantine-bound error, not a
// soft skip.
//
// AI-ASSISTANT-INFO: skip rule evaluation, spec section 4.3

use crate::config::PipelineConfig;
use crate::error::SkipReason;
use crate::media::MediaInfo;

/// Evaluates the skip rules against one probed file; `None` means proceed to CRF search.
pub fn evaluate(config: &PipelineConfig, media: &MediaInfo) -> Option<SkipReason> {
    if let Some(tag) = &media.comment_tag {
        if tag == &config.already_encoded_sentinel {
            return Some(SkipReason::AlreadyEncoded);
        }
    }

    let filename = media
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !config.manual_mode && config.has_oversize_marker(&filename) {
        return Some(SkipReason::AlreadyEncoded);
    }

    if let Some(bit_rate_bps) = media.container_bitrate_bps {
        if bit_rate_bps < config.bitrate_floor_bps {
            return Some(SkipReason::BitRateBelowThreshold {
                bit_rate_bps,
                floor_bps: config.bitrate_floor_bps,
            });
        }
    }

    if config.is_container_blacklisted(&media.container_format) {
        return Some(SkipReason::ContainerBlacklisted(media.container_format.clone()));
    }

    None
}
