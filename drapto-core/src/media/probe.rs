// ============================================================================
// drapto-core/src/media/probe.rs
// ============================================================================
//
// PROBE COMPONENT (spec 4.1)
//
// Wraps the external media-inspection tool (the `ffprobe` crate) and
// normalizes its output into a `MediaInfo` snapshot: duration, container
// format, per-stream descriptors in original order, and content hashes
// computed in a single streaming pass over the file.
//
// AI-ASSISTANT-INFO: Probe component, builds MediaInfo from ffprobe output

use std::path::Path;

use ffprobe::{FfProbeError, Stream, ffprobe};

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::media::info::{MediaInfo, StreamInfo, StreamKind};
use crate::utils::hash_file;

/// Probes `path` and returns a normalized [`MediaInfo`].
///
/// Returns [`CoreError::NoDuration`] if neither the container format nor any
/// video stream carries a duration, per spec 4.1.
pub fn probe(path: &Path) -> CoreResult<MediaInfo> {
    let size_bytes = std::fs::metadata(path)?.len();
    let hashes = hash_file(path)?;

    let metadata = ffprobe(path).map_err(|err| map_ffprobe_error(err, "probe"))?;

    let format_duration = metadata.format.duration.as_deref().and_then(|d| d.parse::<f64>().ok());
    let container_bitrate_bps = metadata
        .format
        .bit_rate
        .as_deref()
        .and_then(|b| b.parse::<u64>().ok());
    let container_format = metadata.format.format_name.clone();
    let comment_tag = metadata
        .format
        .tags
        .as_ref()
        .and_then(|tags| tags.get("comment").cloned());

    let mut video_streams = Vec::new();
    let mut audio_streams = Vec::new();
    let mut subtitle_streams = Vec::new();

    for (index, stream) in metadata.streams.iter().enumerate() {
        let kind = match stream.codec_type.as_deref() {
            Some("video") => StreamKind::Video,
            Some("audio") => StreamKind::Audio,
            Some("subtitle") => StreamKind::Subtitle,
            _ => continue, // data/attachment/unknown streams are dropped (spec open question)
        };
        let info = to_stream_info(index, kind, stream);
        match kind {
            StreamKind::Video => video_streams.push(info),
            StreamKind::Audio => audio_streams.push(info),
            StreamKind::Subtitle => subtitle_streams.push(info),
        }
    }

    let stream_duration = metadata
        .streams
        .iter()
        .filter(|s| s.codec_type.as_deref() == Some("video"))
        .filter_map(|s| s.duration.as_deref())
        .filter_map(|d| d.parse::<f64>().ok())
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a: f64| a.max(d))));

    let duration_seconds = format_duration.or(stream_duration);

    if !video_streams.is_empty() && duration_seconds.is_none() {
        return Err(CoreError::NoDuration(path.to_path_buf()));
    }

    Ok(MediaInfo {
        path: path.to_path_buf(),
        size_bytes,
        md5: hashes.md5,
        sha256: hashes.sha256,
        duration_seconds,
        container_format,
        container_bitrate_bps,
        comment_tag,
        video_streams,
        audio_streams,
        subtitle_streams,
    })
}

fn to_stream_info(index: usize, kind: StreamKind, stream: &Stream) -> StreamInfo {
    let language = stream
        .tags
        .as_ref()
        .and_then(|tags| tags.get("language").cloned())
        .map(|lang| lang.to_lowercase());

    let bit_rate_bps = stream.bit_rate.as_deref().and_then(|b| b.parse::<u64>().ok());
    let bps_eng_bit_rate = stream
        .tags
        .as_ref()
        .and_then(|tags| tags.get("BPS-eng").cloned())
        .and_then(|b| b.parse::<u64>().ok());

    let avg_frame_rate = parse_frame_rate(&stream.avg_frame_rate);

    StreamInfo {
        index,
        kind,
        codec_name: stream.codec_name.clone().unwrap_or_default(),
        language,
        channels: stream.channels.and_then(|c| u32::try_from(c).ok()),
        sample_rate_hz: stream
            .sample_rate
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok()),
        bit_rate_bps,
        bps_eng_bit_rate,
        avg_frame_rate,
        width: stream.width.and_then(|w| u32::try_from(w).ok()),
        height: stream.height.and_then(|h| u32::try_from(h).ok()),
    }
}

/// Parses an ffprobe rational frame rate such as `"30000/1001"` into an f64.
fn parse_frame_rate(raw: &str) -> Option<f64> {
    let (num, den) = raw.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 { None } else { Some(num / den) }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::JsonParseError(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("unknown ffprobe error during {context}: {err:?}")),
    }
}
