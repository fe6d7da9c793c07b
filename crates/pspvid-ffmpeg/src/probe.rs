//! Source metadata via ffprobe, and preview frame selection.

use std::path::Path;
use std::process::Command;

use pspvid_core::Dimensions;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Error types for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// ffprobe could not be started (usually: not installed or not on PATH).
    #[error("Failed to run ffprobe: {0}")]
    Spawn(#[from] std::io::Error),

    /// ffprobe ran but reported failure, e.g. an unreadable file.
    #[error("ffprobe exited with status {0}")]
    Failed(std::process::ExitStatus),

    /// The ffprobe output was not the expected JSON.
    #[error("Failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file has no video stream with usable dimensions.
    #[error("No video stream found")]
    NoVideoStream,

    /// The video stream reports no frames to preview.
    #[error("Video contains no frames")]
    EmptyVideo,
}

/// Source video metadata needed to drive the preview and the crop math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    /// Frame size in pixels; the "original" space of all crop rectangles.
    pub dimensions: Dimensions,
    /// Total frame count, for preview frame selection.
    pub frame_count: u64,
    /// Average frame rate in frames per second.
    pub frame_rate: f64,
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

/// ffprobe reports most numbers as JSON strings, frame rates as "num/den"
/// rationals.
#[derive(Deserialize)]
struct ProbeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    nb_frames: Option<String>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
}

/// Probe a video file with ffprobe.
///
/// # Errors
///
/// `Spawn`/`Failed` for process problems, `Parse` for unexpected output,
/// `NoVideoStream` when no stream carries pixel dimensions, `EmptyVideo`
/// when the frame count is zero or cannot be determined.
pub fn probe(path: &Path) -> Result<VideoInfo, ProbeError> {
    debug!(path = %path.display(), "probing video");

    let output = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()?;
    if !output.status.success() {
        return Err(ProbeError::Failed(output.status));
    }

    parse_probe_output(&output.stdout)
}

/// Pick a uniformly random frame index for the preview.
///
/// Returns `None` when the video reports no frames.
pub fn random_frame_index(frame_count: u64) -> Option<u64> {
    if frame_count == 0 {
        return None;
    }
    Some(rand::thread_rng().gen_range(0..frame_count))
}

fn parse_probe_output(bytes: &[u8]) -> Result<VideoInfo, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(bytes)?;

    let stream = parsed
        .streams
        .iter()
        .find(|stream| stream.codec_type == "video")
        .ok_or(ProbeError::NoVideoStream)?;

    let dimensions = match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Dimensions::new(width, height),
        _ => return Err(ProbeError::NoVideoStream),
    };

    let frame_rate = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rational)
        .unwrap_or(0.0);

    // Containers like MKV often omit nb_frames; fall back to an estimate
    // from the stream duration.
    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .or_else(|| estimate_frame_count(stream.duration.as_deref(), frame_rate))
        .unwrap_or(0);
    if frame_count == 0 {
        return Err(ProbeError::EmptyVideo);
    }

    Ok(VideoInfo {
        dimensions,
        frame_count,
        frame_rate,
    })
}

fn estimate_frame_count(duration: Option<&str>, frame_rate: f64) -> Option<u64> {
    let seconds: f64 = duration?.parse().ok()?;
    if seconds <= 0.0 || frame_rate <= 0.0 {
        return None;
    }
    Some((seconds * frame_rate).round() as u64)
}

/// Parse an ffprobe "num/den" rational, e.g. "30000/1001".
fn parse_rational(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_STREAMS: &str = r#"{
        "streams": [
            {
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "avg_frame_rate": "30000/1001",
                "nb_frames": "3600",
                "duration": "120.12"
            },
            {
                "codec_type": "audio",
                "avg_frame_rate": "0/0",
                "duration": "120.12"
            }
        ]
    }"#;

    #[test]
    fn test_parse_clean_probe_output() {
        let info = parse_probe_output(CLEAN_STREAMS.as_bytes()).unwrap();

        assert_eq!(info.dimensions, Dimensions::new(1920, 1080));
        assert_eq!(info.frame_count, 3600);
        assert!((info.frame_rate - 30000.0 / 1001.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_skips_non_video_streams() {
        // Audio stream listed first; the video stream must still win.
        let json = r#"{
            "streams": [
                {"codec_type": "audio"},
                {"codec_type": "video", "width": 720, "height": 576,
                 "avg_frame_rate": "25/1", "nb_frames": "250"}
            ]
        }"#;
        let info = parse_probe_output(json.as_bytes()).unwrap();

        assert_eq!(info.dimensions, Dimensions::new(720, 576));
        assert_eq!(info.frame_rate, 25.0);
    }

    #[test]
    fn test_parse_estimates_missing_frame_count() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "width": 1280, "height": 720,
                 "avg_frame_rate": "24/1", "duration": "10.0"}
            ]
        }"#;
        let info = parse_probe_output(json.as_bytes()).unwrap();

        assert_eq!(info.frame_count, 240);
    }

    #[test]
    fn test_parse_no_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(ProbeError::NoVideoStream)
        ));
    }

    #[test]
    fn test_parse_zero_dimensions_is_no_video_stream() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "width": 0, "height": 1080, "nb_frames": "100"}
            ]
        }"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(ProbeError::NoVideoStream)
        ));
    }

    #[test]
    fn test_parse_zero_frames_is_empty_video() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "width": 1920, "height": 1080, "nb_frames": "0"}
            ]
        }"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(ProbeError::EmptyVideo)
        ));
    }

    #[test]
    fn test_parse_garbage_is_a_parse_error() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProbeError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rational() {
        assert_eq!(parse_rational("30/1"), Some(30.0));
        assert_eq!(parse_rational("30000/1001"), Some(30000.0 / 1001.0));
        assert_eq!(parse_rational("0/0"), None);
        assert_eq!(parse_rational("30"), None);
        assert_eq!(parse_rational("a/b"), None);
    }

    #[test]
    fn test_random_frame_index_bounds() {
        assert_eq!(random_frame_index(0), None);
        assert_eq!(random_frame_index(1), Some(0));

        for _ in 0..100 {
            let index = random_frame_index(360).unwrap();
            assert!(index < 360);
        }
    }
}
