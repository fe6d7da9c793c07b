//! Output profile for the target playback device.

use pspvid_core::{Dimensions, PSP_SCREEN};
use serde::{Deserialize, Serialize};

/// Which H.264 encoder ffmpeg should use.
///
/// The two backends produce the same output format; NVENC offloads the
/// encode to an NVIDIA GPU when one is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncoderBackend {
    /// Software x264 encoding; works everywhere.
    #[default]
    Software,
    /// NVIDIA hardware encoding.
    Nvenc,
}

impl EncoderBackend {
    /// The ffmpeg codec name for this backend.
    pub fn codec_name(self) -> &'static str {
        match self {
            EncoderBackend::Software => "libx264",
            EncoderBackend::Nvenc => "h264_nvenc",
        }
    }
}

/// Fixed output parameters for the transcode.
///
/// The default reproduces the PSP template: 480x272 at 30 fps, baseline
/// H.264 at 1500k, stereo AAC at 128k / 44.1 kHz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputProfile {
    /// Output frame size after crop and scale.
    pub size: Dimensions,
    /// Output frame rate.
    pub frame_rate: u32,
    /// Video bitrate in ffmpeg notation, e.g. "1500k".
    pub video_bitrate: String,
    /// H.264 profile name passed as `-profile:v`.
    pub h264_profile: String,
    /// H.264 level passed as `-level:v`.
    pub h264_level: String,
    /// Audio bitrate in ffmpeg notation, e.g. "128k".
    pub audio_bitrate: String,
    /// Audio channel count.
    pub audio_channels: u32,
    /// Audio sample rate in Hz.
    pub audio_sample_rate: u32,
    /// Encoder selection.
    pub backend: EncoderBackend,
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            size: PSP_SCREEN,
            frame_rate: 30,
            video_bitrate: "1500k".to_string(),
            h264_profile: "baseline".to_string(),
            h264_level: "3.0".to_string(),
            audio_bitrate: "128k".to_string(),
            audio_channels: 2,
            audio_sample_rate: 44100,
            backend: EncoderBackend::default(),
        }
    }
}

impl OutputProfile {
    /// The default profile with a specific encoder backend.
    pub fn with_backend(backend: EncoderBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    /// Width/height ratio of the output, the target for auto cropping.
    pub fn target_aspect(&self) -> f64 {
        self.size.aspect_ratio()
    }
}
