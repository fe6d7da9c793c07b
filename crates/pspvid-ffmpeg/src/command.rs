//! Transcode command construction and invocation.

use std::path::PathBuf;
use std::process::Command;

use pspvid_core::CropRect;
use thiserror::Error;
use tracing::{debug, info};

use crate::OutputProfile;

/// Error types for transcode operations.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The crop rectangle has zero width or height.
    #[error("Crop region has zero area: {width}x{height}")]
    EmptyCrop { width: u32, height: u32 },

    /// ffmpeg could not be started (usually: not installed or not on PATH).
    #[error("Failed to run ffmpeg: {0}")]
    Spawn(#[from] std::io::Error),

    /// ffmpeg ran but reported failure.
    #[error("ffmpeg exited with status {0}")]
    Failed(std::process::ExitStatus),
}

/// One transcode invocation: where to read, where to write, what to crop,
/// and the output parameters.
///
/// The crop rectangle is in original video pixel coordinates, as produced
/// by the crop session.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub crop: CropRect,
    pub profile: OutputProfile,
}

/// The `-vf` filter chain: crop in source pixels, scale to the device
/// size, fix the frame rate.
pub fn filter_expr(crop: CropRect, profile: &OutputProfile) -> String {
    format!(
        "crop={}:{}:{}:{},scale={}:{},fps={}",
        crop.width,
        crop.height,
        crop.x,
        crop.y,
        profile.size.width,
        profile.size.height,
        profile.frame_rate
    )
}

/// Build the full ffmpeg argument vector for a job.
///
/// # Errors
///
/// Returns `TranscodeError::EmptyCrop` for a zero-area crop rectangle;
/// ffmpeg's crop filter rejects those at runtime with a far less useful
/// message.
pub fn build_args(job: &TranscodeJob) -> Result<Vec<String>, TranscodeError> {
    if job.crop.is_degenerate() {
        return Err(TranscodeError::EmptyCrop {
            width: job.crop.width,
            height: job.crop.height,
        });
    }

    let profile = &job.profile;
    Ok(vec![
        "-i".to_string(),
        job.input.display().to_string(),
        "-c:v".to_string(),
        profile.backend.codec_name().to_string(),
        "-profile:v".to_string(),
        profile.h264_profile.clone(),
        "-level:v".to_string(),
        profile.h264_level.clone(),
        "-b:v".to_string(),
        profile.video_bitrate.clone(),
        "-vf".to_string(),
        filter_expr(job.crop, profile),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        profile.audio_bitrate.clone(),
        "-ac".to_string(),
        profile.audio_channels.to_string(),
        "-ar".to_string(),
        profile.audio_sample_rate.to_string(),
        job.output.display().to_string(),
    ])
}

/// Run ffmpeg for a job, blocking until it exits.
///
/// No retry: a failed transcode is reported to the caller, who decides
/// whether to re-prompt.
///
/// # Errors
///
/// `EmptyCrop` before anything is spawned, `Spawn` if ffmpeg cannot be
/// started, `Failed` for a non-zero exit status.
pub fn run(job: &TranscodeJob) -> Result<(), TranscodeError> {
    let args = build_args(job)?;
    debug!(?args, "invoking ffmpeg");

    let status = Command::new("ffmpeg").args(&args).status()?;
    if !status.success() {
        return Err(TranscodeError::Failed(status));
    }

    info!(output = %job.output.display(), "transcode finished");
    Ok(())
}
