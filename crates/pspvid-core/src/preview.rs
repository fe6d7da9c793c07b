//! Letterboxed preview composition.
//!
//! Scales a decoded frame down (or up) to the preview canvas and pastes it
//! centered on a black background, returning the composed image together
//! with the fit transform the crop session needs. Decoding the frame in
//! the first place is the video backend's job; this module only takes raw
//! RGB pixels.

use thiserror::Error;

use crate::geometry::{fit, GeometryError};
use crate::{Dimensions, FitTransform};

/// Error types for preview composition.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PreviewError {
    /// The frame's pixel buffer does not match its dimensions.
    #[error("Frame pixel buffer does not match its dimensions")]
    MalformedFrame,

    /// The frame or canvas dimensions were rejected.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A decoded video frame with RGB pixel data.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl VideoFrame {
    /// Create a new VideoFrame with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Create a VideoFrame from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// A composed preview ready for the rendering layer.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Canvas-sized frame: the scaled image centered on black padding.
    pub image: VideoFrame,
    /// Size of the visible image area inside the canvas.
    pub scaled: Dimensions,
    /// Transform mapping original coordinates onto this canvas.
    pub transform: FitTransform,
}

/// Compose the letterboxed preview of a frame on a canvas of the given
/// size.
///
/// The frame is resized with Lanczos3 (preview quality matters more than
/// speed here; frames arrive rarely) and pasted centered on a black
/// background.
///
/// # Errors
///
/// Returns `PreviewError::Geometry` for empty frame or canvas dimensions
/// and `PreviewError::MalformedFrame` when the pixel buffer length does
/// not match the frame's stated size.
pub fn compose_preview(frame: &VideoFrame, canvas: Dimensions) -> Result<Preview, PreviewError> {
    let (scaled, transform) = fit(frame.dimensions(), canvas)?;

    let rgb = frame.to_rgb_image().ok_or(PreviewError::MalformedFrame)?;
    let resized = image::imageops::resize(
        &rgb,
        scaled.width,
        scaled.height,
        image::imageops::FilterType::Lanczos3,
    );

    // RgbImage::new zero-fills, which is exactly the black letterbox.
    let mut background = image::RgbImage::new(canvas.width, canvas.height);
    image::imageops::overlay(
        &mut background,
        &resized,
        transform.x_offset as i64,
        transform.y_offset as i64,
    );

    Ok(Preview {
        image: VideoFrame::from_rgb_image(background),
        scaled,
        transform,
    })
}
