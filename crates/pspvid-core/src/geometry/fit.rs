//! Aspect-preserving fit of a frame into the preview canvas.

use super::GeometryError;
use crate::{Dimensions, FitTransform};

/// Fit a frame into the canvas, preserving its aspect ratio.
///
/// Computes the largest uniform scale at which the frame still fits
/// entirely within the canvas (this may upscale small frames). The axis
/// with the smaller canvas/original ratio lands exactly on its canvas
/// bound; the other is scaled by the same factor and truncated toward
/// zero. Offsets center the scaled image, using floor division, so the
/// letterbox padding is balanced to within one pixel.
///
/// # Arguments
///
/// * `original` - Frame size as reported by the decoder
/// * `canvas` - Preview canvas size (e.g. [`PSP_SCREEN`](crate::PSP_SCREEN))
///
/// # Returns
///
/// The scaled image size and the [`FitTransform`] mapping original
/// coordinates onto the canvas.
///
/// # Errors
///
/// Returns `GeometryError::InvalidDimensions` if either input has a zero
/// extent.
///
/// # Example
///
/// ```
/// use pspvid_core::{fit, Dimensions, PSP_SCREEN};
///
/// let (scaled, transform) = fit(Dimensions::new(1920, 1080), PSP_SCREEN).unwrap();
/// assert_eq!(scaled, Dimensions::new(480, 270));
/// assert_eq!(transform.scale, 0.25);
/// assert_eq!((transform.x_offset, transform.y_offset), (0, 1));
/// ```
pub fn fit(
    original: Dimensions,
    canvas: Dimensions,
) -> Result<(Dimensions, FitTransform), GeometryError> {
    if original.is_empty() || canvas.is_empty() {
        return Err(GeometryError::InvalidDimensions);
    }

    let sx = canvas.width as f64 / original.width as f64;
    let sy = canvas.height as f64 / original.height as f64;

    // The binding axis is assigned its canvas bound directly rather than
    // re-multiplied, so float truncation cannot shave a pixel off it.
    let (scale, scaled) = if sx <= sy {
        let height = ((original.height as f64 * sx) as u32).max(1);
        (sx, Dimensions::new(canvas.width, height))
    } else {
        let width = ((original.width as f64 * sy) as u32).max(1);
        (sy, Dimensions::new(width, canvas.height))
    };

    let transform = FitTransform {
        scale,
        x_offset: (canvas.width - scaled.width) / 2,
        y_offset: (canvas.height - scaled.height) / 2,
    };

    Ok((scaled, transform))
}
