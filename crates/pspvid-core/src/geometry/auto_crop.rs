//! Automatic crop selection for a target aspect ratio.

use super::GeometryError;
use crate::{CropRect, Dimensions};

/// Compute the largest centered crop of `original` matching `target_aspect`.
///
/// Frames wider than the target keep their full height and crop the width;
/// frames equal to or taller than the target keep their full width and
/// crop the height (an exact aspect match degenerates to the full frame).
/// The cropped axis is truncated toward zero and centered, so the result
/// matches the target ratio to within one pixel of integer rounding. A
/// floor of one pixel keeps pathological aspect ratios from collapsing the
/// rectangle entirely.
///
/// # Arguments
///
/// * `original` - Source frame size in pixels
/// * `target_aspect` - Desired width/height ratio (e.g. `480.0 / 272.0`)
///
/// # Errors
///
/// Returns `GeometryError::InvalidDimensions` for empty dimensions and
/// `GeometryError::InvalidAspect` for a non-positive or non-finite ratio.
///
/// # Example
///
/// ```
/// use pspvid_core::{auto_crop, CropRect, Dimensions};
///
/// let rect = auto_crop(Dimensions::new(720, 1280), 480.0 / 272.0).unwrap();
/// assert_eq!(rect, CropRect::new(0, 436, 720, 408));
/// ```
pub fn auto_crop(original: Dimensions, target_aspect: f64) -> Result<CropRect, GeometryError> {
    if original.is_empty() {
        return Err(GeometryError::InvalidDimensions);
    }
    if !target_aspect.is_finite() || target_aspect <= 0.0 {
        return Err(GeometryError::InvalidAspect(target_aspect));
    }

    let rect = if original.aspect_ratio() > target_aspect {
        // Wider than the target: crop the width, keep the full height.
        let width = ((original.height as f64 * target_aspect) as u32).max(1);
        CropRect {
            x: (original.width - width) / 2,
            y: 0,
            width,
            height: original.height,
        }
    } else {
        // Equal or taller: crop the height, keep the full width.
        let height = ((original.width as f64 / target_aspect) as u32).max(1);
        CropRect {
            x: 0,
            y: (original.height - height) / 2,
            width: original.width,
            height,
        }
    };

    Ok(rect)
}
