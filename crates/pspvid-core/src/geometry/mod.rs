//! Crop geometry: letterbox fit, automatic crop, coordinate mapping.
//!
//! Everything in this module is a pure function of its inputs.
//!
//! # Coordinate System
//!
//! - **Original pixel coordinates**: the source video's decoded frame,
//!   origin top-left.
//! - **Canvas coordinates**: the fixed-size preview surface. The scaled
//!   image is centered, so one axis may carry letterbox padding.
//! - A [`FitTransform`](crate::FitTransform) maps original to canvas
//!   coordinates via `canvas = original * scale + offset`.

mod auto_crop;
mod fit;
mod mapping;

pub use auto_crop::auto_crop;
pub use fit::fit;
pub use mapping::{canvas_rect_from_original, original_rect_from_canvas};

use thiserror::Error;

/// Error types for geometry computations.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A zero width or height was supplied.
    #[error("Dimensions must have positive width and height")]
    InvalidDimensions,

    /// The target aspect ratio is zero, negative, or not finite.
    #[error("Target aspect ratio must be positive, got {0}")]
    InvalidAspect(f64),
}
