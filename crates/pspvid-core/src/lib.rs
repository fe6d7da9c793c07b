//! Pspvid Core - Crop geometry for a fixed-size preview canvas
//!
//! This crate provides the pure geometry and selection-state core of the
//! pspvid converter: fitting a video frame into the preview canvas,
//! computing an automatic crop for the target aspect ratio, translating
//! rectangles between original-pixel and canvas coordinates, and tracking
//! the crop selection for one loaded preview frame.
//!
//! Video decoding and transcoding live outside this crate; callers hand in
//! frame dimensions (and, for preview composition, raw RGB pixels) and get
//! back plain rectangles and transforms.

pub mod geometry;
pub mod preview;
pub mod session;

pub use geometry::{
    auto_crop, canvas_rect_from_original, fit, original_rect_from_canvas, GeometryError,
};
pub use preview::{compose_preview, Preview, PreviewError, VideoFrame};
pub use session::{CropSession, SessionError, SessionState};

/// Screen size of the target playback device, also used as the preview
/// canvas size.
pub const PSP_SCREEN: Dimensions = Dimensions {
    width: 480,
    height: 272,
};

/// Pixel size of a video frame or of the preview canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. Only meaningful for non-empty dimensions;
    /// the geometry entry points validate before calling this.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True if either extent is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How original-pixel coordinates map onto the preview canvas:
/// `canvas = original * scale + offset`.
///
/// Produced once per loaded preview frame by [`geometry::fit`]. The offset
/// is zero on the axis the image fills and centers the letterbox padding
/// on the other.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitTransform {
    /// Uniform scale factor, `min(canvas.w / orig.w, canvas.h / orig.h)`.
    pub scale: f64,
    /// Horizontal padding of the scaled image within the canvas.
    pub x_offset: u32,
    /// Vertical padding of the scaled image within the canvas.
    pub y_offset: u32,
}

/// Pointer position in canvas coordinates.
///
/// Signed because a drag may leave the canvas (and the visible image area)
/// before the button is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas coordinates, used for drag feedback
/// and overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CanvasRect {
    /// Normalize two drag corners into a rectangle: top-left at the
    /// componentwise minimum, extents from the absolute differences.
    pub fn from_corners(a: CanvasPoint, b: CanvasPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }
}

/// Crop rectangle in original video pixel coordinates.
///
/// A finalized crop satisfies `x + width <= original.width` and
/// `y + height <= original.height` with positive extents; the one
/// exception is a degenerate manual drag, which is stored but flagged
/// (see [`session::CropSession::end_drag`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if the rectangle has zero width or height and therefore cannot
    /// be transcoded.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height of the cropped region.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
