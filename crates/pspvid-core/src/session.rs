//! Crop selection state for one loaded preview frame.
//!
//! A [`CropSession`] moves between three states:
//!
//! - `Idle` - no frame loaded yet
//! - `FrameLoaded` - a frame and its fit transform are known
//! - `Dragging` - a manual crop gesture is in flight
//!
//! Loading a new preview frame always resets the session: the fit
//! transform is recomputed and any previous selection is discarded.
//! Manual drags arrive in canvas coordinates and are converted into
//! original pixel coordinates when the gesture ends, so auto and manual
//! crops share one coordinate space.
//!
//! All methods are synchronous and must be called from a single logical
//! thread (the caller's event dispatch); the session does no locking.

use thiserror::Error;

use crate::geometry::{self, GeometryError};
use crate::{CanvasPoint, CanvasRect, CropRect, Dimensions, FitTransform};

/// Error types for crop session operations.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SessionError {
    /// An operation that needs a loaded frame was called in the idle state.
    #[error("No preview frame has been loaded")]
    NoFrameLoaded,

    /// A drag update or release arrived without a preceding press.
    #[error("No drag gesture is in progress")]
    NoDragInProgress,

    /// A crop was requested before any selection was made.
    #[error("No crop region has been selected")]
    NoCropSelected,

    /// The finalized selection has zero width or height.
    #[error("Selected crop region has zero width or height")]
    DegenerateCrop,

    /// The underlying geometry computation rejected its inputs.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Observable state of a [`CropSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    FrameLoaded,
    Dragging,
}

/// Tracks the crop selection for the currently loaded preview frame.
///
/// One session serves one preview; independent previews get independent
/// sessions and need no coordination.
#[derive(Debug, Default)]
pub struct CropSession {
    frame: Option<Frame>,
}

#[derive(Debug)]
struct Frame {
    original: Dimensions,
    transform: FitTransform,
    current: Option<CropRect>,
    drag: Option<Drag>,
}

#[derive(Debug)]
struct Drag {
    anchor: CanvasPoint,
    provisional: CanvasRect,
}

impl CropSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match &self.frame {
            None => SessionState::Idle,
            Some(frame) if frame.drag.is_some() => SessionState::Dragging,
            Some(_) => SessionState::FrameLoaded,
        }
    }

    /// Fit transform for the loaded frame, if any.
    pub fn transform(&self) -> Option<FitTransform> {
        self.frame.as_ref().map(|frame| frame.transform)
    }

    /// Dimensions of the loaded frame, if any.
    pub fn original(&self) -> Option<Dimensions> {
        self.frame.as_ref().map(|frame| frame.original)
    }

    /// Canvas rectangle of the drag in flight, for overlay drawing.
    pub fn provisional_rect(&self) -> Option<CanvasRect> {
        self.frame
            .as_ref()
            .and_then(|frame| frame.drag.as_ref())
            .map(|drag| drag.provisional)
    }

    /// Load a new preview frame, computing its fit transform.
    ///
    /// Valid from any state. Discards any previous selection or drag in
    /// flight: a crop selected on the old frame has no meaning under the
    /// new transform.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if either size has a
    /// zero extent; the session state is left untouched in that case.
    pub fn load_frame(
        &mut self,
        original: Dimensions,
        canvas: Dimensions,
    ) -> Result<FitTransform, GeometryError> {
        let (_, transform) = geometry::fit(original, canvas)?;
        self.frame = Some(Frame {
            original,
            transform,
            current: None,
            drag: None,
        });
        Ok(transform)
    }

    /// Select the largest centered crop matching `target_aspect`, in
    /// original pixel coordinates.
    ///
    /// Replaces any previous selection and cancels a drag in flight.
    ///
    /// # Errors
    ///
    /// `NoFrameLoaded` in the idle state; geometry errors for an invalid
    /// aspect ratio.
    pub fn auto_crop(&mut self, target_aspect: f64) -> Result<CropRect, SessionError> {
        let frame = self.frame.as_mut().ok_or(SessionError::NoFrameLoaded)?;
        let rect = geometry::auto_crop(frame.original, target_aspect)?;
        frame.drag = None;
        frame.current = Some(rect);
        Ok(rect)
    }

    /// Start a manual crop gesture at `point`.
    ///
    /// Returns the zero-size provisional rectangle for immediate overlay
    /// feedback. A press while another gesture is in flight re-anchors:
    /// the new press supersedes a gesture whose release was never seen.
    ///
    /// # Errors
    ///
    /// `NoFrameLoaded` in the idle state.
    pub fn begin_drag(&mut self, point: CanvasPoint) -> Result<CanvasRect, SessionError> {
        let frame = self.frame.as_mut().ok_or(SessionError::NoFrameLoaded)?;
        let provisional = CanvasRect::from_corners(point, point);
        frame.drag = Some(Drag {
            anchor: point,
            provisional,
        });
        Ok(provisional)
    }

    /// Extend the gesture to `point`, returning the normalized provisional
    /// rectangle in canvas coordinates.
    ///
    /// Feedback only; the stored crop is not touched until the gesture
    /// ends.
    ///
    /// # Errors
    ///
    /// `NoFrameLoaded` in the idle state, `NoDragInProgress` without a
    /// preceding [`begin_drag`](Self::begin_drag).
    pub fn update_drag(&mut self, point: CanvasPoint) -> Result<CanvasRect, SessionError> {
        let frame = self.frame.as_mut().ok_or(SessionError::NoFrameLoaded)?;
        let drag = frame.drag.as_mut().ok_or(SessionError::NoDragInProgress)?;
        drag.provisional = CanvasRect::from_corners(drag.anchor, point);
        Ok(drag.provisional)
    }

    /// Finish the gesture at `point` and store the selection.
    ///
    /// The anchor-to-point rectangle is normalized, converted into
    /// original pixel coordinates through the inverse fit transform, and
    /// clamped to the frame. The converted rectangle is stored even when
    /// it is degenerate, but a zero-width or zero-height result is
    /// reported as `DegenerateCrop` so the caller can re-prompt before
    /// transcoding.
    ///
    /// # Errors
    ///
    /// `NoFrameLoaded`, `NoDragInProgress`, or `DegenerateCrop` as above.
    pub fn end_drag(&mut self, point: CanvasPoint) -> Result<CropRect, SessionError> {
        let frame = self.frame.as_mut().ok_or(SessionError::NoFrameLoaded)?;
        let drag = frame.drag.take().ok_or(SessionError::NoDragInProgress)?;
        let canvas_rect = CanvasRect::from_corners(drag.anchor, point);
        let rect = geometry::original_rect_from_canvas(canvas_rect, frame.transform, frame.original);
        frame.current = Some(rect);
        if rect.is_degenerate() {
            return Err(SessionError::DegenerateCrop);
        }
        Ok(rect)
    }

    /// The current crop selection in original pixel coordinates.
    ///
    /// # Errors
    ///
    /// `NoCropSelected` until an auto crop or a finished drag has set one.
    pub fn current_crop(&self) -> Result<CropRect, SessionError> {
        self.frame
            .as_ref()
            .and_then(|frame| frame.current)
            .ok_or(SessionError::NoCropSelected)
    }
}
