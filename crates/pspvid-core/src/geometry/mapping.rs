//! Rectangle mapping between original pixel and canvas coordinates.
//!
//! Rectangles are mapped edge-wise: both corners go through the affine
//! map and the extents are re-derived from the mapped edges. Mapping the
//! corners rather than the size keeps rectangles that share an edge
//! adjacent after conversion.

use crate::{CanvasRect, CropRect, Dimensions, FitTransform};

/// Map a crop rectangle from original coordinates onto the preview canvas,
/// rounding each edge to the nearest pixel.
pub fn canvas_rect_from_original(rect: CropRect, transform: FitTransform) -> CanvasRect {
    let x1 = to_canvas(rect.x, transform.scale, transform.x_offset);
    let y1 = to_canvas(rect.y, transform.scale, transform.y_offset);
    let x2 = to_canvas(rect.x + rect.width, transform.scale, transform.x_offset);
    let y2 = to_canvas(rect.y + rect.height, transform.scale, transform.y_offset);

    CanvasRect {
        x: x1 as i32,
        y: y1 as i32,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
    }
}

/// Map a canvas rectangle back into original coordinates.
///
/// Each edge is divided by the scale, rounded to the nearest pixel, and
/// clamped into `[0, original.width] x [0, original.height]`. Drag
/// gestures routinely reach into the letterbox padding or past the canvas
/// edge; those rectangles are clamped to the visible image, never
/// rejected. A rectangle entirely inside the padding clamps to zero area.
pub fn original_rect_from_canvas(
    rect: CanvasRect,
    transform: FitTransform,
    original: Dimensions,
) -> CropRect {
    let x1 = to_original(rect.x as i64, transform.scale, transform.x_offset, original.width);
    let y1 = to_original(rect.y as i64, transform.scale, transform.y_offset, original.height);
    let x2 = to_original(
        rect.x as i64 + rect.width as i64,
        transform.scale,
        transform.x_offset,
        original.width,
    );
    let y2 = to_original(
        rect.y as i64 + rect.height as i64,
        transform.scale,
        transform.y_offset,
        original.height,
    );

    CropRect {
        x: x1,
        y: y1,
        width: x2 - x1,
        height: y2 - y1,
    }
}

fn to_canvas(edge: u32, scale: f64, offset: u32) -> i64 {
    (edge as f64 * scale).round() as i64 + offset as i64
}

fn to_original(edge: i64, scale: f64, offset: u32, max: u32) -> u32 {
    let unpadded = edge - offset as i64;
    let raw = (unpadded as f64 / scale).round();
    raw.clamp(0.0, max as f64) as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::fit;
    use proptest::prelude::*;

    /// Original, canvas, and a crop rectangle inside the original.
    fn scene_strategy() -> impl Strategy<Value = (Dimensions, Dimensions, CropRect)> {
        ((64u32..=4096, 64u32..=4096), (32u32..=1024, 32u32..=1024))
            .prop_flat_map(|((ow, oh), (cw, ch))| {
                (
                    Just(Dimensions::new(ow, oh)),
                    Just(Dimensions::new(cw, ch)),
                    (0..ow, 0..oh),
                )
            })
            .prop_flat_map(|(original, canvas, (x, y))| {
                (
                    Just(original),
                    Just(canvas),
                    Just(x),
                    Just(y),
                    1..=original.width - x,
                    1..=original.height - y,
                )
            })
            .prop_map(|(original, canvas, x, y, w, h)| {
                (original, canvas, CropRect::new(x, y, w, h))
            })
    }

    /// Per-edge round-trip error bound: canvas rounding contributes half a
    /// pixel, amplified by 1/scale on inversion, plus the final rounding.
    fn edge_tolerance(scale: f64) -> i64 {
        (0.5 / scale + 0.5) as i64
    }

    proptest! {
        /// Property: original -> canvas -> original moves every edge by at
        /// most the scale-derived tolerance (+-1 for upscales).
        #[test]
        fn prop_round_trip_within_tolerance(
            (original, canvas, rect) in scene_strategy(),
        ) {
            let (_, t) = fit(original, canvas).unwrap();
            let mapped = canvas_rect_from_original(rect, t);
            let back = original_rect_from_canvas(mapped, t, original);

            let tol = edge_tolerance(t.scale);
            let edges = [
                (back.x as i64, rect.x as i64),
                (back.y as i64, rect.y as i64),
                ((back.x + back.width) as i64, (rect.x + rect.width) as i64),
                ((back.y + back.height) as i64, (rect.y + rect.height) as i64),
            ];
            for (got, want) in edges {
                prop_assert!(
                    (got - want).abs() <= tol,
                    "edge {} vs {} exceeds tolerance {} at scale {}",
                    got,
                    want,
                    tol,
                    t.scale
                );
            }
        }

        /// Property: the inverse always lands inside the original frame.
        #[test]
        fn prop_inverse_stays_in_bounds(
            (original, canvas, _) in scene_strategy(),
            x in -2000i32..2000,
            y in -2000i32..2000,
            w in 0u32..4000,
            h in 0u32..4000,
        ) {
            let (_, t) = fit(original, canvas).unwrap();
            let rect = original_rect_from_canvas(CanvasRect { x, y, width: w, height: h }, t, original);

            prop_assert!(rect.x + rect.width <= original.width);
            prop_assert!(rect.y + rect.height <= original.height);
        }

        /// Property: canvas -> original -> canvas is exact for downscale
        /// transforms when the rectangle lies on the visible image.
        #[test]
        fn prop_canvas_first_round_trip_exact_on_downscale(
            (ow, oh) in (1024u32..=4096, 1024u32..=4096),
            (x, y) in (0u32..400, 0u32..200),
            (w, h) in (1u32..=80, 1u32..=72),
        ) {
            let original = Dimensions::new(ow, oh);
            let (scaled, t) = fit(original, crate::PSP_SCREEN).unwrap();

            // Keep the rectangle on the scaled image area.
            let x = (x % scaled.width) as i32 + t.x_offset as i32;
            let y = (y % scaled.height) as i32 + t.y_offset as i32;
            let w = w.min(scaled.width.saturating_sub((x - t.x_offset as i32) as u32));
            let h = h.min(scaled.height.saturating_sub((y - t.y_offset as i32) as u32));
            let rect = CanvasRect { x, y, width: w, height: h };

            let back = canvas_rect_from_original(
                original_rect_from_canvas(rect, t, original),
                t,
            );
            prop_assert_eq!(back, rect);
        }
    }
}
