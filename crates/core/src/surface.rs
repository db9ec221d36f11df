//! The drawing-surface abstraction sprites render through.
//!
//! A surface is stateful in the immediate-mode style: `stroke`, `fill` and
//! `stroke_weight` set the style used by every later shape until changed.
//! Coordinates are Cartesian with `+x` right and `+y` down; angle 0 lies
//! along `+x`.

use crate::argb::Argb;

/// An immediate-mode 2D drawing target.
///
/// The trait is object-safe so sprites can take `&mut dyn Surface` and be
/// drawn onto a recorder in tests and a rasterizer in the CLI.
pub trait Surface {
    /// Enables anti-aliased rendering for subsequent shapes.
    fn smooth(&mut self);

    /// Sets the outline width used by ellipses and the width of lines.
    fn stroke_weight(&mut self, weight: f32);

    /// Sets the outline and line color.
    fn stroke(&mut self, color: Argb);

    /// Sets the interior color of closed shapes.
    fn fill(&mut self, color: Argb);

    /// Draws an ellipse centred on `(cx, cy)` with the given diameters.
    fn ellipse(&mut self, cx: f32, cy: f32, width: f32, height: f32);

    /// Draws a straight segment from `(x1, y1)` to `(x2, y2)`.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
}

/// Linear interpolation: `start + (stop - start) * amt`.
pub fn lerp(start: f32, stop: f32, amt: f32) -> f32 {
    start + (stop - start) * amt
}
