//! CPU rasterizer implementing [`Surface`] over an RGBA8 pixel buffer.
//!
//! Shapes are rasterized by evaluating a signed distance at each pixel
//! centre inside the shape's bounding box. Ellipse outlines are bands of
//! width `stroke_weight` centred on the edge. Lines are capsules (round
//! caps). After [`Surface::smooth`], coverage ramps over one pixel for
//! anti-aliased edges; before it, coverage is binary.
//!
//! Colors are composited source-over with straight (non-premultiplied)
//! alpha.

use citrus_core::argb::Argb;
use citrus_core::error::CitrusError;
use citrus_core::surface::Surface;
use tracing::trace;

/// An RGBA8 canvas that sprites draw onto.
///
/// Style defaults: black stroke, white fill, stroke weight 1, aliased.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    stroke: Argb,
    fill: Argb,
    stroke_weight: f32,
    smooth: bool,
}

impl Raster {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `CitrusError::InvalidDimensions` if width or height is zero,
    /// or if the byte length would overflow `usize`.
    pub fn new(width: usize, height: usize, background: Argb) -> Result<Self, CitrusError> {
        if width == 0 || height == 0 {
            return Err(CitrusError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CitrusError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            pixels: vec![0; len],
            stroke: Argb(0xFF00_0000),
            fill: Argb::WHITE,
            stroke_weight: 1.0,
            smooth: false,
        };
        raster.clear(background);
        Ok(raster)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The RGBA8 buffer, row-major, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// `[r, g, b, a]` at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Overwrites every pixel with `color` (no blending).
    pub fn clear(&mut self, color: Argb) {
        let rgba = color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Maps a signed distance (negative inside) to coverage in [0, 1].
    fn coverage(&self, signed_dist: f32) -> f32 {
        if self.smooth {
            (0.5 - signed_dist).clamp(0.0, 1.0)
        } else if signed_dist <= 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// Pixel rows and columns whose centres may fall within `[min, max]`.
    fn span(min: f32, max: f32, limit: usize) -> std::ops::Range<usize> {
        let lo = (min - 1.0).floor().max(0.0) as usize;
        let hi = ((max + 1.0).ceil().max(0.0) as usize).min(limit);
        lo.min(hi)..hi
    }

    /// Source-over composite of `color` at `(x, y)` scaled by `coverage`.
    fn blend(&mut self, x: usize, y: usize, color: Argb, coverage: f32) {
        let src_a = f32::from(color.alpha()) / 255.0 * coverage;
        if src_a <= 0.0 {
            return;
        }
        let i = (y * self.width + x) * 4;
        let dst = &mut self.pixels[i..i + 4];
        let dst_a = f32::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let src = color.to_rgba8();
        for c in 0..3 {
            let v = (f32::from(src[c]) * src_a + f32::from(dst[c]) * dst_a * (1.0 - src_a)) / out_a;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for Raster {
    fn smooth(&mut self) {
        self.smooth = true;
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.stroke_weight = weight;
    }

    fn stroke(&mut self, color: Argb) {
        self.stroke = color;
    }

    fn fill(&mut self, color: Argb) {
        self.fill = color;
    }

    fn ellipse(&mut self, cx: f32, cy: f32, width: f32, height: f32) {
        let (rx, ry) = (width / 2.0, height / 2.0);
        if !(rx > 0.0 && ry > 0.0 && cx.is_finite() && cy.is_finite()) {
            trace!(cx, cy, width, height, "skipping degenerate ellipse");
            return;
        }
        let half_stroke = self.stroke_weight.max(0.0) / 2.0;
        let reach_x = rx + half_stroke;
        let reach_y = ry + half_stroke;
        let min_r = rx.min(ry);

        for y in Self::span(cy - reach_y, cy + reach_y, self.height) {
            for x in Self::span(cx - reach_x, cx + reach_x, self.width) {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                // exact for circles, a close approximation for ellipses
                let d = ((dx * dx + dy * dy).sqrt() - 1.0) * min_r;

                let fill = self.fill;
                self.blend(x, y, fill, self.coverage(d));
                if half_stroke > 0.0 {
                    let stroke = self.stroke;
                    self.blend(x, y, stroke, self.coverage(d.abs() - half_stroke));
                }
            }
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            trace!(x1, y1, x2, y2, "skipping non-finite line");
            return;
        }
        let half = self.stroke_weight.max(0.0) / 2.0;
        if half == 0.0 {
            return;
        }
        let (ex, ey) = (x2 - x1, y2 - y1);
        let len_sq = ex * ex + ey * ey;

        for y in Self::span(y1.min(y2) - half, y1.max(y2) + half, self.height) {
            for x in Self::span(x1.min(x2) - half, x1.max(x2) + half, self.width) {
                let (px, py) = (x as f32 + 0.5 - x1, y as f32 + 0.5 - y1);
                let t = if len_sq > 0.0 {
                    ((px * ex + py * ey) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (px - ex * t, py - ey * t);
                let d = (qx * qx + qy * qy).sqrt() - half;
                let stroke = self.stroke;
                self.blend(x, y, stroke, self.coverage(d));
            }
        }
    }
}
