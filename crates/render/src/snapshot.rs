//! PNG snapshots of a rasterized frame.
//!
//! This module is feature-gated behind `png` (default on) so that callers
//! who only need the pixel buffer don't pull in the `image` crate.

use std::path::Path;

use citrus_core::error::CitrusError;
use tracing::info;

use crate::pixel::Raster;

/// Writes the raster as an RGBA PNG.
///
/// Returns `CitrusError::InvalidDimensions` if the raster dimensions
/// overflow `u32`, or `CitrusError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), CitrusError> {
    let w = u32::try_from(raster.width()).map_err(|_| CitrusError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| CitrusError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.pixels().to_vec())
        .ok_or_else(|| CitrusError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| CitrusError::Io(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), width = w, height = h, "wrote png");
    Ok(())
}
