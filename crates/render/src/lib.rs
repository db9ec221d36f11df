#![deny(unsafe_code)]
//! Rendering backends for citrus-sketch.
//!
//! [`pixel::Raster`] is a CPU [`Surface`](citrus_core::Surface) over an
//! RGBA8 buffer. With the `png` feature, [`snapshot::write_png`] saves it.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::Raster;
