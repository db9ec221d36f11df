#![deny(unsafe_code)]
//! Core types and traits for citrus-sketch.
//!
//! Provides packed [`Argb`] colors and the channel arithmetic used for peel
//! shading, the [`Surface`] drawing abstraction with a [`CommandRecorder`]
//! implementation, the [`Sprite`] trait, [`Scene`] render descriptions, and
//! JSON parameter helpers.

pub mod argb;
pub mod error;
pub mod params;
pub mod recorder;
pub mod scene;
pub mod sprite;
pub mod surface;

pub use argb::{Argb, Channel};
pub use error::CitrusError;
pub use recorder::{CommandRecorder, DrawCommand};
pub use scene::Scene;
pub use sprite::Sprite;
pub use surface::{lerp, Surface};
