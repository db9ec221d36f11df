//! The `Sprite` trait implemented by every animated object in a sketch.
//!
//! The trait is object-safe so a sketch can hold `Box<dyn Sprite>` without
//! knowing which concrete object it animates.

use serde_json::Value;

use crate::surface::Surface;

/// A frame-driven object: advanced by [`Sprite::step`], rendered by
/// [`Sprite::draw`].
///
/// The surface is passed in on every draw; sprites never hold one.
pub trait Sprite {
    /// Advance the physics by one frame.
    fn step(&mut self);

    /// Render the sprite at its current position.
    fn draw(&self, surface: &mut dyn Surface);

    /// Current shape parameters as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
