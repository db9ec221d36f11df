//! Error types for citrus-sketch.

use thiserror::Error;

/// Errors produced at the fallible edges of the sketch: scene loading,
/// parameter validation, color parsing and snapshot I/O.
///
/// The drawing and physics operations themselves never fail.
#[derive(Debug, Error)]
pub enum CitrusError {
    /// Width or height was zero (or overflowed) when sizing a canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Citrus or scene parameters violated a precondition.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A scene file was not valid JSON or did not match the scene shape
    /// (unknown field types, unparseable background color).
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Reading a scene file or writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}
