//! A [`Surface`] that records every call instead of drawing.
//!
//! Recorded frames serialize to JSON (`citrus trace`) and make draw output
//! easy to assert on in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::argb::Argb;
use crate::surface::Surface;

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Smooth,
    StrokeWeight {
        weight: f32,
    },
    Stroke {
        color: Argb,
    },
    Fill {
        color: Argb,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

/// One command per line in `citrus trace` text output, e.g.
/// `ellipse (50, 50) 20x20` or `line (50, 50) -> (60, 50)`.
impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DrawCommand::Smooth => write!(f, "smooth"),
            DrawCommand::StrokeWeight { weight } => write!(f, "stroke_weight {weight}"),
            DrawCommand::Stroke { color } => write!(f, "stroke {}", color.to_hex()),
            DrawCommand::Fill { color } => write!(f, "fill {}", color.to_hex()),
            DrawCommand::Ellipse {
                cx,
                cy,
                width,
                height,
            } => write!(f, "ellipse ({cx}, {cy}) {width}x{height}"),
            DrawCommand::Line { x1, y1, x2, y2 } => {
                write!(f, "line ({x1}, {y1}) -> ({x2}, {y2})")
            }
        }
    }
}

/// Records draw calls in order.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded ellipses as `(cx, cy, width, height)`.
    pub fn ellipses(&self) -> Vec<(f32, f32, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Ellipse {
                    cx,
                    cy,
                    width,
                    height,
                } => Some((cx, cy, width, height)),
                _ => None,
            })
            .collect()
    }

    /// Recorded lines as `(x1, y1, x2, y2)`.
    pub fn lines(&self) -> Vec<(f32, f32, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Line { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
                _ => None,
            })
            .collect()
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandRecorder {
    fn smooth(&mut self) {
        self.commands.push(DrawCommand::Smooth);
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.commands.push(DrawCommand::StrokeWeight { weight });
    }

    fn stroke(&mut self, color: Argb) {
        self.commands.push(DrawCommand::Stroke { color });
    }

    fn fill(&mut self, color: Argb) {
        self.commands.push(DrawCommand::Fill { color });
    }

    fn ellipse(&mut self, cx: f32, cy: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Ellipse {
            cx,
            cy,
            width,
            height,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }
}
