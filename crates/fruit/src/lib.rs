#![deny(unsafe_code)]
//! A citrus-fruit cross-section drawn procedurally, with a little physics.
//!
//! The fruit is made of nested layers:
//!
//! - epicarp: the coloured outer skin, drawn as the outline of the outer disk
//! - mesocarp: the pale inner peel, the band between the outer and inner disks
//! - endocarp: the juicy interior, split into vesicles by radial lines
//! - central column: the white core
//!
//! Physics is frame-driven: each [`Citrus::physics_update`] moves the fruit
//! by its velocity, damps the velocity by 10%, and eases the visible spin
//! toward the spin accumulated from impacts ([`Citrus::add_spin`]).

use std::f32::consts::{PI, TAU};

use citrus_core::argb::{lighten, Argb};
use citrus_core::error::CitrusError;
use citrus_core::params::{param_color, param_f32, param_u32};
use citrus_core::surface::{lerp, Surface};
use citrus_core::{Scene, Sprite};
use glam::Vec2;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

const DEFAULT_RADIUS: f32 = 50.0;
const DEFAULT_VESICLE_COUNT: u32 = 8;
const DEFAULT_EPICARP_WIDTH: f32 = 3.0;
const DEFAULT_MESOCARP_WIDTH: f32 = 10.0;
const DEFAULT_CENTER_WIDTH: f32 = 5.0;
/// Orange.
const DEFAULT_BASE_COLOR: Argb = Argb(0xFFFF_8000);

/// How far the outer disk fill is lightened from the base color.
const EPICARP_LIGHTEN: u8 = 40;
/// How far the endocarp fill is lightened from the base color.
const ENDOCARP_LIGHTEN: u8 = 80;
/// Per-frame interpolation factor for velocity decay and spin easing.
const EASE: f32 = 0.1;
/// Impact magnitude that adds half a turn of spin.
const SPIN_FORCE_PER_HALF_TURN: f32 = 10.0;

/// Shape and color of a citrus.
///
/// Nothing here is validated on construction; see [`CitrusParams::validate`].
/// Use [`Default`] for an orange of radius 50 with 8 vesicles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CitrusParams {
    /// Radius of the whole fruit.
    pub radius: f32,
    /// Number of juice segments.
    pub vesicle_count: u32,
    /// Outline width of the outer skin.
    pub epicarp_width: f32,
    /// Thickness of the pale inner peel.
    pub mesocarp_width: f32,
    /// Radius of the central column.
    pub center_width: f32,
    pub base_color: Argb,
}

impl Default for CitrusParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            vesicle_count: DEFAULT_VESICLE_COUNT,
            epicarp_width: DEFAULT_EPICARP_WIDTH,
            mesocarp_width: DEFAULT_MESOCARP_WIDTH,
            center_width: DEFAULT_CENTER_WIDTH,
            base_color: DEFAULT_BASE_COLOR,
        }
    }
}

impl CitrusParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Only `base_color` can fail, on an unparseable color.
    pub fn from_json(params: &Value) -> Result<Self, CitrusError> {
        Ok(Self {
            radius: param_f32(params, "radius", DEFAULT_RADIUS),
            vesicle_count: param_u32(params, "vesicle_count", DEFAULT_VESICLE_COUNT),
            epicarp_width: param_f32(params, "epicarp_width", DEFAULT_EPICARP_WIDTH),
            mesocarp_width: param_f32(params, "mesocarp_width", DEFAULT_MESOCARP_WIDTH),
            center_width: param_f32(params, "center_width", DEFAULT_CENTER_WIDTH),
            base_color: param_color(params, "base_color", DEFAULT_BASE_COLOR)?,
        })
    }

    /// Radius of the endocarp bounding circle.
    pub fn endocarp_radius(&self) -> f32 {
        self.radius - self.mesocarp_width
    }

    /// Reports parameters that would make the drawing degenerate.
    ///
    /// Layer nesting (`center_width < radius - mesocarp_width`) is not
    /// checked: overlapping layers still draw.
    pub fn validate(&self) -> Result<(), CitrusError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CitrusError::InvalidParams(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if self.vesicle_count == 0 {
            return Err(CitrusError::InvalidParams(
                "vesicle_count must be at least 1".into(),
            ));
        }
        let widths = [
            ("epicarp_width", self.epicarp_width),
            ("mesocarp_width", self.mesocarp_width),
            ("center_width", self.center_width),
        ];
        for (name, w) in widths {
            if !(w.is_finite() && w >= 0.0) {
                return Err(CitrusError::InvalidParams(format!(
                    "{name} must be non-negative and finite, got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Kinematic state of a citrus, as reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CitrusState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees.
    pub rotation: f32,
    /// Radians.
    pub spin: f32,
    /// Radians.
    pub total_spin: f32,
}

/// A citrus sprite: fixed shape, mutable kinematics.
#[derive(Debug, Clone, PartialEq)]
pub struct Citrus {
    params: CitrusParams,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Static orientation in degrees.
    pub rotation: f32,
    spin: f32,
    total_spin: f32,
}

impl Citrus {
    /// Creates a citrus at rest at the origin. Values are stored as given.
    pub fn new(
        radius: f32,
        vesicle_count: u32,
        epicarp_width: f32,
        mesocarp_width: f32,
        center_width: f32,
        base_color: Argb,
    ) -> Self {
        Self::from_params(CitrusParams {
            radius,
            vesicle_count,
            epicarp_width,
            mesocarp_width,
            center_width,
            base_color,
        })
    }

    /// Creates a citrus at rest at the origin from a parameter bundle.
    pub fn from_params(params: CitrusParams) -> Self {
        debug!(
            radius = params.radius,
            vesicles = params.vesicle_count,
            color = %params.base_color.to_hex(),
            "new citrus"
        );
        Self {
            params,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            total_spin: 0.0,
        }
    }

    /// Like [`Citrus::from_params`], but rejects degenerate parameters.
    pub fn try_from_params(params: CitrusParams) -> Result<Self, CitrusError> {
        params.validate()?;
        Ok(Self::from_params(params))
    }

    /// Creates a validated citrus from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, CitrusError> {
        Self::try_from_params(CitrusParams::from_json(params)?)
    }

    /// Sets a citrus up as `scene` describes and runs its frames.
    ///
    /// The scene's impulse is applied once before the first frame: it
    /// adds spin through [`Citrus::add_spin`] and is added to the velocity.
    pub fn from_scene(scene: &Scene) -> Result<Self, CitrusError> {
        scene.validate()?;
        let mut citrus = Self::from_json(&scene.params)?;
        citrus.position = scene.start_position();
        citrus.velocity = scene.velocity;
        citrus.rotation = scene.rotation;
        if let Some(impulse) = scene.impulse {
            citrus.add_spin(impulse);
            citrus.velocity += impulse;
        }
        citrus.advance(scene.frames);
        Ok(citrus)
    }

    /// Runs `frames` physics updates.
    pub fn advance(&mut self, frames: usize) {
        for _ in 0..frames {
            self.physics_update();
        }
    }

    /// Shape and color this citrus was built with.
    pub fn shape(&self) -> &CitrusParams {
        &self.params
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    /// Current visible spin in radians.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Spin the visible spin is easing toward, in radians.
    pub fn total_spin(&self) -> f32 {
        self.total_spin
    }

    pub fn state(&self) -> CitrusState {
        CitrusState {
            position: self.position,
            velocity: self.velocity,
            rotation: self.rotation,
            spin: self.spin,
            total_spin: self.total_spin,
        }
    }

    /// Angle of the `i`-th vesicle boundary in radians.
    pub fn vesicle_angle(&self, i: u32) -> f32 {
        let step = TAU / self.params.vesicle_count as f32;
        i as f32 * step + self.rotation.to_radians() + self.spin
    }

    /// Draws the citrus centred on `pos`.
    ///
    /// Layers go outer disk, inner disk, vesicle lines, centre disk, so each
    /// later layer covers the middle of the previous one. The vesicle ring
    /// draws `vesicle_count + 1` lines; the last one retraces the first.
    pub fn draw_at<S: Surface + ?Sized>(&self, surface: &mut S, pos: Vec2) {
        let p = &self.params;
        let epicarp_fill = lighten(p.base_color, EPICARP_LIGHTEN);
        let endocarp_fill = lighten(p.base_color, ENDOCARP_LIGHTEN);

        surface.smooth();
        surface.stroke_weight(p.epicarp_width);
        surface.stroke(p.base_color);
        surface.fill(epicarp_fill);
        surface.ellipse(pos.x, pos.y, p.radius * 2.0, p.radius * 2.0);

        let endo_radius = p.endocarp_radius();
        surface.stroke_weight(1.0);
        surface.fill(endocarp_fill);
        surface.ellipse(pos.x, pos.y, endo_radius * 2.0, endo_radius * 2.0);

        if p.vesicle_count == 0 {
            warn!("citrus has no vesicles; skipping vesicle lines");
        } else {
            for i in 0..=p.vesicle_count {
                let (sin, cos) = self.vesicle_angle(i).sin_cos();
                surface.line(
                    pos.x + cos * endo_radius,
                    pos.y + sin * endo_radius,
                    pos.x + cos * p.center_width,
                    pos.y + sin * p.center_width,
                );
            }
        }

        surface.fill(Argb::WHITE);
        surface.ellipse(pos.x, pos.y, p.center_width * 2.0, p.center_width * 2.0);
    }

    /// Draws the citrus at its current position.
    pub fn draw_current<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.draw_at(surface, self.position);
    }

    /// Advances one frame: move by velocity, damp velocity toward zero, and
    /// ease spin toward the accumulated total.
    pub fn physics_update(&mut self) {
        self.position += self.velocity;
        self.velocity = Vec2::new(
            lerp(self.velocity.x, 0.0, EASE),
            lerp(self.velocity.y, 0.0, EASE),
        );
        self.spin = lerp(self.spin, self.total_spin, EASE);
        trace!(
            x = self.position.x,
            y = self.position.y,
            speed = self.velocity.length(),
            spin = self.spin,
            "physics tick"
        );
    }

    /// Adds spin from an impact.
    ///
    /// Each `10` units of force magnitude add half a turn; the direction
    /// follows the sign of `force.x` (zero counts as positive).
    pub fn add_spin(&mut self, force: Vec2) {
        let direction = if force.x >= 0.0 { 1.0 } else { -1.0 };
        self.total_spin += (force.length() / SPIN_FORCE_PER_HALF_TURN) * PI * direction;
        debug!(fx = force.x, fy = force.y, total_spin = self.total_spin, "impact spin");
    }
}

impl Sprite for Citrus {
    fn step(&mut self) {
        self.physics_update();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.draw_current(surface);
    }

    fn params(&self) -> Value {
        json!({
            "radius": self.params.radius,
            "vesicle_count": self.params.vesicle_count,
            "epicarp_width": self.params.epicarp_width,
            "mesocarp_width": self.params.mesocarp_width,
            "center_width": self.params.center_width,
            "base_color": self.params.base_color.to_hex(),
        })
    }

    fn param_schema(&self) -> Value {
        param_schema()
    }
}

/// Schema describing every citrus parameter, independent of any instance.
pub fn param_schema() -> Value {
    json!({
        "radius": {
            "type": "number",
            "default": DEFAULT_RADIUS,
            "min": 0.0,
            "description": "Radius of the whole fruit"
        },
        "vesicle_count": {
            "type": "integer",
            "default": DEFAULT_VESICLE_COUNT,
            "min": 1,
            "description": "Number of juice segments"
        },
        "epicarp_width": {
            "type": "number",
            "default": DEFAULT_EPICARP_WIDTH,
            "min": 0.0,
            "description": "Outline width of the outer skin"
        },
        "mesocarp_width": {
            "type": "number",
            "default": DEFAULT_MESOCARP_WIDTH,
            "min": 0.0,
            "description": "Thickness of the pale inner peel"
        },
        "center_width": {
            "type": "number",
            "default": DEFAULT_CENTER_WIDTH,
            "min": 0.0,
            "description": "Radius of the white central column"
        },
        "base_color": {
            "type": "color",
            "default": DEFAULT_BASE_COLOR.to_hex(),
            "description": "Skin color as #rrggbb or #aarrggbb"
        }
    })
}
