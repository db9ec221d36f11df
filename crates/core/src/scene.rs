//! Reproducible description of a single rendered frame.
//!
//! A [`Scene`] captures everything needed to recreate a render: canvas
//! size, background, sprite parameters, initial kinematics, an optional
//! impact, and how many physics frames to run before drawing.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::argb::Argb;
use crate::error::CitrusError;

/// Reproducible specification for a citrus render.
///
/// Loaded from JSON; every field except `width`/`height` has a default so a
/// scene file can be as small as `{"width": 256, "height": 256}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_background")]
    pub background: Argb,
    /// Sprite parameter overrides, interpreted by the sprite's `from_json`.
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    /// Initial centre. `None` centres the sprite on the canvas.
    #[serde(default)]
    pub position: Option<Vec2>,
    #[serde(default)]
    pub velocity: Vec2,
    /// Initial rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Impact applied once before the first frame.
    #[serde(default)]
    pub impulse: Option<Vec2>,
    #[serde(default)]
    pub frames: usize,
}

fn default_background() -> Argb {
    Argb::TRANSPARENT
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with an empty params object, a transparent
    /// background, and the sprite at rest in the centre.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: default_background(),
            params: empty_params(),
            position: None,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            impulse: None,
            frames: 0,
        }
    }

    /// Reads and validates a scene from a JSON file.
    ///
    /// A missing or unreadable file is `CitrusError::Io`. Malformed JSON or a
    /// field of the wrong shape (including a bad `background` color) is
    /// `CitrusError::InvalidScene`. Out-of-range values are reported by
    /// [`Scene::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self, CitrusError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CitrusError::Io(format!("{}: {e}", path.display())))?;
        let scene: Scene = serde_json::from_str(&text)
            .map_err(|e| CitrusError::InvalidScene(format!("{}: {e}", path.display())))?;
        scene.validate()?;
        debug!(path = %path.display(), width = scene.width, height = scene.height, frames = scene.frames, "loaded scene");
        Ok(scene)
    }

    /// The initial centre: `position` if set, otherwise the canvas centre.
    pub fn start_position(&self) -> Vec2 {
        self.position
            .unwrap_or_else(|| Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0))
    }

    /// Checks canvas dimensions and that the kinematic values are finite.
    pub fn validate(&self) -> Result<(), CitrusError> {
        if self.width == 0 || self.height == 0 {
            return Err(CitrusError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(CitrusError::InvalidDimensions)?;

        let vectors = [
            ("position", self.position.unwrap_or(Vec2::ZERO)),
            ("velocity", self.velocity),
            ("impulse", self.impulse.unwrap_or(Vec2::ZERO)),
        ];
        if let Some((name, _)) = vectors.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CitrusError::InvalidParams(format!("{name} must be finite")));
        }
        if !self.rotation.is_finite() {
            return Err(CitrusError::InvalidParams("rotation must be finite".into()));
        }
        if !self.params.is_object() {
            return Err(CitrusError::InvalidParams("params must be a JSON object".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_creates_scene_at_rest() {
        let s = Scene::new(200, 100);
        assert_eq!(s.width, 200);
        assert_eq!(s.height, 100);
        assert_eq!(s.background, Argb::TRANSPARENT);
        assert_eq!(s.params, json!({}));
        assert_eq!(s.velocity, Vec2::ZERO);
        assert_eq!(s.frames, 0);
        assert!(s.impulse.is_none());
    }

    #[test]
    fn start_position_defaults_to_canvas_centre() {
        let mut s = Scene::new(200, 100);
        assert_eq!(s.start_position(), Vec2::new(100.0, 50.0));
        s.position = Some(Vec2::new(10.0, 20.0));
        assert_eq!(s.start_position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let s: Scene = serde_json::from_str(r#"{"width": 64, "height": 32}"#).unwrap();
        assert_eq!(s, Scene::new(64, 32));
    }

    #[test]
    fn full_json_parses_every_field() {
        let s: Scene = serde_json::from_value(json!({
            "width": 256,
            "height": 256,
            "background": "#ff202020",
            "params": {"radius": 60, "base_color": "#ffd800"},
            "position": [40.0, 50.0],
            "velocity": [3.0, -1.0],
            "rotation": 15.0,
            "impulse": [-10.0, 0.0],
            "frames": 30
        }))
        .unwrap();
        assert_eq!(s.background, Argb(0xFF20_2020));
        assert_eq!(s.params["radius"], 60);
        assert_eq!(s.position, Some(Vec2::new(40.0, 50.0)));
        assert_eq!(s.velocity, Vec2::new(3.0, -1.0));
        assert_eq!(s.impulse, Some(Vec2::new(-10.0, 0.0)));
        assert_eq!(s.frames, 30);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_dimensions() {
        assert!(matches!(
            Scene::new(0, 10).validate(),
            Err(CitrusError::InvalidDimensions)
        ));
        assert!(Scene::new(10, 0).validate().is_err());
    }

    #[test]
    fn validate_fails_for_overflow() {
        assert!(Scene::new(usize::MAX, 2).validate().is_err());
    }

    #[test]
    fn validate_fails_for_non_finite_velocity() {
        let mut s = Scene::new(10, 10);
        s.velocity = Vec2::new(f32::NAN, 0.0);
        assert!(matches!(s.validate(), Err(CitrusError::InvalidParams(_))));
    }

    #[test]
    fn validate_fails_for_non_object_params() {
        let mut s = Scene::new(10, 10);
        s.params = json!([1, 2, 3]);
        assert!(s.validate().is_err());
    }

    #[test]
    fn from_json_file_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 128, "height": 96, "frames": 5}"#).unwrap();
        let s = Scene::from_json_file(&path).unwrap();
        assert_eq!(s.width, 128);
        assert_eq!(s.frames, 5);
    }

    #[test]
    fn from_json_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scene::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CitrusError::Io(_)));
    }

    #[test]
    fn from_json_file_malformed_is_invalid_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 128, "height": "#).unwrap();
        let err = Scene::from_json_file(&path).unwrap_err();
        assert!(matches!(err, CitrusError::InvalidScene(_)), "got {err:?}");
        assert!(err.to_string().contains("scene.json"));
    }

    #[test]
    fn from_json_file_bad_background_is_invalid_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 64, "height": 64, "background": "teal"}"#).unwrap();
        let err = Scene::from_json_file(&path).unwrap_err();
        assert!(matches!(err, CitrusError::InvalidScene(_)), "got {err:?}");
        assert!(err.to_string().contains("hex"), "missing color cause in: {err}");
    }

    #[test]
    fn from_json_file_rejects_zero_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 0, "height": 96}"#).unwrap();
        assert!(matches!(
            Scene::from_json_file(&path),
            Err(CitrusError::InvalidDimensions)
        ));
    }
}
