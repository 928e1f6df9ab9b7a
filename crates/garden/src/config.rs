use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::growth::GrowthParams;
use crate::scatter::ObstacleKind;

/// Patches per grid side. The garden holds at most `GRID_SIZE * GRID_SIZE` goals.
pub const GRID_SIZE: usize = 3;
pub const GRID_CAPACITY: usize = GRID_SIZE * GRID_SIZE;

/// Radius of one goal patch in world units.
pub const PATCH_RADIUS: f32 = 5.0;
/// Gap between neighbouring patch edges.
pub const PATCH_GAP: f32 = 4.0;
/// Fraction of the patch radius flowers may occupy.
pub const FLOWER_MARGIN: f32 = 0.75;
/// Drawn diameter of a flower head at growth scale 1.0.
pub const FLOWER_RENDER_SIZE: f32 = 1.6;
/// Y of a flower's root, just above the patch surface.
pub const FLOWER_HEIGHT: f32 = 0.12;

/// Obstacle candidates tried per slot before the best one is kept anyway.
pub const OBSTACLE_RETRIES: usize = 10;
/// Field-element attempts allowed per requested element.
pub const FIELD_ATTEMPT_FACTOR: usize = 2;
/// Largest grass count a config may request.
pub const MAX_FIELD_COUNT: usize = 100_000;
/// Largest obstacle count per ring.
pub const MAX_RING_COUNT: usize = 2_000;

/// One annulus of discrete obstacles around the patch grid.
///
/// Overrides must spell out the whole ring; there is no per-field default
/// because trees and rocks disagree on every value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterRing {
    pub kind: ObstacleKind,
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Minimum centre-to-centre distance between placed obstacles.
    pub min_separation: f32,
    /// Fraction of the angular slot used for jitter (0 = evenly spaced).
    pub angle_jitter: f32,
    pub base_radius: f32,
    pub scale_range: (f32, f32),
}

impl ScatterRing {
    pub fn trees() -> Self {
        Self {
            kind: ObstacleKind::Tree,
            count: 64,
            inner_radius: 30.0,
            outer_radius: 62.0,
            min_separation: 3.5,
            angle_jitter: 0.8,
            base_radius: 1.2,
            scale_range: (0.8, 1.4),
        }
    }

    pub fn rocks() -> Self {
        Self {
            kind: ObstacleKind::Rock,
            count: 36,
            inner_radius: 27.0,
            outer_radius: 58.0,
            min_separation: 1.5,
            angle_jitter: 1.0,
            base_radius: 0.7,
            scale_range: (0.6, 1.3),
        }
    }
}

/// Dense field (grass) parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Requested number of field elements.
    pub count: usize,
    /// Radius of the disk the field fills.
    pub radius: f32,
    /// Extra distance kept from every exclusion zone.
    pub safety_margin: f32,
    pub height_range: (f32, f32),
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 6000,
            radius: 68.0,
            safety_margin: 0.3,
            height_range: (0.35, 0.9),
        }
    }
}

/// A fixed area (pond, bench, path) that grass and rocks keep clear of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialArea {
    pub name: String,
    pub position: Vec2,
    pub radius: f32,
}

/// Tunable parameters for scene generation.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub grid_size: usize,
    pub patch_radius: f32,
    pub patch_gap: f32,
    pub flower_margin: f32,
    pub growth: GrowthParams,
    pub trees: ScatterRing,
    pub rocks: ScatterRing,
    pub field: FieldConfig,
    pub special_areas: Vec<SpecialArea>,
    /// Seed for obstacle placement, so trees and rocks stay put across rebuilds.
    pub layout_seed: u64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            patch_radius: PATCH_RADIUS,
            patch_gap: PATCH_GAP,
            flower_margin: FLOWER_MARGIN,
            growth: GrowthParams::default(),
            trees: ScatterRing::trees(),
            rocks: ScatterRing::rocks(),
            field: FieldConfig::default(),
            special_areas: vec![SpecialArea {
                name: "pond".to_string(),
                position: Vec2::new(-36.0, 20.0),
                radius: 4.5,
            }],
            layout_seed: 7,
        }
    }
}

impl GardenConfig {
    pub fn capacity(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Parse a JSON override. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !(self.patch_radius > 0.0) {
            return Err(ConfigError::NonPositive("patch_radius"));
        }
        if self.patch_gap < 0.0 {
            return Err(ConfigError::NonPositive("patch_gap"));
        }
        if !(self.flower_margin > 0.0 && self.flower_margin <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "flower_margin",
                value: self.flower_margin,
            });
        }
        for ring in [&self.trees, &self.rocks] {
            if ring.count > MAX_RING_COUNT {
                return Err(ConfigError::OutOfRange {
                    field: "ring.count",
                    value: ring.count as f32,
                });
            }
            if ring.outer_radius < ring.inner_radius || ring.inner_radius < 0.0 {
                return Err(ConfigError::InvertedRing(ring.kind));
            }
            if ring.scale_range.0 > ring.scale_range.1 {
                return Err(ConfigError::InvertedRange("scale_range"));
            }
        }
        if self.field.count > MAX_FIELD_COUNT {
            return Err(ConfigError::OutOfRange {
                field: "field.count",
                value: self.field.count as f32,
            });
        }
        if !(self.field.radius > 0.0) {
            return Err(ConfigError::NonPositive("field.radius"));
        }
        if self.field.height_range.0 > self.field.height_range.1 {
            return Err(ConfigError::InvertedRange("field.height_range"));
        }
        Ok(())
    }
}

/// Orbit camera tuning, in the same spirit as the smoothing config: plain
/// numbers with sensible defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal distance from the focal point (the origin). Sits outside
    /// the grass disk so props never clip the camera.
    pub radius: f32,
    pub height: f32,
    /// Idle auto-rotation speed in radians per second.
    pub base_rotation_speed: f32,
    /// Seconds after the last interaction before auto-rotation resumes.
    pub resume_delay: f32,
    /// Velocity multiplier applied per nominal frame while decelerating.
    pub decay_factor: f32,
    /// Blend fraction toward the auto-rotation speed per nominal frame.
    pub smooth_factor: f32,
    /// Radians per pixel of horizontal drag.
    pub drag_sensitivity: f32,
    /// Largest angle a single drag event may apply.
    pub max_drag_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 80.0,
            height: 38.0,
            base_rotation_speed: 0.08,
            resume_delay: 2.5,
            decay_factor: 0.94,
            smooth_factor: 0.02,
            drag_sensitivity: 0.005,
            max_drag_step: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    EmptyGrid,
    NonPositive(&'static str),
    OutOfRange { field: &'static str, value: f32 },
    InvertedRing(ObstacleKind),
    InvertedRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::EmptyGrid => write!(f, "grid_size must be at least 1"),
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{field} out of range: {value}")
            }
            ConfigError::InvertedRing(kind) => {
                write!(f, "{kind:?} ring has inner radius beyond outer radius")
            }
            ConfigError::InvertedRange(field) => write!(f, "{field} has min above max"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GardenConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_capacity_matches_grid_constant() {
        assert_eq!(GardenConfig::default().capacity(), GRID_CAPACITY);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GardenConfig::from_json(r#"{"grid_size": 4, "field": {"count": 10}}"#)
            .expect("partial config should parse");
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.field.count, 10);
        assert_eq!(config.field.radius, FieldConfig::default().radius);
        assert_eq!(config.trees, ScatterRing::trees());
    }

    #[test]
    fn test_invalid_margin_rejected() {
        let config = GardenConfig {
            flower_margin: 1.5,
            ..GardenConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "flower_margin",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_ring_rejected() {
        let mut config = GardenConfig::default();
        config.rocks.inner_radius = 80.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRing(ObstacleKind::Rock))
        );
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let err = GardenConfig::from_json(r#"{"field":{"count":18446744073709551615}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "field.count",
                ..
            }
        ));

        let mut config = GardenConfig::default();
        config.rocks.count = MAX_RING_COUNT + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "ring.count",
                ..
            })
        ));

        config.rocks.count = MAX_RING_COUNT;
        config.field.count = MAX_FIELD_COUNT;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        assert!(matches!(
            GardenConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_camera_factors_in_unit_range() {
        let cam = CameraConfig::default();
        assert!(cam.decay_factor > 0.0 && cam.decay_factor < 1.0);
        assert!(cam.smooth_factor > 0.0 && cam.smooth_factor < 1.0);
        assert!(cam.resume_delay > 0.0);
    }
}
