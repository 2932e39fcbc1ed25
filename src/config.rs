use std::fs;
use std::path::Path;

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::MIN_ELEMENT_SIZE;
use crate::error::ConfigError;

/// Tunable parameters of the drawing surface.
///
/// Missing fields fall back to their defaults when deserializing, so old
/// persisted settings keep loading after new fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pointer travel (px) below which a gesture counts as a click.
    pub min_drag: f32,
    /// Smallest width/height/radius a newly drawn shape may have.
    pub min_shape_size: f32,
    /// Distance between sampled points of a freehand polygon.
    pub polygon_point_spacing: f32,
    /// Offset applied to duplicated shapes.
    pub duplicate_offset: Vec2,
    /// Alpha of the complementary color used for ghost highlights.
    pub ghost_alpha: f32,
    pub stroke_width: f32,
    pub default_stroke: Color32,
    pub default_fill: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_drag: 3.0,
            min_shape_size: MIN_ELEMENT_SIZE,
            polygon_point_spacing: 4.0,
            duplicate_offset: Vec2::new(10.0, 10.0),
            ghost_alpha: 0.5,
            stroke_width: 2.0,
            default_stroke: Color32::BLACK,
            default_fill: Color32::from_rgb(100, 149, 237),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_drag >= 0.0) {
            return Err(ConfigError::InvalidValue(format!("min_drag must be >= 0, got {}", self.min_drag)));
        }
        if !(self.min_shape_size > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "min_shape_size must be > 0, got {}",
                self.min_shape_size
            )));
        }
        if !(self.polygon_point_spacing > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "polygon_point_spacing must be > 0, got {}",
                self.polygon_point_spacing
            )));
        }
        if !(0.0..=1.0).contains(&self.ghost_alpha) {
            return Err(ConfigError::InvalidValue(format!(
                "ghost_alpha must be within 0..=1, got {}",
                self.ghost_alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(r#"{ "min_drag": 8.0 }"#).unwrap();
        assert_eq!(config.min_drag, 8.0);
        assert_eq!(config.ghost_alpha, CanvasConfig::default().ghost_alpha);
        assert_eq!(config.min_shape_size, MIN_ELEMENT_SIZE);
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let mut config = CanvasConfig::default();
        config.polygon_point_spacing = 6.5;
        let json = config.to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "ghost_alpha": 2.0 }"#),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "polygon_point_spacing": 0.0 }"#),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(CanvasConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CanvasConfig::load("/nonexistent/canvas.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
