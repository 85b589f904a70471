//! Runtime configuration for the canvas.
//!
//! Every field falls back to its value in [`crate::constants`], so partial JSON
//! documents are accepted.

use crate::constants;
use crate::error::{FlowchartError, Result};
use serde::{Deserialize, Serialize};

/// Geometry given to blocks created without explicit overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDefaults {
    /// Width in units
    pub width: u32,
    /// Height in units
    pub height: u32,
    /// X-coordinate of the top-left corner
    pub x: i32,
    /// Y-coordinate of the top-left corner
    pub y: i32,
}

impl Default for BlockDefaults {
    fn default() -> Self {
        Self {
            width: constants::BLOCK_DEFAULT_WIDTH,
            height: constants::BLOCK_DEFAULT_HEIGHT,
            x: constants::BLOCK_DEFAULT_X,
            y: constants::BLOCK_DEFAULT_Y,
        }
    }
}

/// Canvas-wide settings read by the translator and the controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pixels per logical unit at scale 1.0
    pub unit_size: f32,
    /// Width of the pannable surface in pixels
    pub canvas_width: f32,
    /// Height of the pannable surface in pixels
    pub canvas_height: f32,
    /// Side length of a port square in pixels at scale 1.0
    pub port_size: f32,
    /// Pointer deltas larger than this many viewports are discarded while panning
    pub jump_guard_factor: f32,
    /// Smallest allowed scale
    pub min_scale: f32,
    /// Largest allowed scale
    pub max_scale: f32,
    /// Geometry for blocks created without overrides
    pub block_defaults: BlockDefaults,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            unit_size: constants::CANVAS_UNIT,
            canvas_width: constants::CANVAS_WIDTH,
            canvas_height: constants::CANVAS_HEIGHT,
            port_size: constants::PORT_SIZE,
            jump_guard_factor: constants::PAN_JUMP_GUARD_FACTOR,
            min_scale: constants::MIN_SCALE,
            max_scale: constants::MAX_SCALE,
            block_defaults: BlockDefaults::default(),
        }
    }
}

impl CanvasConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable by the translator and controllers.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("unit_size", self.unit_size),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("port_size", self.port_size),
            ("jump_guard_factor", self.jump_guard_factor),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlowchartError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.min_scale > self.max_scale {
            return Err(FlowchartError::InvalidConfig(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.block_defaults.width == 0 || self.block_defaults.height == 0 {
            return Err(FlowchartError::InvalidDimensions {
                width: self.block_defaults.width,
                height: self.block_defaults.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.unit_size, 25.0);
        assert_eq!(config.block_defaults.width, 6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(r#"{ "unit_size": 40.0, "block_defaults": { "width": 8 } }"#)
            .unwrap();

        assert_eq!(config.unit_size, 40.0);
        assert_eq!(config.port_size, 25.0);
        assert_eq!(config.block_defaults.width, 8);
        assert_eq!(config.block_defaults.height, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "unit_size": 0.0 }"#),
            Err(FlowchartError::InvalidConfig(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "min_scale": 3.0, "max_scale": 2.0 }"#),
            Err(FlowchartError::InvalidConfig(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "block_defaults": { "height": 0 } }"#),
            Err(FlowchartError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            CanvasConfig::from_json("not json"),
            Err(FlowchartError::Config(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = CanvasConfig::default();
        config.port_size = 12.0;
        let restored = CanvasConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }
}
