//! Cage configuration
//!
//! Host-settable parameters of a cage: its dimensions and the set of
//! transforms it is allowed to apply. Configurations can be persisted as RON
//! presets.

use std::path::Path;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DIMENSIONS, RESIZER_WIDTH};

bitflags! {
    /// Transforms a cage may apply to its target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TransformFlags: u32 {
        /// Drag the inner area to move the target
        const TRANSLATE = 1 << 0;
        /// Show the rotate handle above the top edge
        const ROTATE = 1 << 1;
        /// Drag edges and corners to scale
        const SCALE = 1 << 2;
        /// Scale both axes by the same factor
        const SCALE_UNIFORM = 1 << 3;
    }
}

impl Default for TransformFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl TransformFlags {
    /// Whether any scale handles are active
    pub fn has_scale(&self) -> bool {
        self.intersects(Self::SCALE | Self::SCALE_UNIFORM)
    }
}

/// Cage configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CageConfig {
    dimensions: Vec2,
    /// Enabled transforms
    #[serde(default)]
    pub transform: TransformFlags,
}

impl Default for CageConfig {
    fn default() -> Self {
        Self {
            dimensions: Vec2::from_array(DEFAULT_DIMENSIONS),
            transform: TransformFlags::empty(),
        }
    }
}

impl CageConfig {
    /// Create a configuration, validating the dimensions
    pub fn new(dimensions: Vec2, transform: TransformFlags) -> Result<Self, ConfigError> {
        validate_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            transform,
        })
    }

    /// Cage width and height
    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    /// Set the cage width and height, both must be positive and finite
    pub fn set_dimensions(&mut self, dimensions: Vec2) -> Result<(), ConfigError> {
        validate_dimensions(dimensions)?;
        self.dimensions = dimensions;
        Ok(())
    }

    /// Half of the dimensions, the cage spans `[-half, half]`
    pub fn half_size(&self) -> Vec2 {
        self.dimensions / 2.0
    }

    /// Aspect correction keeping handle margins square on screen
    pub fn aspect(&self) -> Vec2 {
        let Vec2 { x: w, y: h } = self.dimensions;
        if w > h {
            Vec2::new(h / w, 1.0)
        } else {
            Vec2::new(1.0, w / h)
        }
    }

    /// Width of the scale handle strips along each axis
    pub fn margin(&self) -> Vec2 {
        self.aspect() * self.dimensions / RESIZER_WIDTH
    }

    /// Save the configuration as a RON preset
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize the configuration to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load a RON preset from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::load_from_bytes(content.as_bytes())
    }

    /// Load a RON preset from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        let config: CageConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        validate_dimensions(config.dimensions)?;
        Ok(config)
    }
}

fn validate_dimensions(dimensions: Vec2) -> Result<(), ConfigError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(dimensions.x) && valid(dimensions.y) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimensions {
            width: dimensions.x,
            height: dimensions.y,
        })
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid cage dimensions {width} x {height}: both must be positive")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
