//! Renderer configuration structures
//!
//! Styling for the cage and its viewport. Both can be persisted as RON so a
//! host can ship its own theme.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Cage colours and line width
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CageStyle {
    /// Handle colour (RGBA)
    pub color: [f32; 4],
    /// Corner colour while the cage is highlighted (RGBA)
    pub highlight_color: [f32; 4],
    /// Colour of the wide outline under each handle (RGBA)
    pub outline_color: [f32; 4],
    /// Base line width in pixels
    pub line_width: f32,
}

impl Default for CageStyle {
    fn default() -> Self {
        Self::dark()
    }
}

impl CageStyle {
    /// Create dark theme cage style
    pub fn dark() -> Self {
        Self {
            color: [0.85, 0.85, 0.85, 1.0],
            highlight_color: [1.0, 0.75, 0.25, 1.0],
            outline_color: [0.0, 0.0, 0.0, 1.0],
            line_width: 2.0,
        }
    }

    /// Create light theme cage style
    pub fn light() -> Self {
        Self {
            color: [0.2, 0.2, 0.2, 1.0],
            highlight_color: [0.95, 0.55, 0.1, 1.0],
            outline_color: [1.0, 1.0, 1.0, 1.0],
            line_width: 2.0,
        }
    }

    /// Corner colour for the current highlight state
    pub fn corner_color(&self, is_highlighted: bool) -> [f32; 4] {
        if is_highlighted {
            self.highlight_color
        } else {
            self.color
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::dark()
    }
}

impl ViewportConfig {
    /// Create dark theme viewport config
    pub fn dark() -> Self {
        Self {
            background_color: [0.15, 0.15, 0.18, 1.0],
        }
    }

    /// Create light theme viewport config
    pub fn light() -> Self {
        Self {
            background_color: [0.92, 0.92, 0.94, 1.0],
        }
    }
}

/// Complete renderer theme
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RendererConfig {
    /// Cage style
    pub cage: CageStyle,
    /// Viewport settings
    pub viewport: ViewportConfig,
}

impl RendererConfig {
    /// Dark theme
    pub fn dark() -> Self {
        Self {
            cage: CageStyle::dark(),
            viewport: ViewportConfig::dark(),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            cage: CageStyle::light(),
            viewport: ViewportConfig::light(),
        }
    }

    /// Load a theme from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| StyleError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| StyleError::Deserialize(e.to_string()))
    }

    /// Save the theme as RON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StyleError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| StyleError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| StyleError::Io(e.to_string()))
    }
}

/// Theme loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StyleError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(String),
    /// Theme could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Theme file is malformed
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
