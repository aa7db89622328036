//! Application state module

mod viewport;

pub use viewport::{SharedViewportState, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use glam::{Mat4, Vec2};
use parking_lot::Mutex;

use cage_core::{CageConfig, CageWidget, SharedMatrixProperty, TransformFlags};
use cage_renderer::RendererConfig;

/// Actions that can be performed on the app state
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Resize the cage
    SetDimensions(Vec2),
    /// Change the enabled transforms
    SetTransformFlags(TransformFlags),
    /// Overwrite the bound matrix
    SetMatrix(Mat4),
    /// Reset the bound matrix to identity
    ResetMatrix,
    /// Load a cage preset
    LoadPreset(PathBuf),
    /// Save the cage configuration as a preset
    SavePreset(PathBuf),
    /// Switch the colour theme
    SetTheme(Theme),
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Application state
pub struct AppState {
    /// The cage, bound to `matrix`
    pub widget: CageWidget,
    /// Matrix property owned by the editor
    pub matrix: SharedMatrixProperty,
    /// Cage and viewport colours
    pub renderer_config: RendererConfig,
    /// Active theme
    pub theme: Theme,
    /// Resolve hover through pick ids and show the picking channel
    pub picking_mode: bool,
    /// Last error or notice shown in the properties panel
    pub status: Option<String>,
    /// Path typed in the preset field
    pub preset_path: String,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Create a state with a cage bound to an identity matrix
    pub fn new(config: CageConfig) -> Self {
        let matrix = SharedMatrixProperty::new(Mat4::IDENTITY);
        let mut widget = CageWidget::new(config);
        if let Err(e) = widget.bind(Box::new(matrix.clone())) {
            tracing::error!("Failed to bind cage matrix: {}", e);
        }

        Self {
            widget,
            matrix,
            renderer_config: RendererConfig::dark(),
            theme: Theme::Dark,
            picking_mode: false,
            status: None,
            preset_path: "cage.ron".to_string(),
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action for the next frame
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take all pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Write the matrix from the editor side and let the cage re-read it
    pub fn set_matrix(&mut self, matrix: Mat4) {
        if self.widget.is_dragging() {
            tracing::warn!("Ignoring matrix edit while the cage is being dragged");
            return;
        }
        self.matrix.set_matrix(matrix);
        if let Err(e) = self.widget.property_update() {
            tracing::error!("Failed to refresh cage matrix: {}", e);
            self.status = Some(e.to_string());
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_cage_config())
    }
}

/// Shared application state
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create shared state
pub fn create_shared_state(config: CageConfig) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(config)))
}

/// Cage shown when no preset is given, sized in viewport points
pub fn default_cage_config() -> CageConfig {
    CageConfig::new(
        Vec2::new(240.0, 160.0),
        TransformFlags::TRANSLATE | TransformFlags::SCALE | TransformFlags::ROTATE,
    )
    .unwrap_or_default()
}
