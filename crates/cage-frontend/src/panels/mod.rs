//! UI panels

mod properties;
mod viewport;

pub use properties::PropertiesPanel;
pub use viewport::ViewportPanel;

use crate::state::{SharedAppState, SharedViewportState};

/// GPU handles for panels that render offscreen
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub render_state: &'a egui_wgpu::RenderState,
    pub viewport_state: &'a SharedViewportState,
}

/// Everything a panel can reach during a frame
#[derive(Clone, Copy)]
pub struct PanelContext<'a> {
    pub app_state: &'a SharedAppState,
    /// `None` when eframe runs without wgpu
    pub render: Option<RenderContext<'a>>,
}

/// A panel of the cage editor
pub trait Panel {
    /// Draw the panel, falling back to a placeholder when it needs the GPU
    /// and `ctx.render` is missing
    fn show(&mut self, ui: &mut egui::Ui, ctx: PanelContext<'_>);
}
