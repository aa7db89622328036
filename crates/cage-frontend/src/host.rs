//! egui host for the cage
//!
//! The viewport shows the cage's parent space centred in the panel, y up,
//! scaled by a zoom factor in points per unit.

use glam::{Mat4, Vec2, Vec3};

use cage_core::{CageHost, CursorHint, RegionProjector};

/// Map the cage's parent space to viewport points
pub fn region_from_space(viewport_size: Vec2, points_per_unit: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(viewport_size.x * 0.5, viewport_size.y * 0.5, 0.0))
        * Mat4::from_scale(Vec3::new(points_per_unit, -points_per_unit, 1.0))
}

/// Host services backed by an egui context
pub struct EguiHost {
    projector: RegionProjector,
    ctx: egui::Context,
}

impl EguiHost {
    /// Create a host for a viewport of `viewport_size` points
    pub fn new(ctx: egui::Context, viewport_size: Vec2, points_per_unit: f32) -> Self {
        Self {
            projector: RegionProjector::new(region_from_space(viewport_size, points_per_unit)),
            ctx,
        }
    }

    /// Projector used for pointer events and drawing
    pub fn projector(&self) -> &RegionProjector {
        &self.projector
    }
}

impl CageHost for EguiHost {
    fn project_2d(&self, window: Vec2, matrix_offset: &Mat4) -> Option<Vec2> {
        self.projector.window_to_local(window, matrix_offset)
    }

    fn tag_redraw(&mut self) {
        self.ctx.request_repaint();
    }

    fn add_mousemove(&mut self) {
        // egui re-runs hover on the next frame, a repaint is enough
        self.ctx.request_repaint();
    }
}

/// egui cursor for a cage cursor hint
pub fn cursor_icon(hint: CursorHint, dragging: bool) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Hand if dragging => egui::CursorIcon::Grabbing,
        CursorHint::Hand => egui::CursorIcon::Grab,
        CursorHint::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
        CursorHint::ResizeVertical => egui::CursorIcon::ResizeVertical,
        CursorHint::AllScroll => egui::CursorIcon::AllScroll,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
    }
}
