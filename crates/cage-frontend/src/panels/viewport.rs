//! Cage viewport panel

use glam::{Mat4, Vec2, Vec3};

use cage_core::{CageEvent, CagePart, CageWidget, InteractionError};
use cage_renderer::{CageStyle, PresentMode, Triangle, build_draw_list, resolve_part};

use crate::host::{EguiHost, cursor_icon};
use crate::panels::{Panel, PanelContext, RenderContext};
use crate::state::SharedAppState;

/// Host id the cage's pick ids are packed with
const PICK_BASE_ID: u32 = 1;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;

/// Viewport showing the cage in its parent space
pub struct ViewportPanel {
    points_per_unit: f32,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            points_per_unit: 1.0,
        }
    }

    /// Forward this frame's pointer input to the cage
    fn handle_input(
        &self,
        ui: &egui::Ui,
        response: &egui::Response,
        widget: &mut CageWidget,
        host: &mut EguiHost,
        picking: Option<&PickContext>,
    ) {
        let origin = response.rect.min;
        let to_local = |pos: egui::Pos2| Vec2::new(pos.x - origin.x, pos.y - origin.y);

        let result = if widget.is_dragging() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            widget.handle_event(CageEvent::Cancel, host)
        } else if response.drag_started_by(egui::PointerButton::Primary) {
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            match press.map(to_local) {
                Some(pos) => match picking {
                    // Resolve through pick ids, then start the drag on that part
                    Some(pick) => {
                        widget.set_highlight_part(pick.part_at(pos));
                        widget.invoke(pos, &*host)
                    }
                    None => widget.handle_event(CageEvent::Press(pos), host),
                },
                None => return,
            }
        } else if response.drag_stopped_by(egui::PointerButton::Primary) && widget.is_dragging() {
            widget.handle_event(CageEvent::Release, host)
        } else if widget.is_dragging() {
            match response.interact_pointer_pos() {
                Some(pos) => widget.handle_event(CageEvent::Move(to_local(pos)), host),
                None => return,
            }
        } else {
            match response.hover_pos() {
                Some(pos) => {
                    let pos = to_local(pos);
                    match picking {
                        Some(pick) => widget.set_highlight_part(pick.part_at(pos)),
                        None => {
                            widget.update_highlight(pos, &*host);
                        }
                    }
                }
                None => widget.set_highlight_part(CagePart::None),
            }
            return;
        };

        match result {
            Ok(status) => tracing::trace!(?status, "Cage event handled"),
            Err(InteractionError::NothingHighlighted) => {}
            Err(e) => tracing::debug!("Cage event rejected: {}", e),
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick buffer of the cage as drawn at the start of the frame
struct PickContext {
    triangles: Vec<Triangle>,
    pixels_per_point: f32,
}

impl PickContext {
    fn new(
        widget: &CageWidget,
        screen_from_local: Mat4,
        style: &CageStyle,
        pixels_per_point: f32,
    ) -> Self {
        let list = build_draw_list(
            widget,
            screen_from_local,
            style,
            PresentMode::Picking {
                base_id: PICK_BASE_ID,
            },
            pixels_per_point,
        );
        Self {
            triangles: list.tessellate(),
            pixels_per_point,
        }
    }

    /// Part under a point given in viewport points
    fn part_at(&self, pos: Vec2) -> CagePart {
        resolve_part(&self.triangles, pos * self.pixels_per_point, PICK_BASE_ID)
    }
}

/// Scale viewport points to texture pixels
fn pixels_from_points(pixels_per_point: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(pixels_per_point, pixels_per_point, 1.0))
}

impl Panel for ViewportPanel {
    fn show(&mut self, ui: &mut egui::Ui, ctx: PanelContext<'_>) {
        match ctx.render {
            Some(render) => self.show_rendered(ui, ctx.app_state, render),
            None => show_placeholder(ui),
        }
    }
}

/// Shown when no wgpu device is available
fn show_placeholder(ui: &mut egui::Ui) {
    let available_size = ui.available_size();
    let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());

    painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
    painter.text(
        response.rect.center(),
        egui::Align2::CENTER_CENTER,
        "Cage Viewport\n(WebGPU not available)",
        egui::FontId::proportional(16.0),
        egui::Color32::GRAY,
    );
}

impl ViewportPanel {
    fn show_rendered(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render: RenderContext<'_>,
    ) {
        let RenderContext {
            render_state,
            viewport_state,
        } = render;

        // Toolbar
        ui.horizontal(|ui| {
            let mut app = app_state.lock();
            ui.checkbox(&mut app.picking_mode, "Picking");
            ui.separator();
            ui.label("Zoom:");
            ui.add(
                egui::Slider::new(&mut self.points_per_unit, MIN_ZOOM..=MAX_ZOOM)
                    .logarithmic(true),
            );
            ui.separator();
            ui.label(format!("Hover: {}", app.widget.highlight_part().name()));
        });

        let available_size = ui.available_size();
        if available_size.x < 1.0 || available_size.y < 1.0 {
            return;
        }

        let (rect, response) = ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                self.points_per_unit =
                    (self.points_per_unit * (1.0 + scroll_delta * 0.001)).clamp(MIN_ZOOM, MAX_ZOOM);
            }
        }

        let pixels_per_point = ui.ctx().pixels_per_point();
        let size = Vec2::new(rect.width(), rect.height());
        let mut host = EguiHost::new(ui.ctx().clone(), size, self.points_per_unit);

        let mut app = app_state.lock();
        let style = app.renderer_config.cage.clone();
        let picking_mode = app.picking_mode;

        let screen_from_local = |widget: &CageWidget, host: &EguiHost| {
            pixels_from_points(pixels_per_point)
                * host.projector().window_from_local(&widget.matrix_offset())
        };

        let pick = picking_mode.then(|| {
            PickContext::new(
                &app.widget,
                screen_from_local(&app.widget, &host),
                &style,
                pixels_per_point,
            )
        });
        self.handle_input(ui, &response, &mut app.widget, &mut host, pick.as_ref());

        if response.hovered() || app.widget.is_dragging() {
            ui.ctx()
                .set_cursor_icon(cursor_icon(app.widget.cursor(), app.widget.is_dragging()));
        }

        let mode = if picking_mode {
            PresentMode::Picking {
                base_id: PICK_BASE_ID,
            }
        } else {
            PresentMode::Normal
        };
        let list = build_draw_list(
            &app.widget,
            screen_from_local(&app.widget, &host),
            &style,
            mode,
            pixels_per_point,
        );
        let clear_color = app.renderer_config.viewport.background_color;
        drop(app);

        let width = (rect.width() * pixels_per_point).round() as u32;
        let height = (rect.height() * pixels_per_point).round() as u32;

        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render(&list.vertices(), clear_color);
            tex_id
        };

        ui.painter().image(
            texture_id,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}
