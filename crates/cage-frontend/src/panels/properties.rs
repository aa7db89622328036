//! Properties panel for the cage and its bound matrix

use std::path::PathBuf;

use glam::{Mat4, Vec2, Vec3};

use cage_core::TransformFlags;

use crate::panels::{Panel, PanelContext};
use crate::state::{AppAction, Theme};

/// Properties panel
pub struct PropertiesPanel;

impl PropertiesPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Labeled pair of drag values, returns true when either changed
fn vector2_row(ui: &mut egui::Ui, label: &str, value: &mut [f32; 2], speed: f32) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        for (axis, v) in ["X", "Y"].iter().zip(value.iter_mut()) {
            ui.label(*axis);
            changed |= ui.add(egui::DragValue::new(v).speed(speed)).changed();
        }
    });
    changed
}

const FLAG_LABELS: [(TransformFlags, &str); 4] = [
    (TransformFlags::TRANSLATE, "Translate"),
    (TransformFlags::SCALE, "Scale"),
    (TransformFlags::SCALE_UNIFORM, "Uniform scale"),
    (TransformFlags::ROTATE, "Rotate"),
];

impl Panel for PropertiesPanel {
    fn show(&mut self, ui: &mut egui::Ui, ctx: PanelContext<'_>) {
        let mut state = ctx.app_state.lock();
        let config = *state.widget.config();
        let dragging = state.widget.is_dragging();

        ui.heading("Cage");

        let mut dimensions = config.dimensions().to_array();
        if vector2_row(ui, "Size", &mut dimensions, 1.0) {
            state.queue_action(AppAction::SetDimensions(Vec2::from_array(dimensions)));
        }

        let mut flags = config.transform;
        let mut flags_changed = false;
        for (flag, label) in FLAG_LABELS {
            let mut enabled = flags.contains(flag);
            if ui.checkbox(&mut enabled, label).changed() {
                flags.set(flag, enabled);
                flags_changed = true;
            }
        }
        if flags_changed {
            state.queue_action(AppAction::SetTransformFlags(flags));
        }

        ui.separator();
        ui.heading("Matrix");

        // Matrix edits are locked while a drag owns it
        let matrix = state.matrix.matrix();
        ui.add_enabled_ui(!dragging, |ui| {
            let (scale, _, translation) = matrix.to_scale_rotation_translation();
            let mut position = [translation.x, translation.y];
            let mut scale_xy = [scale.x, scale.y];

            let position_changed = vector2_row(ui, "Position", &mut position, 0.5);
            let scale_changed = vector2_row(ui, "Scale", &mut scale_xy, 0.01);
            if position_changed || scale_changed {
                let mut edited = matrix;
                edited.w_axis.x = position[0];
                edited.w_axis.y = position[1];
                if scale_changed {
                    edited = Mat4::from_translation(Vec3::new(position[0], position[1], translation.z))
                        * Mat4::from_scale(Vec3::new(scale_xy[0], scale_xy[1], scale.z));
                }
                state.queue_action(AppAction::SetMatrix(edited));
            }

            if ui.button("Reset").clicked() {
                state.queue_action(AppAction::ResetMatrix);
            }
        });

        egui::Grid::new("cage_matrix_grid")
            .striped(true)
            .show(ui, |ui| {
                for row in 0..4 {
                    for col in 0..4 {
                        ui.monospace(format!("{:>9.3}", matrix.col(col)[row]));
                    }
                    ui.end_row();
                }
            });

        ui.separator();
        ui.heading("Interaction");
        ui.label(format!("Highlight: {}", state.widget.highlight_part().name()));
        match state.widget.session() {
            Some(session) => ui.label(format!("Dragging: {}", session.part.name())),
            None => ui.weak("Idle"),
        };

        ui.separator();
        ui.heading("Preferences");

        let mut theme = state.theme;
        ui.horizontal(|ui| {
            ui.label("Theme:");
            ui.selectable_value(&mut theme, Theme::Dark, "Dark");
            ui.selectable_value(&mut theme, Theme::Light, "Light");
        });
        if theme != state.theme {
            state.queue_action(AppAction::SetTheme(theme));
        }

        ui.horizontal(|ui| {
            ui.label("Preset:");
            ui.text_edit_singleline(&mut state.preset_path);
        });
        ui.horizontal(|ui| {
            let path = PathBuf::from(state.preset_path.trim());
            if ui.button("Load").clicked() {
                state.queue_action(AppAction::LoadPreset(path.clone()));
            }
            if ui.button("Save").clicked() {
                state.queue_action(AppAction::SavePreset(path));
            }
        });

        if let Some(status) = &state.status {
            ui.separator();
            ui.weak(status.as_str());
        }
    }
}
