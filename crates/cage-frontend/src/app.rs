//! Main application module

use std::sync::Arc;

use parking_lot::Mutex;

use cage_core::CageConfig;

use crate::actions::dispatch_action;
use crate::panels::{Panel, PanelContext, PropertiesPanel, RenderContext, ViewportPanel};
use crate::state::{SharedAppState, SharedViewportState, Theme, ViewportState, create_shared_state};

/// Main application
pub struct CageEditorApp {
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
    viewport_panel: ViewportPanel,
    properties_panel: PropertiesPanel,
}

impl CageEditorApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>, config: CageConfig) -> Self {
        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = render_state.device.clone();
            let queue = render_state.queue.clone();
            let format = render_state.target_format;

            Arc::new(Mutex::new(ViewportState::new(device, queue, format)))
        });
        if viewport_state.is_none() {
            tracing::warn!("WGPU render state unavailable, the viewport will not draw");
        }

        Self {
            app_state: create_shared_state(config),
            viewport_state,
            viewport_panel: ViewportPanel::new(),
            properties_panel: PropertiesPanel::new(),
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        for action in actions {
            dispatch_action(action, &self.app_state);
        }
    }
}

impl eframe::App for CageEditorApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Process pending actions
        self.process_actions();

        let visuals = match self.app_state.lock().theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);

        let render = match (frame.wgpu_render_state(), &self.viewport_state) {
            (Some(render_state), Some(viewport_state)) => Some(RenderContext {
                render_state,
                viewport_state,
            }),
            _ => None,
        };
        let panel_ctx = PanelContext {
            app_state: &self.app_state,
            render,
        };

        egui::SidePanel::right("properties_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.properties_panel.show(ui, panel_ctx);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewport_panel.show(ui, panel_ctx);
        });
    }
}
