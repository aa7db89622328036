//! Cage Editor main entry point
//!
//! Usage: `cage-editor [preset.ron]`

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cage_frontend=debug,cage_core=debug,cage_renderer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cage Editor");

    let config = match std::env::args().nth(1) {
        Some(path) => match cage_core::CageConfig::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded cage preset from {}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to load cage preset {}: {}", path, e);
                cage_frontend::state::default_cage_config()
            }
        },
        None => cage_frontend::state::default_cage_config(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Cage Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "cage-editor",
        native_options,
        Box::new(move |cc| Ok(Box::new(cage_frontend::CageEditorApp::new(cc, config)))),
    )
}
