//! Action handling
//!
//! Actions are queued in [`AppState`](crate::state::AppState) by the panels
//! and processed at the start of each frame.

use glam::Mat4;

use cage_core::CageConfig;
use cage_renderer::RendererConfig;

use crate::state::{AppAction, SharedAppState, Theme};

/// Dispatch an action
pub fn dispatch_action(action: AppAction, app_state: &SharedAppState) {
    let mut state = app_state.lock();
    match action {
        AppAction::SetDimensions(dimensions) => {
            if let Err(e) = state.widget.set_dimensions(dimensions) {
                tracing::warn!("Rejected cage dimensions: {}", e);
                state.status = Some(e.to_string());
            }
        }
        AppAction::SetTransformFlags(flags) => {
            state.widget.set_transform_flags(flags);
        }
        AppAction::SetMatrix(matrix) => {
            state.set_matrix(matrix);
        }
        AppAction::ResetMatrix => {
            state.set_matrix(Mat4::IDENTITY);
        }
        AppAction::LoadPreset(path) => match CageConfig::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded cage preset from {:?}", path);
                state.widget.set_config(config);
                state.status = Some(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to load cage preset: {}", e);
                state.status = Some(e.to_string());
            }
        },
        AppAction::SavePreset(path) => match state.widget.config().save(&path) {
            Ok(()) => {
                tracing::info!("Saved cage preset to {:?}", path);
                state.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to save cage preset: {}", e);
                state.status = Some(e.to_string());
            }
        },
        AppAction::SetTheme(theme) => {
            state.theme = theme;
            state.renderer_config = match theme {
                Theme::Dark => RendererConfig::dark(),
                Theme::Light => RendererConfig::light(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, create_shared_state, default_cage_config};
    use cage_core::TransformFlags;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_invalid_dimensions_keep_config() {
        let app_state = create_shared_state(default_cage_config());
        dispatch_action(AppAction::SetDimensions(Vec2::new(-1.0, 5.0)), &app_state);

        let state = app_state.lock();
        assert_eq!(state.widget.config().dimensions(), Vec2::new(240.0, 160.0));
        assert!(state.status.is_some());
    }

    #[test]
    fn test_reset_matrix_updates_binding_and_cage() {
        let app_state = create_shared_state(default_cage_config());
        dispatch_action(
            AppAction::SetMatrix(Mat4::from_translation(Vec3::new(3.0, 4.0, 0.0))),
            &app_state,
        );
        dispatch_action(AppAction::ResetMatrix, &app_state);

        let state = app_state.lock();
        assert_eq!(state.matrix.matrix(), Mat4::IDENTITY);
        assert_eq!(state.widget.matrix_offset(), Mat4::IDENTITY);
    }

    #[test]
    fn test_preset_round_trip_through_actions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.ron");

        let app_state = create_shared_state(default_cage_config());
        dispatch_action(
            AppAction::SetTransformFlags(TransformFlags::SCALE_UNIFORM),
            &app_state,
        );
        dispatch_action(AppAction::SavePreset(path.clone()), &app_state);

        let other = std::sync::Arc::new(parking_lot::Mutex::new(AppState::default()));
        dispatch_action(AppAction::LoadPreset(path), &other);
        assert_eq!(
            other.lock().widget.config().transform,
            TransformFlags::SCALE_UNIFORM
        );
    }

    #[test]
    fn test_theme_switch() {
        let app_state = create_shared_state(default_cage_config());
        dispatch_action(AppAction::SetTheme(Theme::Light), &app_state);
        assert_eq!(app_state.lock().renderer_config, RendererConfig::light());
    }
}
