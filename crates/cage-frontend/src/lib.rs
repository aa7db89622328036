//! Cage Editor Frontend
//!
//! egui-based host for the 2D cage manipulator: a viewport that forwards
//! pointer events to the cage and a properties panel that edits its
//! configuration and the bound matrix.

pub mod actions;
pub mod app;
pub mod host;
pub mod panels;
pub mod state;

// Re-exports for convenience
pub use app::CageEditorApp;
pub use state::{AppAction, AppState, SharedAppState};
