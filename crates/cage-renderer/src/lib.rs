//! Cage Manipulator Renderer
//!
//! Presentation of the 2D cage manipulator.
//!
//! # Module Structure
//!
//! ```text
//! cage-renderer/
//! ├── config.rs         # Cage style and viewport theme
//! ├── draw_context.rs   # Draw lists, scoped draw state, tessellation
//! ├── presentation.rs   # Normal and picking draws of a cage
//! ├── picking.rs        # Pick id resolution
//! ├── sub_renderers/    # wgpu renderer for the tessellated cage
//! └── vertex.rs         # Vertex formats
//! ```

pub mod config;
pub mod constants;
pub mod draw_context;
pub mod picking;
pub mod presentation;
pub mod sub_renderers;
pub mod vertex;

pub use config::{CageStyle, RendererConfig, StyleError, ViewportConfig};
pub use draw_context::{
    DrawCommand, DrawList, DrawScope, DrawState, PrimitiveKind, Program, Triangle,
};
pub use picking::{id_to_color, resolve_part, resolve_pick};
pub use presentation::{PresentMode, build_draw_list, render_for_picking, render_normal};
pub use sub_renderers::{CageRenderer, ScreenUniform};
pub use vertex::CageVertex;
