//! Cage Manipulator Core
//!
//! Host-independent logic of the 2D cage manipulator, a rectangular widget
//! that translates and scales a bound transform by dragging handles placed
//! around its bounds:
//! - Config: dimensions and enabled transform flags
//! - Geometry: margins, hit rectangles, scale pivots and handle outlines
//! - Hit-testing: local point to [`CagePart`]
//! - Interaction: the modal drag session driving the offset matrix
//! - Binding: the external 16-float `"matrix"` target property

pub mod binding;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod geometry;
pub mod interaction;
pub mod part;
pub mod projection;

pub use binding::*;
pub use config::*;
pub use constants::*;
pub use cursor::*;
pub use geometry::*;
pub use hit_test::*;
pub use interaction::*;
pub use part::*;
pub use projection::*;
