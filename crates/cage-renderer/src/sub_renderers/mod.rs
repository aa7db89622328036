//! GPU sub-renderers
//!
//! - [`cage::CageRenderer`]: tessellated cage handles and picking ids

pub mod cage;

pub use cage::{CageRenderer, ScreenUniform};
