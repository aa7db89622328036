//! Global constants for cage-core

/// Number of margin widths that fit across a cage side.
///
/// The handle margin is `side / RESIZER_WIDTH`, aspect-corrected so both
/// margins match the shorter side.
pub const RESIZER_WIDTH: f32 = 20.0;

/// Name of the target property the cage drives
pub const MATRIX_PROPERTY: &str = "matrix";

/// Number of floats in the bound matrix property
pub const MATRIX_LEN: usize = 16;

/// Default cage dimensions (width, height)
pub const DEFAULT_DIMENSIONS: [f32; 2] = [1.0, 1.0];

/// Bits reserved for the part code on the picking channel
pub const PICK_PART_BITS: u32 = 4;
