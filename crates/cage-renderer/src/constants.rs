//! Global constants for cage-renderer

/// Cage drawing constants
pub mod cage {
    /// Extra width of the dark outline drawn under handle lines, in pixels
    pub const OUTLINE_EXTRA_WIDTH: f32 = 3.0;
    /// Initial vertex buffer capacity in vertices
    pub const INITIAL_VERTEX_CAPACITY: u64 = 1024;
}

/// Viewport constants
pub mod viewport {
    /// MSAA sample count for the cage pass
    pub const SAMPLE_COUNT: u32 = 1;
}
