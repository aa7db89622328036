//! Vertex formats
//!
//! Cage geometry is tessellated on the CPU into screen-space triangles, so a
//! single position + colour vertex covers every primitive.

/// Creates a vertex attribute with the offset calculated from the struct field.
///
/// # Example
///
/// ```ignore
/// const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
///     vertex_attr!(CageVertex, position, 0, Float32x2),
///     vertex_attr!(CageVertex, color, 1, Float32x4),
/// ];
/// ```
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Screen-space vertex with a flat colour
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CageVertex {
    /// Position in pixels, origin at the top-left of the target
    pub position: [f32; 2],
    /// Vertex color (RGBA)
    pub color: [f32; 4],
}

impl CageVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(CageVertex, position, 0, Float32x2),
        vertex_attr!(CageVertex, color, 1, Float32x4),
    ];

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}
