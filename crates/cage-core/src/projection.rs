//! Window to cage-local projection
//!
//! Hosts map pointer positions into the cage's local space by inverting the
//! full transform `region_from_space * offset`. Projection fails when that
//! transform is degenerate, e.g. a cage scaled to zero.

use glam::{Mat4, Vec2, Vec3};

/// Smallest determinant treated as invertible
const MIN_DETERMINANT: f32 = 1e-12;

/// Projects window points into cage-local space for a flat 2D region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProjector {
    /// Maps the cage's parent space to window coordinates
    pub region_from_space: Mat4,
}

impl Default for RegionProjector {
    fn default() -> Self {
        Self {
            region_from_space: Mat4::IDENTITY,
        }
    }
}

impl RegionProjector {
    /// Create a projector from the region transform
    pub fn new(region_from_space: Mat4) -> Self {
        Self { region_from_space }
    }

    /// Full transform from cage-local space to window coordinates
    pub fn window_from_local(&self, matrix_offset: &Mat4) -> Mat4 {
        self.region_from_space * *matrix_offset
    }

    /// Map a local point to window coordinates
    pub fn local_to_window(&self, local: Vec2, matrix_offset: &Mat4) -> Vec2 {
        self.window_from_local(matrix_offset)
            .transform_point3(local.extend(0.0))
            .truncate()
    }

    /// Map a window point into local space, `None` if the transform is degenerate
    pub fn window_to_local(&self, window: Vec2, matrix_offset: &Mat4) -> Option<Vec2> {
        let matrix = self.window_from_local(matrix_offset);
        let det = matrix.determinant();
        if !det.is_finite() || det.abs() < MIN_DETERMINANT {
            return None;
        }
        let local = matrix
            .inverse()
            .transform_point3(Vec3::new(window.x, window.y, 0.0));
        local.is_finite().then(|| local.truncate())
    }
}
