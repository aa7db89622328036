//! Cage geometry
//!
//! Pure functions deriving the cage's handle regions and scale pivots from a
//! [`CageConfig`]. Everything is expressed in the cage's local space, where
//! the rectangle spans `[-half_size, half_size]`.

use glam::{BVec2, Vec2};

use crate::config::CageConfig;
use crate::part::CagePart;

/// Axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CageRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl CageRect {
    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its center and half extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Whether the point lies inside or on the boundary
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Scale pivot derived from the dragged handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePivot {
    /// Pivot in normalized `[-0.5, 0.5]` corner space
    pub point: Vec2,
    /// Axes that are locked and must not scale
    pub constrain_axis: BVec2,
}

/// Look up the pivot for a scale handle.
///
/// The pivot is the edge or corner opposite the grabbed handle. Edge handles
/// lock the axis running along the edge; corner handles leave both free.
pub fn pivot_for_scale_part(part: CagePart) -> Result<ScalePivot, GeometryError> {
    let (x, y, constrain_x, constrain_y) = match part {
        CagePart::ScaleMinX => (0.5, 0.0, false, true),
        CagePart::ScaleMaxX => (-0.5, 0.0, false, true),
        CagePart::ScaleMinY => (0.0, 0.5, true, false),
        CagePart::ScaleMaxY => (0.0, -0.5, true, false),
        CagePart::ScaleMinXMinY => (0.5, 0.5, false, false),
        CagePart::ScaleMinXMaxY => (0.5, -0.5, false, false),
        CagePart::ScaleMaxXMinY => (-0.5, 0.5, false, false),
        CagePart::ScaleMaxXMaxY => (-0.5, -0.5, false, false),
        other => return Err(GeometryError::NotAScalePart(other)),
    };
    Ok(ScalePivot {
        point: Vec2::new(x, y),
        constrain_axis: BVec2::new(constrain_x, constrain_y),
    })
}

/// How an outline's points are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    /// Open polyline
    Strip,
    /// Closed polyline
    Loop,
    /// Filled convex polygon (selection only)
    Fan,
}

/// Outline of a single interactive part
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub kind: OutlineKind,
    pub points: Vec<Vec2>,
}

/// Derived cage measurements shared by hit-testing and drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CageMetrics {
    pub half_size: Vec2,
    pub margin: Vec2,
}

impl CageMetrics {
    /// Measure a cage configuration
    pub fn from_config(config: &CageConfig) -> Self {
        Self {
            half_size: config.half_size(),
            margin: config.margin(),
        }
    }

    /// Inner area picked for translation, inset by the margin on all sides
    pub fn translate_rect(&self) -> CageRect {
        CageRect::new(
            -self.half_size + self.margin,
            self.half_size - self.margin,
        )
    }

    /// Strip along the left edge spanning the full height
    pub fn xmin_strip(&self) -> CageRect {
        let h = self.half_size;
        CageRect::new(
            Vec2::new(-h.x, -h.y),
            Vec2::new(-h.x + self.margin.x, h.y),
        )
    }

    /// Strip along the right edge spanning the full height
    pub fn xmax_strip(&self) -> CageRect {
        let h = self.half_size;
        CageRect::new(Vec2::new(h.x - self.margin.x, -h.y), Vec2::new(h.x, h.y))
    }

    /// Strip along the bottom edge spanning the full width
    pub fn ymin_strip(&self) -> CageRect {
        let h = self.half_size;
        CageRect::new(
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y + self.margin.y),
        )
    }

    /// Strip along the top edge spanning the full width
    pub fn ymax_strip(&self) -> CageRect {
        let h = self.half_size;
        CageRect::new(Vec2::new(-h.x, h.y - self.margin.y), Vec2::new(h.x, h.y))
    }

    /// Center of the rotate handle, one margin above the top edge
    pub fn rotate_center(&self) -> Vec2 {
        Vec2::new(0.0, self.half_size.y + self.margin.y)
    }

    /// Rotate handle square
    pub fn rotate_rect(&self) -> CageRect {
        CageRect::from_center_half_extents(self.rotate_center(), self.margin / 2.0)
    }

    /// Corner ticks: two segments per corner, each one margin long.
    pub fn corner_ticks(&self) -> [[Vec2; 2]; 8] {
        let Vec2 { x: hx, y: hy } = self.half_size;
        let Vec2 { x: mx, y: my } = self.margin;
        [
            [Vec2::new(-hx, -hy + my), Vec2::new(-hx, -hy)],
            [Vec2::new(-hx, -hy), Vec2::new(-hx + mx, -hy)],
            [Vec2::new(hx, -hy + my), Vec2::new(hx, -hy)],
            [Vec2::new(hx, -hy), Vec2::new(hx - mx, -hy)],
            [Vec2::new(hx, hy - my), Vec2::new(hx, hy)],
            [Vec2::new(hx, hy), Vec2::new(hx - mx, hy)],
            [Vec2::new(-hx, hy - my), Vec2::new(-hx, hy)],
            [Vec2::new(-hx, hy), Vec2::new(-hx + mx, hy)],
        ]
    }

    /// Outline drawn for a part, `None` for [`CagePart::None`]
    pub fn interaction_outline(&self, part: CagePart) -> Option<Outline> {
        let Vec2 { x: sx, y: sy } = self.half_size;
        let Vec2 { x: mx, y: my } = self.margin;
        let v = Vec2::new;

        let strip = |points: [Vec2; 3]| Outline {
            kind: OutlineKind::Strip,
            points: points.to_vec(),
        };

        let outline = match part {
            CagePart::ScaleMinX => strip([v(-sx + mx, -sy), v(-sx, -sy), v(-sx, sy)]),
            CagePart::ScaleMaxX => strip([v(sx - mx, -sy), v(sx, -sy), v(sx, sy)]),
            CagePart::ScaleMinY => strip([v(-sx, -sy + my), v(-sx, -sy), v(sx, -sy)]),
            CagePart::ScaleMaxY => strip([v(-sx, sy - my), v(-sx, sy), v(sx, sy)]),

            CagePart::ScaleMinXMinY => {
                strip([v(-sx + mx, -sy), v(-sx + mx, -sy + my), v(-sx, -sy + my)])
            }
            CagePart::ScaleMinXMaxY => {
                strip([v(-sx + mx, sy), v(-sx + mx, sy - my), v(-sx, sy - my)])
            }
            CagePart::ScaleMaxXMinY => {
                strip([v(sx - mx, -sy), v(sx - mx, -sy + my), v(sx, -sy + my)])
            }
            CagePart::ScaleMaxXMaxY => {
                strip([v(sx - mx, sy), v(sx - mx, sy - my), v(sx, sy - my)])
            }

            CagePart::Rotate => {
                let r = self.rotate_rect();
                Outline {
                    kind: OutlineKind::Loop,
                    points: vec![
                        v(r.min.x, r.min.y),
                        v(r.min.x, r.max.y),
                        v(r.max.x, r.max.y),
                        v(r.max.x, r.min.y),
                    ],
                }
            }

            // Only used for selection, never displayed.
            CagePart::Translate => Outline {
                kind: OutlineKind::Fan,
                points: vec![v(-sx, -sy), v(-sx, sy), v(sx, sy), v(sx, -sy)],
            },

            CagePart::None => return None,
        };
        Some(outline)
    }
}

/// Geometry errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("Part {0:?} is not a scale handle and has no pivot")]
    NotAScalePart(CagePart),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformFlags;

    fn metrics(w: f32, h: f32) -> CageMetrics {
        let config = CageConfig::new(Vec2::new(w, h), TransformFlags::all()).unwrap();
        CageMetrics::from_config(&config)
    }

    #[test]
    fn test_pivots_lie_on_half_grid() {
        for part in CagePart::SCALE_PARTS {
            let pivot = pivot_for_scale_part(part).unwrap();
            for c in pivot.point.to_array() {
                assert!([-0.5, 0.0, 0.5].contains(&c), "{:?} -> {}", part, c);
            }
        }
    }

    #[test]
    fn test_pivot_constraints() {
        for part in CagePart::SCALE_PARTS {
            let pivot = pivot_for_scale_part(part).unwrap();
            let locked = pivot.constrain_axis.x as u32 + pivot.constrain_axis.y as u32;
            if part.is_corner() {
                assert_eq!(locked, 0, "{:?}", part);
            } else {
                assert_eq!(locked, 1, "{:?}", part);
            }
        }

        // Vertical edges lock y, horizontal edges lock x
        let min_x = pivot_for_scale_part(CagePart::ScaleMinX).unwrap();
        assert_eq!(min_x.constrain_axis, BVec2::new(false, true));
        let max_y = pivot_for_scale_part(CagePart::ScaleMaxY).unwrap();
        assert_eq!(max_y.constrain_axis, BVec2::new(true, false));
    }

    #[test]
    fn test_pivot_is_opposite_the_handle() {
        let pivot = pivot_for_scale_part(CagePart::ScaleMaxXMaxY).unwrap();
        assert_eq!(pivot.point, Vec2::new(-0.5, -0.5));
        let pivot = pivot_for_scale_part(CagePart::ScaleMinX).unwrap();
        assert_eq!(pivot.point, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_pivot_rejects_non_scale_parts() {
        for part in [CagePart::None, CagePart::Translate, CagePart::Rotate] {
            assert!(matches!(
                pivot_for_scale_part(part),
                Err(GeometryError::NotAScalePart(p)) if p == part
            ));
        }
    }

    #[test]
    fn test_rect_bounds_are_inclusive() {
        let rect = CageRect::new(Vec2::ZERO, Vec2::ONE);
        assert!(rect.contains(Vec2::ZERO));
        assert!(rect.contains(Vec2::ONE));
        assert!(!rect.contains(Vec2::new(1.01, 0.5)));
    }

    #[test]
    fn test_rotate_handle_sits_above_top_edge() {
        let m = metrics(2.0, 2.0);
        let rect = m.rotate_rect();
        assert_eq!(rect.min.x, -rect.max.x);
        assert!(rect.min.y > m.half_size.y);
    }

    #[test]
    fn test_corner_ticks_touch_corners() {
        let m = metrics(4.0, 2.0);
        let ticks = m.corner_ticks();
        assert_eq!(ticks.len(), 8);
        for pair in ticks.chunks(2) {
            // Both segments of a corner share the corner vertex
            assert_eq!(pair[0][1], pair[1][0]);
            assert_eq!(pair[0][1].abs(), m.half_size);
        }
    }

    #[test]
    fn test_outlines_per_part() {
        let m = metrics(2.0, 2.0);
        for part in CagePart::SCALE_PARTS {
            let outline = m.interaction_outline(part).unwrap();
            assert_eq!(outline.kind, OutlineKind::Strip);
            assert_eq!(outline.points.len(), 3);
        }
        assert_eq!(
            m.interaction_outline(CagePart::Rotate).unwrap().kind,
            OutlineKind::Loop
        );
        let translate = m.interaction_outline(CagePart::Translate).unwrap();
        assert_eq!(translate.kind, OutlineKind::Fan);
        assert_eq!(translate.points.len(), 4);
        assert!(m.interaction_outline(CagePart::None).is_none());
    }
}
