//! Draw lists with scoped draw state
//!
//! Cage primitives are recorded in local space into a [`DrawList`] together
//! with the draw state active at the time (line width, program, pick id).
//! State can only be changed through a [`DrawScope`], which puts the previous
//! state back when it is dropped, so an early return never leaks a line width
//! or pick id into later primitives.
//!
//! The list is tessellated on the CPU into screen-space triangles. The same
//! triangles feed the GPU renderer and CPU picking.

use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec2};

use cage_core::{Outline, OutlineKind};

use crate::picking::id_to_color;
use crate::vertex::CageVertex;

/// Colour program a primitive is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Program {
    /// Primitive colour as recorded
    #[default]
    FlatColor,
    /// Colour replaced by the encoded pick id
    Picking,
}

/// Draw state captured with each primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    /// Line width in pixels
    pub line_width: f32,
    /// Colour program
    pub program: Program,
    /// Selection id attached to primitives
    pub pick_id: Option<u32>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            program: Program::FlatColor,
            pick_id: None,
        }
    }
}

/// How a command's points are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Independent segments, two points each
    Lines,
    /// Open polyline
    LineStrip,
    /// Closed polyline
    LineLoop,
    /// Filled convex polygon
    TriangleFan,
}

impl From<OutlineKind> for PrimitiveKind {
    fn from(kind: OutlineKind) -> Self {
        match kind {
            OutlineKind::Strip => PrimitiveKind::LineStrip,
            OutlineKind::Loop => PrimitiveKind::LineLoop,
            OutlineKind::Fan => PrimitiveKind::TriangleFan,
        }
    }
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Primitive type
    pub kind: PrimitiveKind,
    /// Points in cage-local space
    pub points: Vec<Vec2>,
    /// Colour (RGBA)
    pub color: [f32; 4],
    /// State active when the primitive was recorded
    pub state: DrawState,
}

/// Screen-space triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corners in pixels
    pub points: [Vec2; 3],
    /// Resolved colour (RGBA)
    pub color: [f32; 4],
    /// Selection id of the source primitive
    pub pick_id: Option<u32>,
}

impl Triangle {
    /// Whether `point` lies inside or on an edge, for either winding
    pub fn contains(&self, point: Vec2) -> bool {
        let [a, b, c] = self.points;
        let d1 = (b - a).perp_dot(point - a);
        let d2 = (c - b).perp_dot(point - b);
        let d3 = (a - c).perp_dot(point - c);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

/// Recorded cage primitives for one frame
#[derive(Debug, Clone)]
pub struct DrawList {
    screen_from_local: Mat4,
    state: DrawState,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list mapping local space to pixels with `screen_from_local`
    pub fn new(screen_from_local: Mat4) -> Self {
        Self {
            screen_from_local,
            state: DrawState::default(),
            commands: Vec::new(),
        }
    }

    /// Current draw state
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Open a scope whose state changes are undone when it drops
    pub fn scope(&mut self) -> DrawScope<'_> {
        let saved = self.state;
        DrawScope { list: self, saved }
    }

    /// Record independent segments
    pub fn lines(&mut self, segments: &[[Vec2; 2]], color: [f32; 4]) {
        let points = segments.iter().flatten().copied().collect();
        self.push(PrimitiveKind::Lines, points, color);
    }

    /// Record a part outline
    pub fn outline(&mut self, outline: &Outline, color: [f32; 4]) {
        self.push(outline.kind.into(), outline.points.clone(), color);
    }

    fn push(&mut self, kind: PrimitiveKind, points: Vec<Vec2>, color: [f32; 4]) {
        self.commands.push(DrawCommand {
            kind,
            points,
            color,
            state: self.state,
        });
    }

    /// Tessellate every command into pixel-space triangles, in draw order
    pub fn tessellate(&self) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for command in &self.commands {
            let points: Vec<Vec2> = command
                .points
                .iter()
                .map(|p| {
                    self.screen_from_local
                        .transform_point3(p.extend(0.0))
                        .truncate()
                })
                .collect();

            let color = match command.state.program {
                Program::FlatColor => command.color,
                Program::Picking => command.state.pick_id.map_or([0.0; 4], id_to_color),
            };
            let mut emit = |a: Vec2, b: Vec2, c: Vec2| {
                triangles.push(Triangle {
                    points: [a, b, c],
                    color,
                    pick_id: command.state.pick_id,
                });
            };

            let width = command.state.line_width;
            match command.kind {
                PrimitiveKind::Lines => {
                    for pair in points.chunks_exact(2) {
                        segment_quad(pair[0], pair[1], width, &mut emit);
                    }
                }
                PrimitiveKind::LineStrip => {
                    for pair in points.windows(2) {
                        segment_quad(pair[0], pair[1], width, &mut emit);
                    }
                }
                PrimitiveKind::LineLoop => {
                    for pair in points.windows(2) {
                        segment_quad(pair[0], pair[1], width, &mut emit);
                    }
                    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                        segment_quad(last, first, width, &mut emit);
                    }
                }
                PrimitiveKind::TriangleFan => {
                    if let Some((&hub, rest)) = points.split_first() {
                        for pair in rest.windows(2) {
                            emit(hub, pair[0], pair[1]);
                        }
                    }
                }
            }
        }
        triangles
    }

    /// Tessellate into a vertex stream for the GPU
    pub fn vertices(&self) -> Vec<CageVertex> {
        self.tessellate()
            .iter()
            .flat_map(|t| {
                t.points.map(|p| CageVertex {
                    position: p.to_array(),
                    color: t.color,
                })
            })
            .collect()
    }
}

/// Thick segment as two triangles with square caps
fn segment_quad(a: Vec2, b: Vec2, width: f32, emit: &mut impl FnMut(Vec2, Vec2, Vec2)) {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let half = width * 0.5;
    let normal = dir.perp() * half;
    let a = a - dir * half;
    let b = b + dir * half;
    emit(a + normal, b + normal, b - normal);
    emit(a + normal, b - normal, a - normal);
}

/// Draw state override, restored on drop
pub struct DrawScope<'a> {
    list: &'a mut DrawList,
    saved: DrawState,
}

impl DrawScope<'_> {
    /// Set the line width
    pub fn set_line_width(&mut self, width: f32) {
        self.list.state.line_width = width;
    }

    /// Set the colour program
    pub fn set_program(&mut self, program: Program) {
        self.list.state.program = program;
    }

    /// Attach a selection id to following primitives
    pub fn set_pick_id(&mut self, pick_id: Option<u32>) {
        self.list.state.pick_id = pick_id;
    }
}

impl Deref for DrawScope<'_> {
    type Target = DrawList;

    fn deref(&self) -> &DrawList {
        self.list
    }
}

impl DerefMut for DrawScope<'_> {
    fn deref_mut(&mut self) -> &mut DrawList {
        self.list
    }
}

impl Drop for DrawScope<'_> {
    fn drop(&mut self) {
        self.list.state = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scope_restores_state() {
        let mut list = DrawList::new(Mat4::IDENTITY);
        {
            let mut scope = list.scope();
            scope.set_line_width(5.0);
            scope.set_pick_id(Some(7));
            {
                let mut inner = scope.scope();
                inner.set_program(Program::Picking);
                assert_eq!(inner.state().program, Program::Picking);
            }
            assert_eq!(scope.state().program, Program::FlatColor);
            assert_eq!(scope.state().line_width, 5.0);
        }
        assert_eq!(list.state(), DrawState::default());
    }

    #[test]
    fn test_scope_restores_on_early_return() {
        fn draw_until_error(list: &mut DrawList, fail: bool) -> Result<(), &'static str> {
            let mut scope = list.scope();
            scope.set_line_width(9.0);
            scope.lines(&[[Vec2::ZERO, Vec2::X]], [1.0; 4]);
            if fail {
                return Err("stopped");
            }
            scope.set_line_width(1.0);
            Ok(())
        }

        let mut list = DrawList::new(Mat4::IDENTITY);
        assert!(draw_until_error(&mut list, true).is_err());
        assert_eq!(list.state().line_width, 1.0);
        assert_eq!(list.commands()[0].state.line_width, 9.0);
    }

    #[test]
    fn test_segment_becomes_capped_quad() {
        let mut list = DrawList::new(Mat4::IDENTITY);
        {
            let mut scope = list.scope();
            scope.set_line_width(2.0);
            scope.lines(&[[Vec2::ZERO, Vec2::new(10.0, 0.0)]], [1.0; 4]);
        }
        let triangles = list.tessellate();
        assert_eq!(triangles.len(), 2);

        let covered = |p: Vec2| triangles.iter().any(|t| t.contains(p));
        assert!(covered(Vec2::new(5.0, 0.9)));
        assert!(covered(Vec2::new(-0.9, 0.0)));
        assert!(!covered(Vec2::new(5.0, 1.5)));
        assert!(!covered(Vec2::new(11.5, 0.0)));
    }

    #[test]
    fn test_degenerate_segment_is_skipped() {
        let mut list = DrawList::new(Mat4::IDENTITY);
        list.lines(&[[Vec2::ONE, Vec2::ONE]], [1.0; 4]);
        assert!(list.tessellate().is_empty());
    }

    #[test]
    fn test_loop_closes_and_fan_fills() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(4.0, 0.0),
        ];
        let mut list = DrawList::new(Mat4::IDENTITY);
        list.outline(
            &Outline {
                kind: OutlineKind::Loop,
                points: square.clone(),
            },
            [1.0; 4],
        );
        assert_eq!(list.tessellate().len(), 8);

        let mut list = DrawList::new(Mat4::IDENTITY);
        list.outline(
            &Outline {
                kind: OutlineKind::Fan,
                points: square,
            },
            [1.0; 4],
        );
        let triangles = list.tessellate();
        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().any(|t| t.contains(Vec2::new(2.0, 2.0))));
    }

    #[test]
    fn test_points_are_mapped_to_screen() {
        let to_screen = Mat4::from_translation(glam::Vec3::new(100.0, 50.0, 0.0))
            * Mat4::from_scale(glam::Vec3::new(10.0, -10.0, 1.0));
        let mut list = DrawList::new(to_screen);
        list.outline(
            &Outline {
                kind: OutlineKind::Fan,
                points: vec![Vec2::ZERO, Vec2::Y, Vec2::ONE],
            },
            [1.0; 4],
        );
        let vertices = list.vertices();
        assert_eq!(vertices.len(), 3);
        assert_relative_eq!(vertices[1].position[0], 100.0);
        assert_relative_eq!(vertices[1].position[1], 40.0);
    }

    #[test]
    fn test_picking_program_encodes_id_as_color() {
        let mut list = DrawList::new(Mat4::IDENTITY);
        {
            let mut scope = list.scope();
            scope.set_program(Program::Picking);
            scope.set_pick_id(Some(0x12));
            scope.lines(&[[Vec2::ZERO, Vec2::X * 4.0]], [1.0; 4]);
        }
        let triangles = list.tessellate();
        assert!(triangles.iter().all(|t| t.color == id_to_color(0x12)));
        assert!(triangles.iter().all(|t| t.pick_id == Some(0x12)));
    }
}
