//! Cage interaction state
//!
//! [`CageWidget`] owns the modal drag session. A press on a highlighted part
//! snapshots the offset matrix, every pointer move recomputes the matrix from
//! that snapshot, and release or cancel ends the session.
//!
//! The host is abstracted by [`CageHost`], which projects window points into
//! the cage's local space and receives redraw requests.

use bitflags::bitflags;
use glam::{BVec2, Mat4, Vec2, Vec3};

use crate::binding::{BindingError, MatrixBinding, TargetProperty};
use crate::config::{CageConfig, ConfigError, TransformFlags};
use crate::cursor::{CursorHint, cursor_for_part};
use crate::geometry::{GeometryError, pivot_for_scale_part};
use crate::hit_test::test_select;
use crate::part::CagePart;

/// Services the embedding editor provides to a cage
pub trait CageHost {
    /// Project a window point into cage-local space using `matrix_offset`
    fn project_2d(&self, window: Vec2, matrix_offset: &Mat4) -> Option<Vec2>;

    /// Request a redraw of the region owning the cage
    fn tag_redraw(&mut self);

    /// Queue a synthetic pointer move so dependent widgets refresh
    fn add_mousemove(&mut self);
}

/// Pointer events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CageEvent {
    /// Pointer moved with no button held
    Hover(Vec2),
    /// Primary button pressed
    Press(Vec2),
    /// Pointer moved while the button is held
    Move(Vec2),
    /// Primary button released, commits the drag
    Release,
    /// Drag aborted, restores the original matrix
    Cancel,
}

/// Result of handing an event to the cage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionStatus {
    /// Event was not consumed by a drag
    PassThrough,
    /// Drag in progress, keep delivering move events
    Running,
    /// Drag committed
    Finished,
    /// Drag cancelled and the matrix restored
    Cancelled,
}

bitflags! {
    /// How the host should draw the cage
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrawFlags: u8 {
        /// Keep drawing while a drag is active
        const DRAW_MODAL = 1 << 0;
        /// Line widths ignore the interface scale
        const DRAW_NO_SCALE = 1 << 1;
    }
}

/// State captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Part grabbed at press
    pub part: CagePart,
    /// Pointer position in local space at press
    pub origin_pointer: Vec2,
    /// Offset matrix at press
    pub origin_matrix: Mat4,
}

/// 2D cage manipulator
#[derive(Debug)]
pub struct CageWidget {
    config: CageConfig,
    highlight_part: CagePart,
    matrix_offset: Mat4,
    binding: Option<MatrixBinding>,
    session: Option<DragSession>,
    is_3d: bool,
    draw_flags: DrawFlags,
}

impl Default for CageWidget {
    fn default() -> Self {
        Self::new(CageConfig::default())
    }
}

impl CageWidget {
    /// Create an unbound cage with an identity offset
    pub fn new(config: CageConfig) -> Self {
        Self {
            config,
            highlight_part: CagePart::None,
            matrix_offset: Mat4::IDENTITY,
            binding: None,
            session: None,
            is_3d: false,
            draw_flags: DrawFlags::DRAW_MODAL | DrawFlags::DRAW_NO_SCALE,
        }
    }

    // ============== Configuration ==============

    /// Current configuration
    pub fn config(&self) -> &CageConfig {
        &self.config
    }

    /// Set the cage dimensions
    pub fn set_dimensions(&mut self, dimensions: Vec2) -> Result<(), ConfigError> {
        self.config.set_dimensions(dimensions)
    }

    /// Set the enabled transforms
    pub fn set_transform_flags(&mut self, flags: TransformFlags) {
        self.config.transform = flags;
    }

    /// Replace the whole configuration
    pub fn set_config(&mut self, config: CageConfig) {
        self.config = config;
    }

    /// Whether the cage lives in a 3D view
    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    /// Mark the cage as embedded in a 3D view
    pub fn set_is_3d(&mut self, is_3d: bool) {
        self.is_3d = is_3d;
    }

    /// Draw flags
    pub fn draw_flags(&self) -> DrawFlags {
        self.draw_flags
    }

    /// Whether the host should draw the cage this frame
    pub fn is_visible(&self) -> bool {
        !self.is_dragging() || self.draw_flags.contains(DrawFlags::DRAW_MODAL)
    }

    // ============== State Accessors ==============

    /// Local mirror of the offset matrix
    pub fn matrix_offset(&self) -> Mat4 {
        self.matrix_offset
    }

    /// Overwrite the offset matrix and push it to the binding
    pub fn set_matrix_offset(&mut self, matrix: Mat4) {
        self.matrix_offset = matrix;
        if let Some(binding) = &mut self.binding {
            binding.set(&matrix);
        }
    }

    /// Part under the pointer, or being dragged
    pub fn highlight_part(&self) -> CagePart {
        self.highlight_part
    }

    /// Active drag session
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Cursor for the highlighted part
    pub fn cursor(&self) -> CursorHint {
        cursor_for_part(self.highlight_part, self.is_3d)
    }

    // ============== Binding ==============

    /// Bind the `"matrix"` target property and read its value
    pub fn bind(&mut self, target: Box<dyn TargetProperty>) -> Result<(), BindingError> {
        let binding = MatrixBinding::new(target)?;
        self.matrix_offset = binding.get()?;
        self.binding = Some(binding);
        Ok(())
    }

    /// Drop the target property binding
    pub fn unbind(&mut self) {
        self.binding = None;
    }

    /// Re-read the bound matrix after it changed outside the cage
    pub fn property_update(&mut self) -> Result<(), BindingError> {
        if let Some(binding) = &self.binding {
            self.matrix_offset = binding.get()?;
            tracing::debug!("Cage matrix refreshed from binding");
        }
        Ok(())
    }

    // ============== Interaction ==============

    /// Hit-test a window point and store the result as the highlight.
    ///
    /// The highlight is frozen while dragging.
    pub fn update_highlight(&mut self, window: Vec2, host: &impl CageHost) -> CagePart {
        if self.is_dragging() {
            return self.highlight_part;
        }
        self.highlight_part = host
            .project_2d(window, &self.matrix_offset)
            .map_or(CagePart::None, |local| test_select(local, &self.config));
        self.highlight_part
    }

    /// Set the highlight directly, for hosts resolving parts by picking
    pub fn set_highlight_part(&mut self, part: CagePart) {
        if !self.is_dragging() {
            self.highlight_part = part;
        }
    }

    /// Start dragging the highlighted part
    pub fn invoke(
        &mut self,
        window: Vec2,
        host: &impl CageHost,
    ) -> Result<InteractionStatus, InteractionError> {
        if self.is_dragging() {
            tracing::warn!("Cage press while a drag is already active");
            return Err(InteractionError::AlreadyDragging);
        }
        if self.highlight_part == CagePart::None {
            return Err(InteractionError::NothingHighlighted);
        }

        let origin_matrix = self.matrix_offset;
        let origin_pointer = host
            .project_2d(window, &origin_matrix)
            .unwrap_or_else(|| {
                tracing::debug!("Cage press could not be projected, using the local origin");
                Vec2::ZERO
            });

        self.session = Some(DragSession {
            part: self.highlight_part,
            origin_pointer,
            origin_matrix,
        });
        tracing::debug!(part = ?self.highlight_part, ?origin_pointer, "Cage drag started");

        Ok(InteractionStatus::Running)
    }

    /// Recompute the offset matrix for the current pointer position
    pub fn modal(
        &mut self,
        window: Vec2,
        host: &mut impl CageHost,
    ) -> Result<InteractionStatus, InteractionError> {
        let Some(session) = self.session else {
            return Err(InteractionError::NotDragging);
        };

        // Project with the matrix from before the drag, the live one moves under the pointer.
        let Some(point) = host.project_2d(window, &session.origin_matrix) else {
            tracing::trace!("Cage move could not be projected, skipping");
            return Ok(InteractionStatus::Running);
        };

        if let Some(binding) = &self.binding {
            self.matrix_offset = binding.get()?;
        }

        self.matrix_offset = match session.part {
            CagePart::Translate => translated_offset(&session, point),
            // Rotation is not implemented, the matrix is left as is.
            CagePart::Rotate => self.matrix_offset,
            _ => scaled_offset(&session, point, &self.config)?,
        };
        tracing::trace!(part = ?session.part, ?point, "Cage drag update");

        if let Some(binding) = &mut self.binding {
            binding.set(&self.matrix_offset);
        }
        host.tag_redraw();
        host.add_mousemove();

        Ok(InteractionStatus::Running)
    }

    /// End the drag. Cancelling restores the matrix from before the press.
    pub fn exit(&mut self, cancel: bool, host: &mut impl CageHost) -> InteractionStatus {
        let Some(session) = self.session.take() else {
            tracing::debug!("Cage exit without an active drag");
            return InteractionStatus::Finished;
        };

        if !cancel {
            tracing::debug!(part = ?session.part, "Cage drag finished");
            return InteractionStatus::Finished;
        }

        if let Some(binding) = &mut self.binding {
            binding.set(&session.origin_matrix);
        }
        self.matrix_offset = session.origin_matrix;
        host.tag_redraw();
        tracing::debug!(part = ?session.part, "Cage drag cancelled");

        InteractionStatus::Cancelled
    }

    /// Route a host event to the matching operation
    pub fn handle_event(
        &mut self,
        event: CageEvent,
        host: &mut impl CageHost,
    ) -> Result<InteractionStatus, InteractionError> {
        match event {
            CageEvent::Hover(window) => {
                self.update_highlight(window, &*host);
                Ok(InteractionStatus::PassThrough)
            }
            CageEvent::Press(window) => {
                self.update_highlight(window, &*host);
                self.invoke(window, &*host)
            }
            CageEvent::Move(window) if self.is_dragging() => self.modal(window, host),
            CageEvent::Move(window) => {
                self.update_highlight(window, &*host);
                Ok(InteractionStatus::PassThrough)
            }
            CageEvent::Release => Ok(self.exit(false, host)),
            CageEvent::Cancel => Ok(self.exit(true, host)),
        }
    }
}

/// Snapshot with its translation moved by the pointer delta.
///
/// Starting from the snapshot keeps the scale untouched.
fn translated_offset(session: &DragSession, point: Vec2) -> Mat4 {
    let delta = point - session.origin_pointer;
    let mut matrix = session.origin_matrix;
    matrix.w_axis.x = session.origin_matrix.w_axis.x + delta.x;
    matrix.w_axis.y = session.origin_matrix.w_axis.y + delta.y;
    matrix
}

/// Snapshot scaled about the pivot opposite the grabbed handle
fn scaled_offset(
    session: &DragSession,
    point: Vec2,
    config: &CageConfig,
) -> Result<Mat4, GeometryError> {
    let (pivot, constrain_axis) = if config.transform.contains(TransformFlags::TRANSLATE) {
        let pivot = pivot_for_scale_part(session.part)?;
        (pivot.point, pivot.constrain_axis)
    } else {
        (Vec2::ZERO, BVec2::new(false, false))
    };

    let dimensions = config.dimensions();
    let mut delta_orig = (session.origin_pointer - pivot) / dimensions;
    let mut delta_curr = (point - pivot) / dimensions;

    let origin = session.origin_matrix;
    let axis_len = [
        origin.x_axis.truncate().length(),
        origin.y_axis.truncate().length(),
    ];
    let constrained = [constrain_axis.x, constrain_axis.y];

    let mut scale = [1.0_f32; 2];
    for i in 0..2 {
        if constrained[i] {
            continue;
        }
        // A collapsed axis has no length to normalize by
        if axis_len[i] == 0.0 {
            return Ok(origin);
        }
        // Measure outward from the pivot whichever side was grabbed
        if delta_orig[i] < 0.0 {
            delta_orig[i] = -delta_orig[i];
            delta_curr[i] = -delta_curr[i];
        }
        scale[i] = 1.0 + (delta_curr[i] - delta_orig[i]) / axis_len[i];
    }

    if config.transform.contains(TransformFlags::SCALE_UNIFORM) {
        if (scale[0] - 1.0).abs() > (scale[1] - 1.0).abs() {
            scale[1] = scale[0];
        } else {
            scale[0] = scale[1];
        }
    }

    let pivot = pivot.extend(0.0);
    let matrix_scale = Mat4::from_translation(pivot)
        * Mat4::from_scale(Vec3::new(scale[0], scale[1], 1.0))
        * Mat4::from_translation(-pivot);

    Ok(origin * matrix_scale)
}

/// Interaction errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum InteractionError {
    #[error("A cage drag is already active")]
    AlreadyDragging,
    #[error("No cage part is highlighted")]
    NothingHighlighted,
    #[error("No cage drag is active")]
    NotDragging,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SharedMatrixProperty;
    use crate::projection::RegionProjector;
    use approx::assert_relative_eq;
    use glam::{Quat, Vec4};

    /// Host whose window space is the cage's local space
    #[derive(Default)]
    struct TestHost {
        fail_projection: bool,
        redraws: usize,
        mousemoves: usize,
    }

    impl CageHost for TestHost {
        fn project_2d(&self, window: Vec2, _matrix_offset: &Mat4) -> Option<Vec2> {
            (!self.fail_projection).then_some(window)
        }

        fn tag_redraw(&mut self) {
            self.redraws += 1;
        }

        fn add_mousemove(&mut self) {
            self.mousemoves += 1;
        }
    }

    /// Host projecting through the offset matrix
    struct RegionHost(RegionProjector);

    impl CageHost for RegionHost {
        fn project_2d(&self, window: Vec2, matrix_offset: &Mat4) -> Option<Vec2> {
            self.0.window_to_local(window, matrix_offset)
        }

        fn tag_redraw(&mut self) {}

        fn add_mousemove(&mut self) {}
    }

    fn widget(w: f32, h: f32, flags: TransformFlags) -> CageWidget {
        CageWidget::new(CageConfig::new(Vec2::new(w, h), flags).unwrap())
    }

    fn press(cage: &mut CageWidget, host: &mut TestHost, at: Vec2) -> InteractionStatus {
        cage.handle_event(CageEvent::Press(at), host).unwrap()
    }

    #[test]
    fn test_translate_moves_translation_only() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let origin = Mat4::from_scale_rotation_translation(
            Vec3::new(1.5, 0.5, 1.0),
            Quat::from_rotation_z(0.3),
            Vec3::new(3.0, 4.0, 0.0),
        );
        cage.set_matrix_offset(origin);
        let mut host = TestHost::default();

        assert_eq!(press(&mut cage, &mut host, Vec2::new(1.0, 1.0)), InteractionStatus::Running);
        assert_eq!(cage.highlight_part(), CagePart::Translate);

        cage.modal(Vec2::new(6.0, -2.0), &mut host).unwrap();

        let m = cage.matrix_offset();
        assert_eq!(m.w_axis, origin.w_axis + Vec4::new(5.0, -3.0, 0.0, 0.0));
        assert_eq!(m.x_axis, origin.x_axis);
        assert_eq!(m.y_axis, origin.y_axis);
        assert_eq!(m.z_axis, origin.z_axis);
        assert_eq!(host.redraws, 1);
        assert_eq!(host.mousemoves, 1);
    }

    #[test]
    fn test_cancel_restores_matrix_exactly() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let shared = SharedMatrixProperty::new(Mat4::from_rotation_z(0.7));
        cage.bind(Box::new(shared.clone())).unwrap();
        let before = cage.matrix_offset();
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.1, 0.2));
        cage.modal(Vec2::new(2.3, -1.7), &mut host).unwrap();
        assert_ne!(cage.matrix_offset(), before);
        assert_ne!(shared.matrix(), before);

        let status = cage.handle_event(CageEvent::Cancel, &mut host).unwrap();
        assert_eq!(status, InteractionStatus::Cancelled);
        assert_eq!(cage.matrix_offset().to_cols_array(), before.to_cols_array());
        assert_eq!(shared.matrix().to_cols_array(), before.to_cols_array());
        assert!(cage.session().is_none());
    }

    #[test]
    fn test_release_keeps_last_matrix() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::ZERO);
        cage.modal(Vec2::new(1.0, 2.0), &mut host).unwrap();
        let dragged = cage.matrix_offset();

        let status = cage.handle_event(CageEvent::Release, &mut host).unwrap();
        assert_eq!(status, InteractionStatus::Finished);
        assert_eq!(cage.matrix_offset(), dragged);
        assert!(!cage.is_dragging());
    }

    #[test]
    fn test_corner_drag_scales_symmetrically() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.9, 0.9));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMaxXMaxY);

        cage.modal(Vec2::new(1.0, 1.0), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert!(m.x_axis.x > 1.0);
        assert_eq!(m.x_axis.x, m.y_axis.y);
        assert_relative_eq!(m.x_axis.x, 1.05, epsilon = 1e-5);
    }

    #[test]
    fn test_uniform_scale_uses_larger_deviation() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE | TransformFlags::SCALE_UNIFORM);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.95, 0.95));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMaxXMaxY);

        // x alone would scale by 1.1, y alone by 1.025
        cage.modal(Vec2::new(1.15, 1.0), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert_eq!(m.x_axis.x, m.y_axis.y);
        assert_relative_eq!(m.x_axis.x, 1.1, epsilon = 1e-5);

        // y dominates when dragged further vertically
        cage.modal(Vec2::new(0.95, 1.35), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert_eq!(m.x_axis.x, m.y_axis.y);
        assert_relative_eq!(m.y_axis.y, 1.2, epsilon = 1e-5);
    }

    #[test]
    fn test_edge_drag_locks_other_axis() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE | TransformFlags::SCALE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.95, 0.0));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMaxX);

        cage.modal(Vec2::new(1.15, 0.5), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert_relative_eq!(m.x_axis.x, 1.1, epsilon = 1e-5);
        assert_eq!(m.y_axis, Vec4::Y);
        // Scaled about the pivot at x = -0.5
        assert_relative_eq!(m.w_axis.x, 0.05, epsilon = 1e-5);
        assert_eq!(m.w_axis.y, 0.0);
    }

    #[test]
    fn test_scale_normalizes_by_existing_axis_length() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE);
        cage.set_matrix_offset(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.95, 0.95));
        cage.modal(Vec2::new(1.15, 1.15), &mut host).unwrap();
        let m = cage.matrix_offset();
        // 1 + 0.1 / 2 on x, 1 + 0.1 / 1 on y, composed with the existing scale
        assert_relative_eq!(m.x_axis.x, 2.0 * 1.05, epsilon = 1e-5);
        assert_relative_eq!(m.y_axis.y, 1.1, epsilon = 1e-5);
    }

    #[test]
    fn test_min_corner_drag_measures_outward() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(-0.95, -0.95));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMinXMinY);

        cage.modal(Vec2::new(-1.15, -1.15), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert_relative_eq!(m.x_axis.x, 1.1, epsilon = 1e-5);
        assert_relative_eq!(m.y_axis.y, 1.1, epsilon = 1e-5);
        // No translate flag, so the pivot is the centre
        assert_eq!(m.w_axis.x, 0.0);
        assert_eq!(m.w_axis.y, 0.0);
    }

    #[test]
    fn test_min_corner_drag_pivots_on_opposite_corner() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE | TransformFlags::SCALE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(-0.95, -0.95));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMinXMinY);

        cage.modal(Vec2::new(-1.15, -1.15), &mut host).unwrap();
        let m = cage.matrix_offset();
        assert_relative_eq!(m.x_axis.x, 1.1, epsilon = 1e-5);
        assert_relative_eq!(m.y_axis.y, 1.1, epsilon = 1e-5);
        // Pivot at (0.5, 0.5) moves the origin by 0.5 * (1 - 1.1)
        assert_relative_eq!(m.w_axis.x, -0.05, epsilon = 1e-5);
        assert_relative_eq!(m.w_axis.y, -0.05, epsilon = 1e-5);
    }

    #[test]
    fn test_collapsed_axis_keeps_snapshot() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE);
        let shared = SharedMatrixProperty::new(Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0)));
        cage.bind(Box::new(shared.clone())).unwrap();
        let before = cage.matrix_offset();
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(0.95, 0.95));
        cage.modal(Vec2::new(1.15, 1.15), &mut host).unwrap();

        assert_eq!(cage.matrix_offset(), before);
        assert!(shared.matrix().is_finite());
        assert_eq!(shared.matrix(), before);
    }

    #[test]
    fn test_updates_recompute_from_snapshot() {
        let mut cage = widget(2.0, 2.0, TransformFlags::SCALE);
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::new(-0.95, -0.95));
        cage.modal(Vec2::new(-1.2, -1.1), &mut host).unwrap();
        let first = cage.matrix_offset();

        cage.modal(Vec2::new(-1.2, -1.1), &mut host).unwrap();
        assert_eq!(cage.matrix_offset().to_cols_array(), first.to_cols_array());

        cage.modal(Vec2::new(0.3, 0.4), &mut host).unwrap();
        cage.modal(Vec2::new(-1.2, -1.1), &mut host).unwrap();
        assert_eq!(cage.matrix_offset().to_cols_array(), first.to_cols_array());
    }

    #[test]
    fn test_projection_uses_matrix_from_press() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let mut host = RegionHost(RegionProjector::default());

        cage.update_highlight(Vec2::new(1.0, 1.0), &host);
        cage.invoke(Vec2::new(1.0, 1.0), &host).unwrap();
        cage.modal(Vec2::new(6.0, -2.0), &mut host).unwrap();
        let first = cage.matrix_offset();
        assert!(first.w_axis.truncate().abs_diff_eq(Vec3::new(5.0, -3.0, 0.0), 1e-5));

        // Projecting through the moved matrix would see no delta here
        cage.modal(Vec2::new(6.0, -2.0), &mut host).unwrap();
        assert_eq!(cage.matrix_offset(), first);
    }

    #[test]
    fn test_failed_projection_on_press_uses_origin() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        cage.update_highlight(Vec2::ZERO, &host);

        host.fail_projection = true;
        cage.invoke(Vec2::new(4.0, 4.0), &host).unwrap();
        assert_eq!(cage.session().unwrap().origin_pointer, Vec2::ZERO);
    }

    #[test]
    fn test_failed_projection_on_move_is_noop() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        press(&mut cage, &mut host, Vec2::ZERO);
        cage.modal(Vec2::new(1.0, 1.0), &mut host).unwrap();
        let before = cage.matrix_offset();

        host.fail_projection = true;
        let status = cage.modal(Vec2::new(5.0, 5.0), &mut host).unwrap();
        assert_eq!(status, InteractionStatus::Running);
        assert_eq!(cage.matrix_offset(), before);
        assert_eq!(host.redraws, 1);
        assert!(cage.is_dragging());
    }

    #[test]
    fn test_rotate_is_inert() {
        let mut cage = widget(2.0, 2.0, TransformFlags::ROTATE);
        let origin = Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0));
        cage.set_matrix_offset(origin);
        let mut host = TestHost::default();

        // Rotate handle sits one margin above the top edge
        press(&mut cage, &mut host, Vec2::new(0.0, 1.1));
        assert_eq!(cage.highlight_part(), CagePart::Rotate);

        cage.modal(Vec2::new(2.0, 3.5), &mut host).unwrap();
        assert_eq!(cage.matrix_offset(), origin);
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn test_binding_follows_drag() {
        let mut cage = widget(20.0, 20.0, TransformFlags::TRANSLATE);
        let shared = SharedMatrixProperty::new(Mat4::IDENTITY);
        cage.bind(Box::new(shared.clone())).unwrap();
        let mut host = TestHost::default();

        press(&mut cage, &mut host, Vec2::ZERO);
        cage.handle_event(CageEvent::Move(Vec2::new(2.0, 1.0)), &mut host)
            .unwrap();
        assert_eq!(shared.matrix(), cage.matrix_offset());
        assert_eq!(shared.matrix().w_axis, Vec4::new(2.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_property_update_refreshes_mirror() {
        let mut cage = CageWidget::default();
        let shared = SharedMatrixProperty::new(Mat4::IDENTITY);
        cage.bind(Box::new(shared.clone())).unwrap();

        let external = Mat4::from_translation(Vec3::new(-4.0, 1.0, 0.0));
        shared.set_matrix(external);
        assert_eq!(cage.matrix_offset(), Mat4::IDENTITY);

        cage.property_update().unwrap();
        assert_eq!(cage.matrix_offset(), external);
    }

    #[test]
    fn test_press_without_highlight_is_rejected() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        let result = cage.handle_event(CageEvent::Press(Vec2::new(5.0, 5.0)), &mut host);
        assert!(matches!(result, Err(InteractionError::NothingHighlighted)));
        assert!(!cage.is_dragging());
    }

    #[test]
    fn test_second_press_is_rejected() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        press(&mut cage, &mut host, Vec2::ZERO);
        assert!(matches!(
            cage.invoke(Vec2::ZERO, &host),
            Err(InteractionError::AlreadyDragging)
        ));
    }

    #[test]
    fn test_move_without_drag_only_hovers() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        assert!(matches!(
            cage.modal(Vec2::ZERO, &mut host),
            Err(InteractionError::NotDragging)
        ));

        let status = cage
            .handle_event(CageEvent::Move(Vec2::ZERO), &mut host)
            .unwrap();
        assert_eq!(status, InteractionStatus::PassThrough);
        assert_eq!(cage.highlight_part(), CagePart::Translate);
        assert_eq!(host.redraws, 0);
    }

    #[test]
    fn test_highlight_frozen_while_dragging() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE | TransformFlags::SCALE);
        let mut host = TestHost::default();
        press(&mut cage, &mut host, Vec2::new(0.95, 0.95));
        assert_eq!(cage.highlight_part(), CagePart::ScaleMaxXMaxY);

        cage.update_highlight(Vec2::ZERO, &host);
        assert_eq!(cage.highlight_part(), CagePart::ScaleMaxXMaxY);
        assert_eq!(cage.cursor(), CursorHint::AllScroll);
    }

    #[test]
    fn test_cage_stays_visible_while_dragging() {
        let mut cage = widget(2.0, 2.0, TransformFlags::TRANSLATE);
        let mut host = TestHost::default();
        press(&mut cage, &mut host, Vec2::ZERO);
        assert!(cage.is_visible());
    }
}
