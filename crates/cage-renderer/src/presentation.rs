//! Cage presentation
//!
//! Records a cage into a [`DrawList`], either for display or for picking.

use glam::Mat4;

use cage_core::{CageMetrics, CagePart, CageWidget, DrawFlags, PickId, TransformFlags};

use crate::config::CageStyle;
use crate::constants::cage::OUTLINE_EXTRA_WIDTH;
use crate::draw_context::{DrawList, Program};

/// What a draw list is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentMode {
    /// Visible cage
    #[default]
    Normal,
    /// One pick id per enabled part
    Picking {
        /// Host id the part codes are packed with
        base_id: u32,
    },
}

/// Draw the visible cage.
///
/// Corner ticks are drawn over a wider outline in the corner colour, which
/// switches to the highlight colour while the cage is highlighted. The
/// highlighted handle gets its outline, except the translate area which is
/// never displayed. The rotate handle is always drawn when enabled.
pub fn render_normal(
    list: &mut DrawList,
    metrics: &CageMetrics,
    flags: TransformFlags,
    highlight_part: CagePart,
    style: &CageStyle,
    is_highlighted: bool,
) {
    let mut scope = list.scope();
    scope.set_program(Program::FlatColor);

    let ticks = metrics.corner_ticks();
    scope.set_line_width(style.line_width + OUTLINE_EXTRA_WIDTH);
    scope.lines(&ticks, style.outline_color);
    scope.set_line_width(style.line_width);
    scope.lines(&ticks, style.corner_color(is_highlighted));

    if highlight_part != CagePart::Translate {
        draw_interaction(&mut scope, metrics, highlight_part, style);
    }
    if flags.contains(TransformFlags::ROTATE) {
        draw_interaction(&mut scope, metrics, CagePart::Rotate, style);
    }
}

/// Draw every enabled part with its own pick id.
///
/// The translate area goes first so the handles along its border stay on
/// top of it.
pub fn render_for_picking(
    list: &mut DrawList,
    metrics: &CageMetrics,
    flags: TransformFlags,
    base_id: u32,
    style: &CageStyle,
) {
    if base_id > PickId::MAX_BASE {
        tracing::warn!(base_id, "Cage pick base id out of range, nothing drawn");
        return;
    }

    let mut parts = Vec::with_capacity(10);
    if flags.contains(TransformFlags::TRANSLATE) {
        parts.push(CagePart::Translate);
    }
    if flags.has_scale() {
        parts.extend(CagePart::SCALE_PARTS);
    }
    if flags.contains(TransformFlags::ROTATE) {
        parts.push(CagePart::Rotate);
    }

    let mut scope = list.scope();
    scope.set_program(Program::Picking);
    scope.set_line_width(style.line_width + OUTLINE_EXTRA_WIDTH);
    for part in parts {
        let Some(id) = PickId::new(base_id, part) else {
            continue;
        };
        if let Some(outline) = metrics.interaction_outline(part) {
            scope.set_pick_id(Some(id.encode()));
            scope.outline(&outline, style.outline_color);
        }
    }
}

/// Outline of one part: a wide dark line under the part colour
fn draw_interaction(list: &mut DrawList, metrics: &CageMetrics, part: CagePart, style: &CageStyle) {
    let Some(outline) = metrics.interaction_outline(part) else {
        return;
    };

    let mut scope = list.scope();
    scope.set_line_width(style.line_width + OUTLINE_EXTRA_WIDTH);
    scope.outline(&outline, style.outline_color);
    scope.set_line_width(style.line_width);
    scope.outline(&outline, style.color);
}

/// Build the draw list for a widget.
///
/// `screen_from_local` maps the widget's local space, offset matrix
/// included, to pixels. Line widths follow `pixels_per_point` unless the
/// widget asks for unscaled lines.
pub fn build_draw_list(
    widget: &CageWidget,
    screen_from_local: Mat4,
    style: &CageStyle,
    mode: PresentMode,
    pixels_per_point: f32,
) -> DrawList {
    let mut list = DrawList::new(screen_from_local);
    if !widget.is_visible() {
        return list;
    }

    let mut style = style.clone();
    if !widget.draw_flags().contains(DrawFlags::DRAW_NO_SCALE) {
        style.line_width *= pixels_per_point;
    }

    let metrics = CageMetrics::from_config(widget.config());
    let flags = widget.config().transform;
    match mode {
        PresentMode::Normal => {
            let highlight = widget.highlight_part();
            render_normal(
                &mut list,
                &metrics,
                flags,
                highlight,
                &style,
                highlight != CagePart::None,
            );
        }
        PresentMode::Picking { base_id } => {
            render_for_picking(&mut list, &metrics, flags, base_id, &style);
        }
    }
    list
}
