//! Cursor hints for hovered parts

use crate::part::CagePart;

/// Cursor the host should show over a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Open hand, for the translate area
    Hand,
    ResizeHorizontal,
    ResizeVertical,
    /// Omnidirectional scroll, stands in for diagonal resize
    AllScroll,
    /// For the rotate handle
    Crosshair,
}

/// Cursor for the highlighted part.
///
/// Cages embedded in a 3D view always use [`CursorHint::AllScroll`].
pub fn cursor_for_part(part: CagePart, is_3d: bool) -> CursorHint {
    if is_3d {
        return CursorHint::AllScroll;
    }

    match part {
        CagePart::Translate => CursorHint::Hand,
        CagePart::ScaleMinX | CagePart::ScaleMaxX => CursorHint::ResizeHorizontal,
        CagePart::ScaleMinY | CagePart::ScaleMaxY => CursorHint::ResizeVertical,
        // TODO: use real diagonal resize cursors once hosts can map them
        CagePart::ScaleMinXMinY
        | CagePart::ScaleMaxXMinY
        | CagePart::ScaleMinXMaxY
        | CagePart::ScaleMaxXMaxY => CursorHint::AllScroll,
        CagePart::Rotate => CursorHint::Crosshair,
        CagePart::None => CursorHint::Default,
    }
}
