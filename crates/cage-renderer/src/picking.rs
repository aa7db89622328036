//! Pick id resolution
//!
//! Picking draws every selectable part with its own id. Ids are resolved on
//! the CPU from the tessellated triangles, and shown as colours when the
//! picking channel is displayed.

use glam::Vec2;

use cage_core::{CagePart, PickId};

use crate::draw_context::Triangle;

/// Encode a pick id in the RGB channels, alpha is always opaque.
///
/// Only the low 24 bits are visible.
pub fn id_to_color(id: u32) -> [f32; 4] {
    let [r, g, b, _] = id.to_le_bytes();
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ]
}

/// Topmost pick id under a pixel. Later triangles are drawn over earlier ones.
pub fn resolve_pick(triangles: &[Triangle], point: Vec2) -> Option<u32> {
    triangles
        .iter()
        .rev()
        .filter(|t| t.contains(point))
        .find_map(|t| t.pick_id)
}

/// Part of the cage registered under `base` at a pixel
pub fn resolve_part(triangles: &[Triangle], point: Vec2, base: u32) -> CagePart {
    resolve_pick(triangles, point)
        .and_then(PickId::decode)
        .filter(|id| id.base == base)
        .map_or(CagePart::None, |id| id.part)
}
