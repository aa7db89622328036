//! Interactive parts of a cage
//!
//! A [`CagePart`] names the handle under the pointer. Parts also travel on
//! the picking channel, where they are packed together with a host-provided
//! base id into a single [`PickId`].

use crate::constants::PICK_PART_BITS;

/// Which part of the cage is hovered or being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CagePart {
    #[default]
    None,
    /// Inner area, moves the target
    Translate,
    ScaleMinX,
    ScaleMaxX,
    ScaleMinY,
    ScaleMaxY,
    ScaleMinXMinY,
    ScaleMinXMaxY,
    ScaleMaxXMinY,
    ScaleMaxXMaxY,
    /// Square handle above the top edge
    Rotate,
}

impl CagePart {
    /// The eight edge and corner scale handles
    pub const SCALE_PARTS: [CagePart; 8] = [
        CagePart::ScaleMinX,
        CagePart::ScaleMaxX,
        CagePart::ScaleMinY,
        CagePart::ScaleMaxY,
        CagePart::ScaleMinXMinY,
        CagePart::ScaleMinXMaxY,
        CagePart::ScaleMaxXMinY,
        CagePart::ScaleMaxXMaxY,
    ];

    /// Whether this is an edge or corner scale handle
    pub fn is_scale(&self) -> bool {
        Self::SCALE_PARTS.contains(self)
    }

    /// Whether this is a corner scale handle
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            CagePart::ScaleMinXMinY
                | CagePart::ScaleMinXMaxY
                | CagePart::ScaleMaxXMinY
                | CagePart::ScaleMaxXMaxY
        )
    }

    /// Code of this part on the picking channel, `None` has no code
    pub fn code(&self) -> Option<u32> {
        let code = match self {
            CagePart::None => return None,
            CagePart::Translate => 1,
            CagePart::ScaleMinX => 2,
            CagePart::ScaleMaxX => 3,
            CagePart::ScaleMinY => 4,
            CagePart::ScaleMaxY => 5,
            CagePart::ScaleMinXMinY => 6,
            CagePart::ScaleMinXMaxY => 7,
            CagePart::ScaleMaxXMinY => 8,
            CagePart::ScaleMaxXMaxY => 9,
            CagePart::Rotate => 10,
        };
        Some(code)
    }

    /// Inverse of [`CagePart::code`]
    pub fn from_code(code: u32) -> Option<Self> {
        let part = match code {
            1 => CagePart::Translate,
            2 => CagePart::ScaleMinX,
            3 => CagePart::ScaleMaxX,
            4 => CagePart::ScaleMinY,
            5 => CagePart::ScaleMaxY,
            6 => CagePart::ScaleMinXMinY,
            7 => CagePart::ScaleMinXMaxY,
            8 => CagePart::ScaleMaxXMinY,
            9 => CagePart::ScaleMaxXMaxY,
            10 => CagePart::Rotate,
            _ => return None,
        };
        Some(part)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            CagePart::None => "None",
            CagePart::Translate => "Translate",
            CagePart::ScaleMinX => "Scale -X",
            CagePart::ScaleMaxX => "Scale +X",
            CagePart::ScaleMinY => "Scale -Y",
            CagePart::ScaleMaxY => "Scale +Y",
            CagePart::ScaleMinXMinY => "Scale -X -Y",
            CagePart::ScaleMinXMaxY => "Scale -X +Y",
            CagePart::ScaleMaxXMinY => "Scale +X -Y",
            CagePart::ScaleMaxXMaxY => "Scale +X +Y",
            CagePart::Rotate => "Rotate",
        }
    }
}

/// A selectable id on the picking channel: host base id plus part code.
///
/// The part code occupies the low [`PICK_PART_BITS`] bits and the base id the
/// bits above, so adding parts can never collide with a base id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId {
    pub base: u32,
    pub part: CagePart,
}

impl PickId {
    const PART_MASK: u32 = (1 << PICK_PART_BITS) - 1;

    /// Largest base id that still fits alongside a part code
    pub const MAX_BASE: u32 = u32::MAX >> PICK_PART_BITS;

    /// Create a pick id, `None` for the `None` part or an out-of-range base
    pub fn new(base: u32, part: CagePart) -> Option<Self> {
        if base > Self::MAX_BASE || part.code().is_none() {
            return None;
        }
        Some(Self { base, part })
    }

    /// Pack into a single integer
    pub fn encode(&self) -> u32 {
        let code = self.part.code().unwrap_or(0);
        (self.base << PICK_PART_BITS) | code
    }

    /// Unpack an integer produced by [`PickId::encode`]
    pub fn decode(value: u32) -> Option<Self> {
        let part = CagePart::from_code(value & Self::PART_MASK)?;
        Some(Self {
            base: value >> PICK_PART_BITS,
            part,
        })
    }
}
