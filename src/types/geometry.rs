//! Pixel geometry shared by detection, layout and metadata.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from inclusive min/max corners.
    pub fn from_extent(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when both sides are strictly longer than `min_extent`.
    pub fn exceeds(&self, min_extent: u32) -> bool {
        self.width > min_extent && self.height > min_extent
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Shrink by `inset` on every side, stopping at zero.
    pub fn inset(&self, inset: u32) -> Self {
        Self::new(
            self.width.saturating_sub(inset.saturating_mul(2)),
            self.height.saturating_sub(inset.saturating_mul(2)),
        )
    }

    pub fn fits_within(&self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}
