//! Uniform grid sizing.

use crate::error::{NormError, Result};
use crate::types::{ForcedTileSize, Size};

use super::Row;

/// Largest sheet, in pixels, the grid builder accepts (1 GiB of RGBA).
pub const MAX_SHEET_PIXELS: u64 = 1 << 28;

/// Shape and cell size of the normalized sheet.
///
/// A built grid guarantees that its sheet size, and every inner origin plus
/// anything that fits in the inner area, is representable as `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    /// Largest detected frame, before padding.
    pub content: Size,
    pub padding: u32,
}

impl Grid {
    /// Size the grid for the clustered rows.
    ///
    /// Forced dimensions are authoritative: frames larger than the forced cell
    /// are downscaled at composite time instead of growing the grid.
    pub fn build(rows: &[Row], padding: u32, forced: ForcedTileSize) -> Result<Self> {
        let boxes = rows.iter().flat_map(|r| r.boxes.iter());
        let (max_w, max_h) = boxes.fold((0, 0), |(w, h), b| (w.max(b.width), h.max(b.height)));

        let pad2 = padding
            .checked_mul(2)
            .ok_or_else(|| too_large(format!("padding {} overflows the cell", padding)))?;
        let cell_width = match forced.width {
            Some(w) => w,
            None => max_w
                .checked_add(pad2)
                .ok_or_else(|| too_large(format!("cell width {} + {}", max_w, pad2)))?,
        };
        let cell_height = match forced.height {
            Some(h) => h,
            None => max_h
                .checked_add(pad2)
                .ok_or_else(|| too_large(format!("cell height {} + {}", max_h, pad2)))?,
        };

        let columns = rows.iter().map(Row::len).max().unwrap_or(0) as u32;
        let row_count = rows.len() as u32;

        let overflow = || {
            too_large(format!(
                "{} x {} cells of {}x{} with padding {}",
                columns, row_count, cell_width, cell_height, padding
            ))
        };
        let sheet_width = columns.checked_mul(cell_width).ok_or_else(overflow)?;
        let sheet_height = row_count.checked_mul(cell_height).ok_or_else(overflow)?;
        // Inner origins sit at most `padding` past a cell's top-left corner
        sheet_width.checked_add(padding).ok_or_else(overflow)?;
        sheet_height.checked_add(padding).ok_or_else(overflow)?;

        if u64::from(sheet_width) * u64::from(sheet_height) > MAX_SHEET_PIXELS {
            return Err(too_large(format!(
                "{}x{} exceeds {} pixels",
                sheet_width, sheet_height, MAX_SHEET_PIXELS
            )));
        }

        Ok(Self {
            cell_width,
            cell_height,
            columns,
            rows: row_count,
            content: Size::new(max_w, max_h),
            padding,
        })
    }

    pub fn cell(&self) -> Size {
        Size::new(self.cell_width, self.cell_height)
    }

    /// Area inside a cell once padding is removed from every side.
    pub fn inner(&self) -> Size {
        self.cell().inset(self.padding)
    }

    /// Pixel size of the whole sheet.
    pub fn sheet_size(&self) -> Size {
        Size::new(self.columns * self.cell_width, self.rows * self.cell_height)
    }

    /// Top-left pixel of the inner area of cell `(row, column)`.
    pub fn inner_origin(&self, row: u32, column: u32) -> (u32, u32) {
        (
            column * self.cell_width + self.padding,
            row * self.cell_height + self.padding,
        )
    }
}

fn too_large(message: String) -> NormError {
    NormError::SheetTooLarge { message }
}
