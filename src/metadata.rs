//! Sheet metadata.
//!
//! Describes how a raw sprite drawing was normalized: the grid shape, cell
//! and content sizes, and where every detected frame came from and went to.
//! Serialized as camelCase JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NormError, Result};
use crate::layout::Grid;
use crate::render::Placement;
use crate::types::{BoundingBox, ForcedTileSize, Size};

/// Metadata document emitted next to a normalized sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMetadata {
    /// Number of frames drawn onto the sheet.
    pub original_frame_count: usize,
    pub normalized_dimensions: Size,
    /// Cell size, padding included.
    pub frame_size: Size,
    /// Largest detected frame, padding excluded.
    pub content_size: Size,
    pub padding: u32,
    pub grid: GridShape,
    pub forced_tile_size: ForcedTileSize,
    pub frames: Vec<FrameRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

/// One frame's provenance and final placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub row_index: u32,
    /// Column within the row.
    pub frame_index: u32,
    pub original_bounding_box: BoundingBox,
    pub original_size: Size,
    pub placement: BoundingBox,
}

impl SheetMetadata {
    /// Assemble metadata from the grid and the composited placements.
    pub fn describe(grid: &Grid, forced: ForcedTileSize, placements: &[Placement]) -> Self {
        Self {
            original_frame_count: placements.len(),
            normalized_dimensions: grid.sheet_size(),
            frame_size: grid.cell(),
            content_size: grid.content,
            padding: grid.padding,
            grid: GridShape {
                rows: grid.rows,
                cols: grid.columns,
            },
            forced_tile_size: forced,
            frames: placements
                .iter()
                .map(|p| FrameRecord {
                    row_index: p.row,
                    frame_index: p.column,
                    original_bounding_box: p.original_bounds,
                    original_size: p.original_size,
                    placement: p.rect,
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| NormError::Encode {
            message: format!("Failed to serialize sheet metadata: {}", e),
        })
    }
}

/// Write sheet metadata as pretty-printed JSON.
pub fn write_metadata_json(meta: &SheetMetadata, path: &Path) -> Result<()> {
    let json = meta.to_json()?;
    fs::write(path, json).map_err(|e| NormError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })?;
    Ok(())
}
