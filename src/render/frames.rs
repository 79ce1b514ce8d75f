//! Frame extraction.
//!
//! Each detected box is cropped into an owned image. A box that cannot be
//! cropped is recorded as skipped and the rest of the batch carries on.

use image::{imageops, RgbaImage};

use crate::error::FrameError;
use crate::layout::Row;
use crate::types::BoundingBox;

/// A frame cropped out of the source, tagged with its grid cell.
#[derive(Debug, Clone)]
pub struct ExtractedFrame {
    pub image: RgbaImage,
    pub row: u32,
    pub column: u32,
    /// Box as detected in the source.
    pub bounds: BoundingBox,
}

/// A frame that could not be cropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    pub row: u32,
    pub column: u32,
    pub bounds: BoundingBox,
    pub error: FrameError,
}

/// Successfully cropped frames plus the ones that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub frames: Vec<ExtractedFrame>,
    pub skipped: Vec<SkippedFrame>,
}

/// Clamp a box so it lies inside a `width x height` source.
pub fn clamp_to_source(bounds: BoundingBox, width: u32, height: u32) -> Result<BoundingBox, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::EmptySource);
    }
    let x = bounds.x.min(width - 1);
    let y = bounds.y.min(height - 1);
    let clamped = BoundingBox::new(x, y, bounds.width.min(width - x), bounds.height.min(height - y));
    if clamped.width == 0 || clamped.height == 0 {
        return Err(FrameError::EmptyRegion { bounds });
    }
    Ok(clamped)
}

/// Copy the pixels under `bounds` out of `source`.
pub fn crop_frame(source: &RgbaImage, bounds: BoundingBox) -> Result<RgbaImage, FrameError> {
    let c = clamp_to_source(bounds, source.width(), source.height())?;
    Ok(imageops::crop_imm(source, c.x, c.y, c.width, c.height).to_image())
}

/// Crop every box of every row. Row and column indices follow `rows`.
pub fn extract_frames(source: &RgbaImage, rows: &[Row]) -> Extraction {
    let mut extraction = Extraction::default();

    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, &bounds) in row.boxes.iter().enumerate() {
            let (row, column) = (row_index as u32, column_index as u32);
            match crop_frame(source, bounds) {
                Ok(image) => extraction.frames.push(ExtractedFrame {
                    image,
                    row,
                    column,
                    bounds,
                }),
                Err(error) => extraction.skipped.push(SkippedFrame {
                    row,
                    column,
                    bounds,
                    error,
                }),
            }
        }
    }

    extraction
}
