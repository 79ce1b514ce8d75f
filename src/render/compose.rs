//! Sheet compositing.
//!
//! Frames larger than the inner cell area are downscaled uniformly, then
//! centered inside the inner area and alpha-blended onto a transparent canvas.

use std::borrow::Cow;

use image::{imageops, RgbaImage};

use crate::layout::Grid;
use crate::types::{BoundingBox, Resample, Size};

use super::ExtractedFrame;

/// Where a frame ended up on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: u32,
    pub column: u32,
    /// Box as detected in the source.
    pub original_bounds: BoundingBox,
    /// Size of the cropped frame before any scaling.
    pub original_size: Size,
    /// Rectangle covered on the sheet after scaling and centering.
    pub rect: BoundingBox,
}

/// Size a frame must be drawn at to fit `inner`.
///
/// Frames that already fit are left alone. Otherwise both sides are scaled by
/// `min(inner.w / w, inner.h / h)`, floored, never below one pixel.
pub fn scaled_size(size: Size, inner: Size) -> Size {
    if size.fits_within(inner) || size.width == 0 || size.height == 0 {
        return size;
    }
    let sx = f64::from(inner.width) / f64::from(size.width);
    let sy = f64::from(inner.height) / f64::from(size.height);
    let scale = sx.min(sy);
    Size::new(
        ((f64::from(size.width) * scale).floor() as u32).max(1),
        ((f64::from(size.height) * scale).floor() as u32).max(1),
    )
}

/// Downscale `image` if it does not fit `inner`.
pub fn fit_frame(image: &RgbaImage, inner: Size, resample: Resample) -> Cow<'_, RgbaImage> {
    let size = Size::new(image.width(), image.height());
    let target = scaled_size(size, inner);
    if target == size {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, target.width, target.height, resample.filter()))
    }
}

/// Draw every frame into its cell on a fresh sheet.
pub fn composite(frames: &[ExtractedFrame], grid: &Grid, resample: Resample) -> (RgbaImage, Vec<Placement>) {
    let sheet_size = grid.sheet_size();
    let mut sheet = RgbaImage::new(sheet_size.width, sheet_size.height);
    let inner = grid.inner();
    let mut placements = Vec::with_capacity(frames.len());

    for frame in frames {
        let fitted = fit_frame(&frame.image, inner, resample);
        let (w, h) = fitted.dimensions();

        let offset_x = inner.width.saturating_sub(w) / 2;
        let offset_y = inner.height.saturating_sub(h) / 2;
        let (origin_x, origin_y) = grid.inner_origin(frame.row, frame.column);
        let (x, y) = (origin_x + offset_x, origin_y + offset_y);

        imageops::overlay(&mut sheet, &*fitted, i64::from(x), i64::from(y));

        placements.push(Placement {
            row: frame.row,
            column: frame.column,
            original_bounds: frame.bounds,
            original_size: Size::new(frame.image.width(), frame.image.height()),
            rect: BoundingBox::new(x, y, w, h),
        });
    }

    (sheet, placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cluster_rows;
    use crate::types::ForcedTileSize;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn frame(w: u32, h: u32, row: u32, column: u32) -> ExtractedFrame {
        ExtractedFrame {
            image: RgbaImage::from_pixel(w, h, RED),
            row,
            column,
            bounds: BoundingBox::new(column * 100, row * 100, w, h),
        }
    }

    #[test]
    fn test_scaled_size_fits_unchanged() {
        assert_eq!(scaled_size(Size::new(10, 10), Size::new(10, 10)), Size::new(10, 10));
        assert_eq!(scaled_size(Size::new(4, 9), Size::new(10, 10)), Size::new(4, 9));
    }

    #[test]
    fn test_scaled_size_preserves_aspect() {
        assert_eq!(scaled_size(Size::new(30, 30), Size::new(16, 16)), Size::new(16, 16));
        assert_eq!(scaled_size(Size::new(40, 20), Size::new(16, 16)), Size::new(16, 8));
        // 0.5 * 15 = 7.5 floors to 7
        assert_eq!(scaled_size(Size::new(32, 15), Size::new(16, 16)), Size::new(16, 7));
    }

    #[test]
    fn test_scaled_size_minimum_one_pixel() {
        assert_eq!(scaled_size(Size::new(100, 2), Size::new(10, 10)), Size::new(10, 1));
        assert_eq!(scaled_size(Size::new(30, 30), Size::new(0, 0)), Size::new(1, 1));
    }

    #[test]
    fn test_fit_frame_borrows_when_fitting() {
        let img = RgbaImage::from_pixel(6, 6, RED);
        assert!(matches!(fit_frame(&img, Size::new(8, 8), Resample::Nearest), Cow::Borrowed(_)));
        let fitted = fit_frame(&img, Size::new(3, 3), Resample::Nearest);
        assert_eq!(fitted.dimensions(), (3, 3));
    }

    #[test]
    fn test_composite_centers_in_cell() {
        let rows = cluster_rows(&[BoundingBox::new(0, 0, 10, 10), BoundingBox::new(20, 0, 6, 4)]);
        let grid = Grid::build(&rows, 2, ForcedTileSize::default()).unwrap();
        let frames = vec![frame(10, 10, 0, 0), frame(6, 4, 0, 1)];

        let (sheet, placements) = composite(&frames, &grid, Resample::Nearest);
        assert_eq!(sheet.dimensions(), (28, 14));

        assert_eq!(placements[0].rect, BoundingBox::new(2, 2, 10, 10));
        // Inner area 10x10: offsets (2, 3) from the inner origin (16, 2)
        assert_eq!(placements[1].rect, BoundingBox::new(18, 5, 6, 4));

        // Padding stays transparent
        assert_eq!(sheet.get_pixel(0, 0).0[3], 0);
        assert_eq!(sheet.get_pixel(13, 7).0[3], 0);
        assert_eq!(*sheet.get_pixel(2, 2), RED);
        assert_eq!(*sheet.get_pixel(18, 5), RED);
        assert_eq!(sheet.get_pixel(17, 5).0[3], 0);
    }

    #[test]
    fn test_composite_downscales_into_forced_cell() {
        let rows = cluster_rows(&[BoundingBox::new(0, 0, 30, 30)]);
        let forced = ForcedTileSize {
            width: Some(20),
            height: Some(20),
        };
        let grid = Grid::build(&rows, 2, forced).unwrap();
        let (sheet, placements) = composite(&[frame(30, 30, 0, 0)], &grid, Resample::Nearest);

        assert_eq!(sheet.dimensions(), (20, 20));
        assert_eq!(placements[0].rect, BoundingBox::new(2, 2, 16, 16));
        assert_eq!(placements[0].original_size, Size::new(30, 30));
    }

    #[test]
    fn test_short_rows_leave_trailing_cells_empty() {
        let rows = cluster_rows(&[
            BoundingBox::new(0, 0, 8, 8),
            BoundingBox::new(20, 0, 8, 8),
            BoundingBox::new(0, 30, 8, 8),
        ]);
        let grid = Grid::build(&rows, 1, ForcedTileSize::default()).unwrap();
        let frames = vec![frame(8, 8, 0, 0), frame(8, 8, 0, 1), frame(8, 8, 1, 0)];
        let (sheet, _) = composite(&frames, &grid, Resample::Nearest);

        assert_eq!(sheet.dimensions(), (20, 20));
        let trailing = (10..20).flat_map(|x| (10..20).map(move |y| (x, y)));
        assert!(trailing.into_iter().all(|(x, y)| sheet.get_pixel(x, y).0[3] == 0));
    }

    #[test]
    fn test_padding_wider_than_forced_cell() {
        let rows = cluster_rows(&[BoundingBox::new(0, 0, 10, 10)]);
        let forced = ForcedTileSize {
            width: Some(8),
            height: Some(8),
        };
        let padding = u32::MAX / 2;
        let grid = Grid::build(&rows, padding, forced).unwrap();
        let (sheet, placements) = composite(&[frame(10, 10, 0, 0)], &grid, Resample::Nearest);

        assert_eq!(sheet.dimensions(), (8, 8));
        assert_eq!(placements[0].rect, BoundingBox::new(padding, padding, 1, 1));
        assert!(sheet.pixels().all(|p| p.0[3] == 0));
    }
}
