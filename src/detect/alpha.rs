//! Per-pixel opacity access.

use image::RgbaImage;

/// Read-only view of a raster's alpha channel.
///
/// Coordinates outside the image, negative ones included, read as fully
/// transparent.
pub trait AlphaSampler {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn alpha(&self, x: i64, y: i64) -> u8;
}

impl AlphaSampler for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn alpha(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return 0;
        }
        self.get_pixel(x as u32, y as u32)[3]
    }
}
