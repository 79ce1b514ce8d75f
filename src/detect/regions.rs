//! Connected-component scan over the alpha channel.
//!
//! One pass over the image in row-major order; each opaque pixel that has
//! not been claimed yet seeds an iterative flood fill. Every pixel is claimed
//! exactly once, either by the scan (below threshold) or by a single fill.

use crate::error::{NormError, Result};
use crate::types::BoundingBox;

use super::AlphaSampler;

/// Components whose width or height is at or below this are treated as noise.
pub const MIN_REGION_EXTENT: u32 = 5;

/// How the scan partitioned the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Pixels claimed by flood fills, noise components included.
    pub filled: u64,
    /// Pixels below the threshold.
    pub background: u64,
}

impl Coverage {
    pub fn total(&self) -> u64 {
        self.filled + self.background
    }
}

/// Result of a detection scan.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Bounding boxes of surviving components, in discovery order.
    pub boxes: Vec<BoundingBox>,
    /// Number of components discarded by the noise filter.
    pub noise: usize,
    pub coverage: Coverage,
}

/// Opacity-threshold region detector.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    threshold: u8,
}

impl Detector {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Detect sprite regions, failing with `NoFramesDetected` when none survive.
    pub fn detect<S: AlphaSampler + ?Sized>(&self, image: &S) -> Result<Detection> {
        let detection = self.scan(image);
        if detection.boxes.is_empty() {
            return Err(NormError::no_frames(self.threshold, detection.noise));
        }
        Ok(detection)
    }

    /// Scan the whole image. Never fails; an empty `boxes` list is valid here.
    pub fn scan<S: AlphaSampler + ?Sized>(&self, image: &S) -> Detection {
        let (width, height) = (image.width(), image.height());
        let mut detection = Detection::default();
        if width == 0 || height == 0 {
            return detection;
        }

        let mut visited = vec![false; width as usize * height as usize];

        for y in 0..height {
            for x in 0..width {
                let idx = y as usize * width as usize + x as usize;
                if visited[idx] {
                    continue;
                }
                if image.alpha(i64::from(x), i64::from(y)) < self.threshold {
                    detection.coverage.background += 1;
                    continue;
                }

                let (bounds, area) = self.fill(image, &mut visited, x, y);
                detection.coverage.filled += area;

                if bounds.exceeds(MIN_REGION_EXTENT) {
                    detection.boxes.push(bounds);
                } else {
                    detection.noise += 1;
                }
            }
        }

        detection
    }

    /// Claim every pixel reachable from `(sx, sy)` and return its bounds and area.
    fn fill<S: AlphaSampler + ?Sized>(
        &self,
        image: &S,
        visited: &mut [bool],
        sx: u32,
        sy: u32,
    ) -> (BoundingBox, u64) {
        let width = i64::from(image.width());
        let height = i64::from(image.height());

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (sx, sx, sy, sy);
        let mut area = 0u64;

        let mut stack: Vec<(i64, i64)> = Vec::with_capacity(64);
        stack.push((i64::from(sx), i64::from(sy)));

        while let Some((x, y)) = stack.pop() {
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let idx = (y * width + x) as usize;
            if visited[idx] || image.alpha(x, y) < self.threshold {
                continue;
            }
            visited[idx] = true;
            area += 1;

            let (ux, uy) = (x as u32, y as u32);
            min_x = min_x.min(ux);
            max_x = max_x.max(ux);
            min_y = min_y.min(uy);
            max_y = max_y.max(uy);

            stack.push((x + 1, y));
            stack.push((x - 1, y));
            stack.push((x, y + 1));
            stack.push((x, y - 1));
        }

        (BoundingBox::from_extent(min_x, min_y, max_x, max_y), area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]))
    }

    fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, alpha: u8) {
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, Rgba([200, 40, 40, alpha]));
            }
        }
    }

    #[test]
    fn test_two_squares() {
        let mut img = canvas(64, 64);
        fill_rect(&mut img, 0, 0, 10, 10, 255);
        fill_rect(&mut img, 20, 0, 10, 10, 255);

        let detection = Detector::new(10).detect(&img).unwrap();
        assert_eq!(
            detection.boxes,
            vec![BoundingBox::new(0, 0, 10, 10), BoundingBox::new(20, 0, 10, 10)]
        );
        assert_eq!(detection.noise, 0);
    }

    #[test]
    fn test_fully_transparent_is_no_frames() {
        let img = canvas(32, 32);
        let err = Detector::new(10).detect(&img).unwrap_err();
        assert!(matches!(err, NormError::NoFramesDetected { threshold: 10, noise: 0, .. }));
    }

    #[test]
    fn test_below_threshold_is_background() {
        let mut img = canvas(16, 16);
        fill_rect(&mut img, 2, 2, 8, 8, 9);

        let detection = Detector::new(10).scan(&img);
        assert!(detection.boxes.is_empty());
        assert_eq!(detection.coverage.filled, 0);

        // Exactly at the threshold counts
        let detection = Detector::new(9).scan(&img);
        assert_eq!(detection.boxes, vec![BoundingBox::new(2, 2, 8, 8)]);
    }

    #[test]
    fn test_noise_filter_boundary() {
        let mut img = canvas(40, 40);
        fill_rect(&mut img, 0, 0, 5, 20, 255); // width == 5, dropped
        fill_rect(&mut img, 10, 0, 20, 5, 255); // height == 5, dropped
        fill_rect(&mut img, 10, 10, 6, 6, 255); // 6x6, kept
        img.put_pixel(35, 35, Rgba([255, 255, 255, 255])); // speck

        let detection = Detector::new(10).scan(&img);
        assert_eq!(detection.boxes, vec![BoundingBox::new(10, 10, 6, 6)]);
        assert_eq!(detection.noise, 3);
        assert!(detection.boxes.iter().all(|b| b.width > 5 && b.height > 5));
    }

    #[test]
    fn test_only_noise_reports_noise_count() {
        let mut img = canvas(20, 20);
        fill_rect(&mut img, 1, 1, 3, 3, 255);
        let err = Detector::new(10).detect(&img).unwrap_err();
        assert!(matches!(err, NormError::NoFramesDetected { noise: 1, .. }));
    }

    #[test]
    fn test_diagonal_pixels_do_not_connect() {
        let mut img = canvas(30, 30);
        fill_rect(&mut img, 0, 0, 8, 8, 255);
        fill_rect(&mut img, 8, 8, 8, 8, 255); // touches only at a corner

        let detection = Detector::new(10).scan(&img);
        assert_eq!(detection.boxes.len(), 2);
    }

    #[test]
    fn test_irregular_shape_bounds() {
        // An L shape: bounding box spans both arms
        let mut img = canvas(30, 30);
        fill_rect(&mut img, 3, 4, 2, 12, 255);
        fill_rect(&mut img, 3, 14, 10, 2, 255);

        let detection = Detector::new(10).scan(&img);
        assert_eq!(detection.boxes, vec![BoundingBox::new(3, 4, 10, 12)]);
        assert_eq!(detection.coverage.filled, 24 + 16);
    }

    #[test]
    fn test_coverage_partitions_image() {
        let mut img = canvas(50, 37);
        fill_rect(&mut img, 0, 0, 10, 10, 255);
        fill_rect(&mut img, 12, 3, 7, 30, 128);
        fill_rect(&mut img, 40, 30, 10, 7, 255); // touches the image corner
        img.put_pixel(25, 25, Rgba([1, 2, 3, 255]));

        let detection = Detector::new(10).scan(&img);
        assert_eq!(detection.coverage.total(), 50 * 37);
        assert_eq!(detection.coverage.filled, 100 + 210 + 70 + 1);
        assert_eq!(detection.boxes.len(), 3);
    }

    #[test]
    fn test_region_filling_whole_image() {
        // A region covering the entire image exercises every border read
        let img = RgbaImage::from_pixel(300, 200, Rgba([0, 0, 0, 255]));
        let detection = Detector::new(10).detect(&img).unwrap();
        assert_eq!(detection.boxes, vec![BoundingBox::new(0, 0, 300, 200)]);
        assert_eq!(detection.coverage.filled, 300 * 200);
        assert_eq!(detection.coverage.background, 0);
    }

    #[test]
    fn test_empty_image() {
        let img = RgbaImage::new(0, 0);
        let detection = Detector::new(10).scan(&img);
        assert!(detection.boxes.is_empty());
        assert_eq!(detection.coverage.total(), 0);
    }
}
