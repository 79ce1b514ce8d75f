//! File system scanner for raster inputs.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use walkdir::WalkDir;

use super::manifest::Manifest;

/// Raster formats picked up by batch discovery.
const RASTER_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::Bmp,
];

/// Images found by a scan, in path order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub images: Vec<PathBuf>,
    /// Files skipped by exclude patterns.
    pub excluded: usize,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Detect a supported raster format from the file extension.
pub fn detect_raster(path: &Path) -> Option<ImageFormat> {
    let format = ImageFormat::from_path(path).ok()?;
    RASTER_FORMATS.contains(&format).then_some(format)
}

/// Recursively scan `root` for raster images.
///
/// The directory `skip` names is pruned, however its path is spelled.
pub fn scan_directory(root: &Path, manifest: &Manifest, skip: Option<&Path>) -> ScanResult {
    let mut result = ScanResult::default();

    if !root.exists() {
        return result;
    }

    // A skip directory that does not exist yet has nothing to prune
    let skip = skip.and_then(|s| s.canonicalize().ok());
    let is_skipped = |entry: &walkdir::DirEntry| match &skip {
        Some(skip) => {
            entry.file_type().is_dir()
                && entry.path().canonicalize().is_ok_and(|p| &p == skip)
        }
        None => false,
    };

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || detect_raster(path).is_none() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if manifest.is_excluded(relative) {
            result.excluded += 1;
            continue;
        }

        result.images.push(path.to_path_buf());
    }

    result
}
