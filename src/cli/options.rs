//! Normalization flags shared by several commands.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{load_manifest, Manifest};
use crate::error::{NormError, Result};
use crate::types::{NormalizeOptions, Resample, Size};

/// Flags that override configured normalization options
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Minimum alpha (0-255) for a pixel to count as sprite content
    #[arg(long, short)]
    pub threshold: Option<u8>,

    /// Empty border in pixels around each frame inside its cell
    #[arg(long, short)]
    pub padding: Option<u32>,

    /// Force the cell size as WxH (e.g. 32x48)
    #[arg(long, conflicts_with_all = ["tile_width", "tile_height"])]
    pub tile: Option<String>,

    /// Force the cell width
    #[arg(long)]
    pub tile_width: Option<u32>,

    /// Force the cell height
    #[arg(long)]
    pub tile_height: Option<u32>,

    /// Filter used when a frame is downscaled
    #[arg(long, value_enum)]
    pub resample: Option<Resample>,

    /// Config file (default: ./spritenorm.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl OptionArgs {
    /// Apply the flags on top of `base`.
    pub fn apply(&self, base: NormalizeOptions) -> Result<NormalizeOptions> {
        let mut opts = base;
        if let Some(t) = self.threshold {
            opts.transparency_threshold = t;
        }
        if let Some(p) = self.padding {
            opts.padding = p;
        }
        if let Some(ref tile) = self.tile {
            let (w, h) = parse_dimensions(tile)?;
            opts = opts.with_tile_size(Size::new(w, h));
        }
        if let Some(w) = self.tile_width {
            opts.force_tile_width = Some(w);
        }
        if let Some(h) = self.tile_height {
            opts.force_tile_height = Some(h);
        }
        if let Some(r) = self.resample {
            opts.resample = r;
        }
        opts.validate()?;
        Ok(opts)
    }

    /// Load the config named by `--config`, or the one in `fallback_dir`.
    pub fn manifest(&self, fallback_dir: &Path) -> Result<Manifest> {
        match &self.config {
            Some(path) => Manifest::load(path),
            None => Ok(load_manifest(fallback_dir)?.0),
        }
    }
}

/// Parse a "WxH" dimension string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
    if parts.len() != 2 {
        return Err(NormError::Parse {
            message: format!("Invalid dimensions '{}': expected WxH (e.g. 32x32)", s),
            help: Some("Use the format WxH, for example: 32x32, 16x24".to_string()),
        });
    }

    let w: u32 = parts[0].trim().parse().map_err(|_| NormError::Parse {
        message: format!("Invalid width '{}' in dimensions '{}'", parts[0], s),
        help: Some("Width must be a positive integer".to_string()),
    })?;

    let h: u32 = parts[1].trim().parse().map_err(|_| NormError::Parse {
        message: format!("Invalid height '{}' in dimensions '{}'", parts[1], s),
        help: Some("Height must be a positive integer".to_string()),
    })?;

    if w == 0 || h == 0 {
        return Err(NormError::Parse {
            message: format!("Dimensions must be non-zero, got {}x{}", w, h),
            help: Some("Both width and height must be at least 1".to_string()),
        });
    }

    Ok((w, h))
}
