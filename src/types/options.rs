//! Per-call normalization options.
//!
//! Field names follow the wire format of normalization requests
//! (`transparencyThreshold`, `padding`, `forceTileWidth`, `forceTileHeight`).

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{NormError, Result};

use super::Size;

/// Default minimum opacity for a pixel to count as sprite content.
pub const DEFAULT_THRESHOLD: u8 = 10;

/// Default empty border kept around each frame inside its cell.
pub const DEFAULT_PADDING: u32 = 2;

/// Options for a single normalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Minimum alpha (0-255) for a pixel to belong to a sprite region.
    pub transparency_threshold: u8,

    /// Border in pixels on each side of a frame within its cell.
    #[serde(alias = "normalizedPadding")]
    pub padding: u32,

    /// Cell width override, used verbatim.
    pub force_tile_width: Option<u32>,

    /// Cell height override, used verbatim.
    pub force_tile_height: Option<u32>,

    /// Filter used when a frame has to be downscaled into its cell.
    pub resample: Resample,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            transparency_threshold: DEFAULT_THRESHOLD,
            padding: DEFAULT_PADDING,
            force_tile_width: None,
            force_tile_height: None,
            resample: Resample::default(),
        }
    }
}

impl NormalizeOptions {
    /// Force both cell dimensions.
    pub fn with_tile_size(mut self, size: Size) -> Self {
        self.force_tile_width = Some(size.width);
        self.force_tile_height = Some(size.height);
        self
    }

    pub fn forced_tile_size(&self) -> ForcedTileSize {
        ForcedTileSize {
            width: self.force_tile_width,
            height: self.force_tile_height,
        }
    }

    /// Reject options that cannot produce an encodable sheet.
    pub fn validate(&self) -> Result<()> {
        if self.force_tile_width == Some(0) || self.force_tile_height == Some(0) {
            return Err(NormError::InvalidOptions {
                message: format!(
                    "Forced tile size must be non-zero, got {}x{}",
                    fmt_dim(self.force_tile_width),
                    fmt_dim(self.force_tile_height)
                ),
                help: Some("Omit the tile size to derive it from the detected frames".to_string()),
            });
        }
        Ok(())
    }
}

fn fmt_dim(dim: Option<u32>) -> String {
    dim.map_or_else(|| "auto".to_string(), |d| d.to_string())
}

/// Caller-supplied cell dimensions; each side is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForcedTileSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Resampling filter for downscaled frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Resample {
    /// Nearest neighbour; keeps pixel art crisp.
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl Resample {
    pub fn filter(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
