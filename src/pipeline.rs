//! End-to-end normalization.
//!
//! decode -> detect -> cluster -> size grid -> composite -> encode + metadata.
//! Every call allocates its own buffers; nothing is shared between calls.

use image::RgbaImage;

use crate::detect::Detector;
use crate::error::Result;
use crate::layout::{cluster_rows, Grid, Row};
use crate::metadata::SheetMetadata;
use crate::render::{composite, decode_image, encode_png, extract_frames, SkippedFrame};
use crate::types::NormalizeOptions;

/// A normalized sheet still in memory.
#[derive(Debug, Clone)]
pub struct NormalizedSheet {
    pub image: RgbaImage,
    pub metadata: SheetMetadata,
    /// Row clusters the grid was built from.
    pub rows: Vec<Row>,
    /// Frames that could not be cropped and were left out.
    pub skipped: Vec<SkippedFrame>,
    /// Components dropped by the noise filter.
    pub noise: usize,
}

/// Encoded output of `normalize`.
#[derive(Debug, Clone)]
pub struct NormalizedOutput {
    pub sheet_png: Vec<u8>,
    pub metadata: SheetMetadata,
    pub skipped: usize,
}

/// Normalizes raw sprite drawings with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Normalize an already decoded image.
    pub fn normalize_image(&self, source: &RgbaImage) -> Result<NormalizedSheet> {
        let opts = &self.options;

        let detection = Detector::new(opts.transparency_threshold).detect(source)?;
        let rows = cluster_rows(&detection.boxes);
        let grid = Grid::build(&rows, opts.padding, opts.forced_tile_size())?;

        let extraction = extract_frames(source, &rows);
        let (image, placements) = composite(&extraction.frames, &grid, opts.resample);
        let metadata = SheetMetadata::describe(&grid, opts.forced_tile_size(), &placements);

        Ok(NormalizedSheet {
            image,
            metadata,
            rows,
            skipped: extraction.skipped,
            noise: detection.noise,
        })
    }

    /// Decode, normalize and re-encode as PNG.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<NormalizedOutput> {
        let source = decode_image(bytes)?;
        let sheet = self.normalize_image(&source)?;
        Ok(NormalizedOutput {
            sheet_png: encode_png(&sheet.image)?,
            skipped: sheet.skipped.len(),
            metadata: sheet.metadata,
        })
    }
}

/// Normalize encoded image bytes into a PNG sheet plus metadata.
pub fn normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<NormalizedOutput> {
    Normalizer::new(*options)?.normalize_bytes(bytes)
}
