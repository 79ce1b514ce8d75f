//! Normalize command implementation.
//!
//! Normalizes a single raw sprite drawing into `<stem>.png` and `<stem>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{NormError, Result};
use crate::metadata::{write_metadata_json, SheetMetadata};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{NormalizedSheet, Normalizer};
use crate::render::{decode_image, write_png};

use super::options::OptionArgs;

/// Normalize one image into a spritesheet plus metadata
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw sprite image to normalize
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output directory (default: config `output`, else "normalized")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Base name for the outputs (default: input filename stem)
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

pub fn run(args: NormalizeArgs, printer: &Printer) -> Result<SheetMetadata> {
    let manifest = args.options.manifest(Path::new("."))?;
    let normalizer = Normalizer::new(args.options.apply(manifest.options)?)?;
    let output = args.output.clone().unwrap_or(manifest.output);

    let stem = args.name.clone().unwrap_or_else(|| file_stem(&args.input));
    normalize_file(&args.input, &output, &stem, &normalizer, printer)
}

/// Normalize `input` and write `<out_dir>/<stem>.png` and `<stem>.json`.
pub(crate) fn normalize_file(
    input: &Path,
    out_dir: &Path,
    stem: &str,
    normalizer: &Normalizer,
    printer: &Printer,
) -> Result<SheetMetadata> {
    let display = display_path(input);
    printer.status("Loading", &display);

    let bytes = fs::read(input).map_err(|e| NormError::Io {
        path: input.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })?;
    let source = decode_image(&bytes)?;
    printer.verbose(
        "Decoded",
        &format!("{}x{} image", source.width(), source.height()),
    );

    let sheet = normalizer.normalize_image(&source)?;
    report(&sheet, printer);

    fs::create_dir_all(out_dir).map_err(|e| NormError::Io {
        path: out_dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let png_path = out_dir.join(format!("{}.png", stem));
    let json_path = out_dir.join(format!("{}.json", stem));
    write_png(&sheet.image, &png_path)?;
    write_metadata_json(&sheet.metadata, &json_path)?;

    let size = sheet.metadata.normalized_dimensions;
    printer.status(
        "Finished",
        &format!(
            "{} -> {} ({}x{})",
            display,
            display_path(&png_path),
            size.width,
            size.height
        ),
    );

    Ok(sheet.metadata)
}

fn report(sheet: &NormalizedSheet, printer: &Printer) {
    let meta = &sheet.metadata;
    printer.info(
        "Detected",
        &format!(
            "{} in {} ({} cols)",
            plural(meta.original_frame_count, "frame", "frames"),
            plural(meta.grid.rows as usize, "row", "rows"),
            meta.grid.cols
        ),
    );
    printer.verbose(
        "Cell",
        &format!(
            "{}x{} (content {}x{}, padding {})",
            meta.frame_size.width,
            meta.frame_size.height,
            meta.content_size.width,
            meta.content_size.height,
            meta.padding
        ),
    );
    if sheet.noise > 0 {
        printer.verbose("Ignored", &plural(sheet.noise, "noise region", "noise regions"));
    }

    if printer.is_verbose() {
        for frame in &meta.frames {
            let b = frame.original_bounding_box;
            let p = frame.placement;
            printer.verbose(
                "Frame",
                &format!(
                    "[{}, {}] {}x{} at ({}, {}) -> {}x{} at ({}, {})",
                    frame.row_index, frame.frame_index, b.width, b.height, b.x, b.y, p.width, p.height, p.x, p.y
                ),
            );
        }
    }

    for skipped in &sheet.skipped {
        printer.warning(
            "Skipped",
            &format!("frame [{}, {}]: {}", skipped.row, skipped.column, skipped.error),
        );
    }
    let downscaled = meta
        .frames
        .iter()
        .filter(|f| f.placement.size() != f.original_size)
        .count();
    if downscaled > 0 {
        printer.warning(
            "Downscaled",
            &format!("{} to fit the cell", plural(downscaled, "frame", "frames")),
        );
    }
}

/// Input filename stem, or "sheet" when there is none.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    use crate::types::NormalizeOptions;

    fn write_source(dir: &Path) -> PathBuf {
        let mut img = RgbaImage::new(64, 64);
        for y in 0..10 {
            for x in 0..10 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
                img.put_pixel(x + 20, y, Rgba([255, 255, 255, 255]));
            }
        }
        let path = dir.join("walk.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_normalize_file_writes_outputs() {
        let dir = tempdir().unwrap();
        let input = write_source(dir.path());
        let out = dir.path().join("out");

        let normalizer = Normalizer::new(NormalizeOptions::default()).unwrap();
        let meta = normalize_file(&input, &out, "walk", &normalizer, &Printer::default()).unwrap();

        assert_eq!(meta.original_frame_count, 2);
        let sheet = image::open(out.join("walk.png")).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (28, 14));

        let json = fs::read_to_string(out.join("walk.json")).unwrap();
        let parsed: SheetMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn test_normalize_file_missing_input() {
        let dir = tempdir().unwrap();
        let normalizer = Normalizer::default();
        let err = normalize_file(
            &dir.path().join("missing.png"),
            dir.path(),
            "missing",
            &normalizer,
            &Printer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, NormError::Io { .. }));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("art/walk-cycle.png")), "walk-cycle");
        assert_eq!(file_stem(Path::new("/")), "sheet");
    }
}
