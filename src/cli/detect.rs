//! Detect command implementation.
//!
//! Runs detection and row clustering only, printing the result as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::detect::Detector;
use crate::error::{NormError, Result};
use crate::layout::{cluster_rows, Row};
use crate::output::{display_path, plural, Printer};
use crate::render::decode_image;

use super::options::OptionArgs;

/// Print detected regions and rows as JSON without rendering
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Raw sprite image to inspect
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Detection summary written to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectReport {
    pub width: u32,
    pub height: u32,
    pub threshold: u8,
    pub frame_count: usize,
    pub noise_regions: usize,
    pub rows: Vec<Row>,
}

pub fn run(args: DetectArgs, printer: &Printer) -> Result<DetectReport> {
    let manifest = args.options.manifest(Path::new("."))?;
    let opts = args.options.apply(manifest.options)?;

    printer.status("Loading", &display_path(&args.input));
    let bytes = fs::read(&args.input).map_err(|e| NormError::Io {
        path: args.input.clone(),
        message: format!("Failed to read image: {}", e),
    })?;
    let source = decode_image(&bytes)?;

    let detection = Detector::new(opts.transparency_threshold).scan(&source);
    let rows = cluster_rows(&detection.boxes);

    printer.info(
        "Detected",
        &format!(
            "{} in {}",
            plural(detection.boxes.len(), "frame", "frames"),
            plural(rows.len(), "row", "rows")
        ),
    );
    printer.verbose(
        "Coverage",
        &format!(
            "{} opaque, {} background of {} pixels",
            detection.coverage.filled,
            detection.coverage.background,
            detection.coverage.total()
        ),
    );
    if detection.boxes.is_empty() {
        printer.warning("Warning", "no frames detected; try a lower --threshold");
    }

    let report = DetectReport {
        width: source.width(),
        height: source.height(),
        threshold: opts.transparency_threshold,
        frame_count: detection.boxes.len(),
        noise_regions: detection.noise,
        rows,
    };

    let json = serde_json::to_string_pretty(&report).map_err(|e| NormError::Encode {
        message: format!("Failed to serialize detection report: {}", e),
    })?;
    println!("{}", json);

    Ok(report)
}
