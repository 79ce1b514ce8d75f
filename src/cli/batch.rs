//! Batch command implementation.
//!
//! Normalizes every raster image under a directory. A failing input is
//! reported and the batch moves on.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover;
use crate::error::{NormError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::Normalizer;

use super::normalize::{file_stem, normalize_file};
use super::options::OptionArgs;

/// Normalize every image under a directory
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory to scan for raw sprite images
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Output directory (default: config `output`, relative to DIR)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub normalized: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

pub fn run(args: BatchArgs, printer: &Printer) -> Result<BatchSummary> {
    let discovery = discover(
        &args.dir,
        args.options.config.as_deref(),
        args.output.as_deref(),
    )?;
    let normalizer = Normalizer::new(args.options.apply(discovery.manifest.options)?)?;
    let output = &discovery.output;

    let images = &discovery.scan.images;
    printer.status(
        "Scanning",
        &format!(
            "{} ({} found)",
            display_path(&discovery.root),
            plural(images.len(), "image", "images")
        ),
    );
    if discovery.scan.excluded > 0 {
        printer.verbose("Excluded", &plural(discovery.scan.excluded, "file", "files"));
    }

    let mut summary = BatchSummary::default();
    for image in images {
        let relative = image.strip_prefix(&discovery.root).unwrap_or(image);
        let out_dir = match relative.parent() {
            Some(parent) => output.join(parent),
            None => output.clone(),
        };

        match normalize_file(image, &out_dir, &file_stem(image), &normalizer, printer) {
            Ok(_) => summary.normalized.push(image.clone()),
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", display_path(image), e));
                summary.failed.push((image.clone(), e.to_string()));
            }
        }
    }

    printer.info(
        "Summary",
        &format!(
            "{} normalized, {} failed",
            plural(summary.normalized.len(), "image", "images"),
            summary.failed.len()
        ),
    );

    if !summary.failed.is_empty() {
        return Err(NormError::Batch {
            failed: summary.failed.len(),
            total: images.len(),
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn sprite(path: &std::path::Path) {
        let mut img = RgbaImage::new(32, 32);
        for y in 4..20 {
            for x in 4..20 {
                img.put_pixel(x, y, Rgba([9, 9, 9, 255]));
            }
        }
        img.save(path).unwrap();
    }

    fn args(dir: PathBuf) -> BatchArgs {
        BatchArgs {
            dir,
            output: None,
            options: OptionArgs::default(),
        }
    }

    #[test]
    fn test_batch_mirrors_directory_layout() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("npc")).unwrap();
        sprite(&dir.path().join("hero.png"));
        sprite(&dir.path().join("npc/guard.png"));

        let summary = run(args(dir.path().to_path_buf()), &Printer::default()).unwrap();
        assert_eq!(summary.normalized.len(), 2);
        assert!(dir.path().join("normalized/hero.png").is_file());
        assert!(dir.path().join("normalized/hero.json").is_file());
        assert!(dir.path().join("normalized/npc/guard.png").is_file());
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let dir = tempdir().unwrap();
        sprite(&dir.path().join("a.png"));
        fs::write(dir.path().join("b.png"), b"not a png").unwrap();
        RgbaImage::new(16, 16).save(dir.path().join("c.png")).unwrap();

        let err = run(args(dir.path().to_path_buf()), &Printer::default()).unwrap_err();
        assert!(matches!(err, NormError::Batch { failed: 2, total: 3 }));
        assert!(dir.path().join("normalized/a.png").is_file());
    }

    #[test]
    fn test_batch_rerun_ignores_outputs() {
        let dir = tempdir().unwrap();
        sprite(&dir.path().join("hero.png"));

        run(args(dir.path().to_path_buf()), &Printer::default()).unwrap();
        let summary = run(args(dir.path().to_path_buf()), &Printer::default()).unwrap();
        assert_eq!(summary.normalized, vec![dir.path().join("hero.png")]);
    }

    #[test]
    fn test_batch_rerun_ignores_explicit_output() {
        let dir = tempdir().unwrap();
        sprite(&dir.path().join("hero.png"));
        let sheets = dir.path().join("sheets");

        let with_output = || BatchArgs {
            output: Some(sheets.clone()),
            ..args(dir.path().to_path_buf())
        };
        run(with_output(), &Printer::default()).unwrap();
        let summary = run(with_output(), &Printer::default()).unwrap();

        assert_eq!(summary.normalized, vec![dir.path().join("hero.png")]);
        assert!(sheets.join("hero.png").is_file());
        assert!(!sheets.join("sheets").exists());
    }

    #[test]
    fn test_batch_uses_config_flag() {
        let dir = tempdir().unwrap();
        sprite(&dir.path().join("hero.png"));
        sprite(&dir.path().join("hero.bak.png"));
        let config = dir.path().join("batch.yaml");
        fs::write(&config, "output: dist\nexcludes:\n  - \"*.bak.png\"\n").unwrap();

        let mut batch = args(dir.path().to_path_buf());
        batch.options.config = Some(config);
        let summary = run(batch, &Printer::default()).unwrap();

        assert_eq!(summary.normalized, vec![dir.path().join("hero.png")]);
        assert!(dir.path().join("dist/hero.png").is_file());
        assert!(!dir.path().join("normalized").exists());
    }
}
