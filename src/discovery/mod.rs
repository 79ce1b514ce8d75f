//! Input discovery and project configuration.
//!
//! A directory may carry a `spritenorm.yaml` with default options, an output
//! directory and exclude patterns. Batch runs scan the directory for raster
//! images to normalize.

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{detect_raster, scan_directory, ScanResult};

/// The name of the configuration file.
pub const MANIFEST_FILENAME: &str = "spritenorm.yaml";

/// Configuration plus the inputs found under a root directory.
#[derive(Debug)]
pub struct DiscoveryResult {
    pub root: PathBuf,

    /// The loaded manifest (default if no spritenorm.yaml was found).
    pub manifest: Manifest,

    pub has_manifest: bool,

    /// Where normalized outputs go; never scanned.
    pub output: PathBuf,

    pub scan: ScanResult,
}

/// Load `spritenorm.yaml` from `dir`, falling back to defaults.
pub fn load_manifest(dir: &Path) -> Result<(Manifest, bool)> {
    let path = dir.join(MANIFEST_FILENAME);
    if path.is_file() {
        Ok((Manifest::load(&path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}

/// Discover raster inputs under `root`.
///
/// `config` replaces the root's own spritenorm.yaml and `output` replaces the
/// manifest's output directory, which is otherwise taken relative to `root`.
/// The resulting output directory is never scanned, so re-running a batch
/// does not pick up its own sheets.
pub fn discover(
    root: impl AsRef<Path>,
    config: Option<&Path>,
    output: Option<&Path>,
) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let (manifest, has_manifest) = match config {
        Some(path) => (Manifest::load(path)?, true),
        None => load_manifest(&root)?,
    };

    let output = match output {
        Some(dir) => dir.to_path_buf(),
        None if manifest.output.is_absolute() => manifest.output.clone(),
        None => root.join(&manifest.output),
    };
    let scan = scan_directory(&root, &manifest, Some(&output));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        output,
        scan,
    })
}
