//! spritenorm - Sprite drawing normalizer
//!
//! Detects irregularly placed sprites on a transparent background, infers
//! their row/column layout and re-renders them into a uniform grid, together
//! with a metadata document describing the transformation.
//!
//! ```no_run
//! use spritenorm::{normalize, NormalizeOptions};
//!
//! let raw = std::fs::read("walk-cycle.png")?;
//! let out = normalize(&raw, &NormalizeOptions::default())?;
//! std::fs::write("sheet.png", &out.sheet_png)?;
//! println!("{}", out.metadata.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod detect;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod storage;
pub mod types;

pub use detect::{AlphaSampler, Coverage, Detection, Detector, MIN_REGION_EXTENT};
pub use discovery::{discover, DiscoveryResult, Manifest, ScanResult};
pub use error::{FrameError, NormError, Result};
pub use layout::{cluster_rows, Grid, Row};
pub use metadata::{write_metadata_json, FrameRecord, GridShape, SheetMetadata};
pub use pipeline::{normalize, NormalizedOutput, NormalizedSheet, Normalizer};
pub use render::{composite, decode_image, encode_png, extract_frames, ExtractedFrame, Placement};
pub use storage::{canonical_key, run_job, AssetStore, JobReport, JobRequest, LocalStore};
pub use types::{BoundingBox, ForcedTileSize, NormalizeOptions, Resample, Size};
