//! Core domain types for spritenorm.
//!
//! - `BoundingBox` / `Size` - integer pixel geometry
//! - `NormalizeOptions` - per-call thresholds, padding and tile overrides
//! - `Resample` - filter used when a frame must be downscaled

mod geometry;
mod options;

pub use geometry::{BoundingBox, Size};
pub use options::{ForcedTileSize, NormalizeOptions, Resample};
