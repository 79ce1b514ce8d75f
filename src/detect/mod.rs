//! Sprite region detection.
//!
//! Finds 4-connected components of sufficiently opaque pixels and reports
//! one bounding box per component.

mod alpha;
mod regions;

pub use alpha::AlphaSampler;
pub use regions::{Coverage, Detection, Detector, MIN_REGION_EXTENT};
