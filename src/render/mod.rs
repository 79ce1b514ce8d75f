//! Rendering for spritenorm.
//!
//! Crops detected frames out of the source, fits them into grid cells and
//! encodes the finished sheet.

mod compose;
mod frames;
mod png;

pub use compose::{composite, fit_frame, scaled_size, Placement};
pub use frames::{clamp_to_source, crop_frame, extract_frames, ExtractedFrame, Extraction, SkippedFrame};
pub use png::{decode_image, encode_png, sniff_format, write_png};
