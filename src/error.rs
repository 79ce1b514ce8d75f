use miette::Diagnostic;
use thiserror::Error;

use crate::types::BoundingBox;

/// Main error type for spritenorm operations
#[derive(Error, Diagnostic, Debug)]
pub enum NormError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spritenorm::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Decode failed: {message}")]
    #[diagnostic(
        code(spritenorm::decode),
        help("The source must be an encoded raster image (PNG, WebP, JPEG, ...)")
    )]
    Decode { message: String },

    #[error("No frames detected at transparency threshold {threshold}")]
    #[diagnostic(code(spritenorm::no_frames))]
    NoFramesDetected {
        threshold: u8,
        /// Components found but discarded as noise.
        noise: usize,
        #[help]
        help: Option<String>,
    },

    #[error("Encode failed: {message}")]
    #[diagnostic(code(spritenorm::encode))]
    Encode { message: String },

    #[error("Invalid options: {message}")]
    #[diagnostic(code(spritenorm::options))]
    InvalidOptions {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Sheet too large: {message}")]
    #[diagnostic(
        code(spritenorm::sheet_too_large),
        help("Lower the forced tile size or the padding")
    )]
    SheetTooLarge { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(spritenorm::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid request: {message}")]
    #[diagnostic(code(spritenorm::request))]
    Request {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} inputs failed to normalize")]
    #[diagnostic(code(spritenorm::batch))]
    Batch { failed: usize, total: usize },

    #[error("Storage error for {bucket}/{path}: {message}")]
    #[diagnostic(code(spritenorm::storage))]
    Storage {
        bucket: String,
        path: String,
        message: String,
    },
}

impl NormError {
    /// Build the no-frames condition for a given threshold.
    pub fn no_frames(threshold: u8, noise: usize) -> Self {
        let help = if noise > 0 {
            format!(
                "{} region(s) were found but all were 5px or smaller; check the source or lower the threshold",
                noise
            )
        } else {
            "The image has no pixels at or above the threshold; try a lower --threshold".to_string()
        };
        NormError::NoFramesDetected {
            threshold,
            noise,
            help: Some(help),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormError>;

/// Failure to extract a single frame. Never fatal for the sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("source image is empty")]
    EmptySource,

    #[error("region {bounds:?} clamps to an empty crop")]
    EmptyRegion { bounds: BoundingBox },
}
