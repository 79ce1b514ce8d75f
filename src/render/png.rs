//! Image codec helpers.
//!
//! Decodes source bytes in any format the `image` crate understands and
//! encodes finished sheets as PNG.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{NormError, Result};

/// Decode raw bytes into an RGBA buffer.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(NormError::Decode {
            message: "source is empty".to_string(),
        });
    }
    let img = image::load_from_memory(bytes).map_err(|e| NormError::Decode {
        message: match sniff_format(bytes) {
            Some(format) => format!("{:?} data is invalid: {}", format, e),
            None => format!("unrecognized image data: {}", e),
        },
    })?;
    Ok(img.to_rgba8())
}

/// Guess the container format from the leading magic bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| NormError::Encode {
            message: format!("Failed to encode {}x{} PNG: {}", img.width(), img.height(), e),
        })?;
    Ok(bytes)
}

/// Write an RGBA buffer to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| NormError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}
