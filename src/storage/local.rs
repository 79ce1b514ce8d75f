//! `(bucket, path)` asset stores.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{NormError, Result};

/// Object storage keyed by bucket and bucket-relative path.
pub trait AssetStore {
    fn read(&self, bucket: &str, path: &str) -> Result<Vec<u8>>;

    /// Create or replace the object at `path`.
    fn write(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> Result<()>;
}

/// Filesystem store: each bucket is a directory under `root`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map `(bucket, path)` to a file under the root.
    ///
    /// Only plain relative segments are accepted, so a key can never escape
    /// its bucket directory.
    pub fn resolve(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        let bad = |message: &str| NormError::Storage {
            bucket: bucket.to_string(),
            path: path.to_string(),
            message: message.to_string(),
        };

        if bucket.is_empty() || !is_plain_relative(Path::new(bucket)) || bucket.contains('/') {
            return Err(bad("bucket must be a single plain directory name"));
        }
        if path.is_empty() || !is_plain_relative(Path::new(path)) {
            return Err(bad("path must be relative and must not contain '..'"));
        }

        Ok(self.root.join(bucket).join(path))
    }
}

fn is_plain_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

impl AssetStore for LocalStore {
    fn read(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let file = self.resolve(bucket, path)?;
        fs::read(&file).map_err(|e| NormError::Storage {
            bucket: bucket.to_string(),
            path: path.to_string(),
            message: format!("download failed: {}", e),
        })
    }

    fn write(&self, bucket: &str, path: &str, bytes: &[u8], _content_type: &str) -> Result<()> {
        let file = self.resolve(bucket, path)?;
        let upload_err = |e: std::io::Error| NormError::Storage {
            bucket: bucket.to_string(),
            path: path.to_string(),
            message: format!("upload failed: {}", e),
        };
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(upload_err)?;
        }
        fs::write(&file, bytes).map_err(upload_err)
    }
}
