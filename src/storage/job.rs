//! Store-backed normalization jobs.
//!
//! Reads a raw upload, normalizes it and writes the sheet and metadata to the
//! owner's output paths. Identity checks and job bookkeeping belong to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::error::{NormError, Result};
use crate::pipeline::Normalizer;
use crate::types::NormalizeOptions;

use super::key::{canonical_key, ensure_owned, OutputPaths};
use super::AssetStore;

/// A normalization request as received from a hosting service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequest {
    pub bucket: String,
    /// Object key, storage path or object URL of the raw upload.
    pub key: String,
    #[serde(alias = "user_id")]
    pub owner: String,
    pub options: Option<NormalizeOptions>,
}

impl JobRequest {
    /// Check required fields and return the canonical, owner-scoped key.
    pub fn validate(&self) -> Result<String> {
        if self.bucket.is_empty() || self.key.is_empty() || self.owner.is_empty() {
            return Err(NormError::Request {
                message: "bucket, key, and owner are required".to_string(),
                help: None,
            });
        }
        let key = canonical_key(&self.key, &self.bucket);
        ensure_owned(&key, &self.owner)?;
        Ok(key)
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub w: u32,
    pub h: u32,
}

/// Summary returned once a job's outputs are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub ok: bool,
    pub source_path: String,
    pub normalized_png_path: String,
    pub metadata_path: String,
    pub frame_size: FrameSize,
    pub frame_count: usize,
    pub skipped_frames: usize,
}

/// Run one normalization job against `store`.
pub fn run_job<S: AssetStore + ?Sized>(store: &S, request: &JobRequest) -> Result<JobReport> {
    let key = request.validate()?;
    let normalizer = Normalizer::new(request.options())?;

    let bytes = store.read(&request.bucket, &key)?;
    let output = normalizer.normalize_bytes(&bytes)?;

    let paths = OutputPaths::for_owner(&request.owner);
    store.write(&request.bucket, &paths.sheet, &output.sheet_png, "image/png")?;
    store.write(
        &request.bucket,
        &paths.metadata,
        output.metadata.to_json()?.as_bytes(),
        "application/json",
    )?;

    Ok(JobReport {
        ok: true,
        source_path: key,
        normalized_png_path: paths.sheet,
        metadata_path: paths.metadata,
        frame_size: FrameSize {
            w: output.metadata.frame_size.width,
            h: output.metadata.frame_size.height,
        },
        frame_count: output.metadata.original_frame_count,
        skipped_frames: output.skipped,
    })
}
