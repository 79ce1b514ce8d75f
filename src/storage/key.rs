//! Storage key handling.

use crate::error::{NormError, Result};

/// Storage routing prefixes that may precede a bucket-relative key.
const ROUTING_PREFIXES: &[&str] = &["storage/v1/object/public/", "storage/v1/object/sign/"];

/// Reduce a key, storage path or full object URL to a bucket-relative key.
///
/// Strips, in order: `scheme://host/`, a storage routing prefix, a leading
/// `public/`, and a leading `<bucket>/`.
pub fn canonical_key(input: &str, bucket: &str) -> String {
    let mut key = strip_origin(input);

    if let Some(rest) = ROUTING_PREFIXES.iter().find_map(|p| key.strip_prefix(p)) {
        key = rest;
    }
    if let Some(rest) = key.strip_prefix("public/") {
        key = rest;
    }
    if !bucket.is_empty() {
        if let Some(rest) = key.strip_prefix(bucket).and_then(|r| r.strip_prefix('/')) {
            key = rest;
        }
    }

    key.to_string()
}

fn strip_origin(input: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if let Some(rest) = input.strip_prefix(scheme) {
            if let Some(slash) = rest.find('/') {
                return &rest[slash + 1..];
            }
        }
    }
    input
}

/// Prefix every raw upload of `owner` lives under.
pub fn raw_prefix(owner: &str) -> String {
    format!("raw/{}/", owner)
}

/// Fail unless `key` lies under the owner's raw upload prefix.
pub fn ensure_owned(key: &str, owner: &str) -> Result<()> {
    let prefix = raw_prefix(owner);
    if key.starts_with(&prefix) {
        Ok(())
    } else {
        Err(NormError::Request {
            message: format!("key must start with {}", prefix),
            help: Some(format!("Got '{}'", key)),
        })
    }
}

/// Where normalized outputs for an owner are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub sheet: String,
    pub metadata: String,
}

impl OutputPaths {
    pub fn for_owner(owner: &str) -> Self {
        Self {
            sheet: format!("normalized/{}/spritesheet.png", owner),
            metadata: format!("normalized/{}/metadata.json", owner),
        }
    }
}
