//! Asset-store boundary.
//!
//! The normalizer itself only sees bytes. This module covers the plumbing a
//! hosting service needs around it: canonical storage keys, owner scoping,
//! output paths and a `(bucket, path)` store abstraction with a filesystem
//! implementation.

mod job;
mod key;
mod local;

pub use job::{run_job, FrameSize, JobReport, JobRequest};
pub use key::{canonical_key, ensure_owned, raw_prefix, OutputPaths};
pub use local::{AssetStore, LocalStore};
