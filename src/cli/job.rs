//! Job command implementation.
//!
//! Runs a storage-keyed normalization job against a directory-backed store
//! and prints the job report to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{NormError, Result};
use crate::output::Printer;
use crate::storage::{run_job, JobReport, JobRequest, LocalStore};

use super::options::OptionArgs;

/// Run a storage-keyed normalization job against a local store
#[derive(Args, Debug)]
pub struct JobArgs {
    /// Store root; each bucket is a directory below it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// JSON request file ({"bucket", "key", "user_id", "options"})
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Bucket holding the raw upload
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key, storage path or URL of the raw upload
    #[arg(long)]
    pub key: Option<String>,

    /// Owner the upload belongs to
    #[arg(long)]
    pub owner: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

impl JobArgs {
    /// Merge the request file (if any) with command-line fields.
    fn build_request(&self) -> Result<JobRequest> {
        let mut request = match &self.request {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| NormError::Io {
                    path: path.clone(),
                    message: format!("Failed to read request: {}", e),
                })?;
                serde_json::from_str(&content).map_err(|e| NormError::Parse {
                    message: format!("Invalid job request: {}", e),
                    help: Some("Expected a JSON object with bucket, key and user_id".to_string()),
                })?
            }
            None => JobRequest::default(),
        };

        if let Some(bucket) = &self.bucket {
            request.bucket = bucket.clone();
        }
        if let Some(key) = &self.key {
            request.key = key.clone();
        }
        if let Some(owner) = &self.owner {
            request.owner = owner.clone();
        }
        let base = match request.options {
            Some(options) => options,
            None => self.options.manifest(Path::new("."))?.options,
        };
        request.options = Some(self.options.apply(base)?);

        Ok(request)
    }
}

pub fn run(args: JobArgs, printer: &Printer) -> Result<JobReport> {
    let request = args.build_request()?;
    let store = LocalStore::new(&args.root);

    printer.status("Running", &format!("{}/{}", request.bucket, request.key));
    let report = run_job(&store, &request)?;

    printer.status(
        "Stored",
        &format!(
            "{} and {} ({}x{} cells)",
            report.normalized_png_path, report.metadata_path, report.frame_size.w, report.frame_size.h
        ),
    );
    if report.skipped_frames > 0 {
        printer.warning(
            "Skipped",
            &format!("{} frame(s) could not be cropped", report.skipped_frames),
        );
    }

    let json = serde_json::to_string_pretty(&report).map_err(|e| NormError::Encode {
        message: format!("Failed to serialize job report: {}", e),
    })?;
    println!("{}", json);

    Ok(report)
}
