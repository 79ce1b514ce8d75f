pub mod batch;
pub mod completions;
pub mod detect;
pub mod job;
pub mod normalize;
pub mod options;

use clap::{Parser, Subcommand};

/// spritenorm - Sprite drawing to uniform spritesheet normalizer
#[derive(Parser, Debug)]
#[command(name = "spritenorm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print per-frame detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize one image into a spritesheet plus metadata
    Normalize(normalize::NormalizeArgs),

    /// Print detected regions and rows as JSON without rendering
    Detect(detect::DetectArgs),

    /// Normalize every image under a directory
    Batch(batch::BatchArgs),

    /// Run a storage-keyed normalization job against a local store
    Job(job::JobArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
