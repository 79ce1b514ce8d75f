use clap::Parser;
use miette::Result;
use spritenorm::cli::{Cli, Commands};
use spritenorm::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new(cli.verbose);

    match cli.command {
        Commands::Normalize(args) => {
            spritenorm::cli::normalize::run(args, &printer)?;
        }
        Commands::Detect(args) => {
            spritenorm::cli::detect::run(args, &printer)?;
        }
        Commands::Batch(args) => {
            spritenorm::cli::batch::run(args, &printer)?;
        }
        Commands::Job(args) => {
            spritenorm::cli::job::run(args, &printer)?;
        }
        Commands::Completions(args) => spritenorm::cli::completions::run(args)?,
    }

    Ok(())
}
