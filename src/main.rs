use clap::Parser;
use miette::Result;
use axess::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean(args) => axess::cli::clean::run(args)?,
        Commands::Macros(args) => axess::cli::macros::run(args)?,
        Commands::Strip(args) => axess::cli::strip::run(args)?,
        Commands::Completions(args) => axess::cli::completions::run(args)?,
    }

    Ok(())
}
