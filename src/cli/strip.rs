//! Strip command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{AxError, Result};
use crate::strip::strip_comments;

/// Strip comments from a LaTeX document
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Input .tex file to process
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: StripArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input).map_err(|e| AxError::Io {
        path: args.input.clone(),
        message: format!("Failed to read file: {e}"),
    })?;
    let stripped = strip_comments(&text);

    match &args.output {
        Some(path) => {
            fs::write(path, &stripped).map_err(|e| AxError::Io {
                path: path.clone(),
                message: format!("Failed to write file: {e}"),
            })?;
            println!("Stripped {} -> {}", args.input.display(), path.display());
        }
        None => print!("{stripped}"),
    }

    Ok(())
}
