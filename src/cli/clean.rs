//! Clean command implementation.
//!
//! Runs the full pipeline over one document and reports where the result
//! went.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::expand::DEFAULT_MAX_PASSES;
use crate::pipeline::{clean_document, default_output_path, CleanOptions, CleanOutcome};

/// Clean a LaTeX document (inline macros, normalize math delimiters)
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Input .tex file to process
    pub input: PathBuf,

    /// Output file (defaults to <input>_clean.tex)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the cleaned document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Prepare the output for pdflatex (implies --add-package)
    #[arg(long)]
    pub pdf: bool,

    /// Insert \usepackage{axessibility} when the preamble lacks it
    #[arg(long)]
    pub add_package: bool,

    /// Perl cleanup script to post-process the output
    #[arg(long)]
    pub cleanup_script: Option<PathBuf>,

    /// Keep \bibliography lines instead of splicing .bbl contents
    #[arg(long)]
    pub no_bbl: bool,

    /// Bound on macro expansion passes per line
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    pub max_passes: usize,
}

pub fn run(args: CleanArgs) -> Result<()> {
    let output = if args.stdout {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| default_output_path(&args.input)),
        )
    };

    let opts = CleanOptions {
        output,
        add_package: args.add_package,
        pdflatex: args.pdf,
        cleanup_script: args.cleanup_script.clone(),
        include_bbl: !args.no_bbl,
        max_passes: args.max_passes,
    };

    match clean_document(&args.input, &opts)? {
        CleanOutcome::File(path) => {
            println!("Cleaned {} -> {}", args.input.display(), path.display());
        }
        CleanOutcome::Text(text) => print!("{text}"),
    }

    Ok(())
}
