pub mod clean;
pub mod completions;
pub mod macros;
pub mod strip;

use clap::{Parser, Subcommand};

/// axess - LaTeX accessibility transpiler
#[derive(Parser, Debug)]
#[command(name = "axess")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a LaTeX document (inline macros, normalize math delimiters)
    Clean(clean::CleanArgs),

    /// List the user macros defined in a document preamble
    Macros(macros::MacrosArgs),

    /// Strip comments from a LaTeX document
    Strip(strip::StripArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
