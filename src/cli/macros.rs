//! Macros command implementation.
//!
//! Lists the user macro definitions the pipeline would inline, either as a
//! readable table or as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{AxError, Result};
use crate::macros::Registry;
use crate::pipeline::MACRO_FILE_NAME;
use crate::strip::strip_comments;

/// List the user macros defined in a document preamble
#[derive(Args, Debug)]
pub struct MacrosArgs {
    /// Input .tex file to inspect
    pub input: PathBuf,

    /// Emit the macro list as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MacrosArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input).map_err(|e| AxError::Io {
        path: args.input.clone(),
        message: format!("Failed to read file: {e}"),
    })?;
    let mut registry = Registry::from_preamble(&strip_comments(&text));

    let dir = args.input.parent().unwrap_or_else(|| std::path::Path::new(""));
    if let Ok(content) = fs::read_to_string(dir.join(MACRO_FILE_NAME)) {
        registry.extend_from_file(&strip_comments(&content));
    }

    if args.json {
        let json =
            serde_json::to_string_pretty(registry.macros()).map_err(|e| AxError::Input {
                message: format!("Failed to serialize macro list: {e}"),
                help: None,
            })?;
        println!("{json}");
        return Ok(());
    }

    if registry.is_empty() {
        println!("No user macros found in {}", args.input.display());
        return Ok(());
    }

    println!("{} macro(s) in {}:", registry.len(), args.input.display());
    for def in registry.macros() {
        let arity = def
            .arity
            .map(|n| format!("[{n}]"))
            .unwrap_or_default();
        println!("  {} {}{} -> {}", def.command_type, def.name, arity, def.body);
    }

    Ok(())
}
