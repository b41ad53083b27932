//! The full cleaning pipeline.
//!
//! Orchestrates the stages end to end: strip comments, collect macros from
//! the preamble and the optional `user_macro.sty` next to the input, run a
//! first expansion pass, flatten `\input`/`\include` through an intermediate
//! file, strip and expand again (the flattened parts bring their own
//! comments and invocations), then hand off to the cleanup script or write
//! the result directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cleanup::{remove_intermediate, CleanupTool};
use crate::error::{AxError, Result};
use crate::expand::{expand_document, ExpandOptions, DEFAULT_MAX_PASSES};
use crate::flatten::{flatten_file, FlattenOptions};
use crate::macros::Registry;
use crate::strip::strip_comments;

/// External macro file looked up next to the input document.
pub const MACRO_FILE_NAME: &str = "user_macro.sty";

const INTERMEDIATE_NAME: &str = "temp_pre.tex";

/// Options for a full pipeline run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Where to write the result; `None` returns the text instead.
    pub output: Option<PathBuf>,
    /// Insert `\usepackage{axessibility}` when the preamble lacks it.
    pub add_package: bool,
    /// Prepare the output for pdflatex; implies package insertion.
    pub pdflatex: bool,
    /// Cleanup Perl script to post-process the output.
    pub cleanup_script: Option<PathBuf>,
    /// Splice `.bbl` contents over `\bibliography` lines while flattening.
    pub include_bbl: bool,
    /// Bound on expansion passes per line (0 means the default).
    pub max_passes: usize,
}

/// What a pipeline run produced.
#[derive(Debug)]
pub enum CleanOutcome {
    /// The cleaned document was written to this path.
    File(PathBuf),
    /// The cleaned document text, when no output path was given.
    Text(String),
}

/// Run the whole pipeline over one `.tex` document.
pub fn clean_document(input: &Path, opts: &CleanOptions) -> Result<CleanOutcome> {
    if input.extension().and_then(|e| e.to_str()) != Some("tex") {
        return Err(AxError::Input {
            message: format!("{} is not a .tex file", input.display()),
            help: Some("The pipeline only accepts LaTeX documents".to_string()),
        });
    }

    let text = fs::read_to_string(input).map_err(|e| AxError::Io {
        path: input.to_path_buf(),
        message: format!("Failed to read file: {e}"),
    })?;
    let dir = input.parent().unwrap_or_else(|| Path::new(""));

    let stripped = strip_comments(&text);
    let registry = build_registry(&stripped, dir)?;

    let max_passes = if opts.max_passes == 0 {
        DEFAULT_MAX_PASSES
    } else {
        opts.max_passes
    };

    // First pass: expand before flattening so multi-line invocations in the
    // root file are already resolved. Package insertion waits for the final
    // pass; inserting here would survive flattening and double up.
    let first_pass = ExpandOptions {
        add_package: false,
        max_passes,
    };
    let expanded = expand_document(&stripped, &registry, &first_pass)?;

    let intermediate = dir.join(INTERMEDIATE_NAME);
    fs::write(&intermediate, &expanded).map_err(|e| AxError::Io {
        path: intermediate.clone(),
        message: format!("Failed to write intermediate file: {e}"),
    })?;
    let flatten_opts = FlattenOptions {
        include_bbl: opts.include_bbl,
        ..FlattenOptions::default()
    };
    let flattened = flatten_file(&intermediate, &flatten_opts);
    // The intermediate goes away even when flattening failed.
    let cleanup_result = remove_intermediate(&intermediate);
    let flattened = flattened?;
    cleanup_result?;

    // Second pass over the flattened whole: included files may carry their
    // own comments and macro invocations.
    let stripped = strip_comments(&flattened);
    let final_pass = ExpandOptions {
        add_package: opts.add_package || opts.pdflatex,
        max_passes,
    };
    let cleaned = expand_document(&stripped, &registry, &final_pass)?;

    deliver(&cleaned, dir, opts)
}

/// Default output path: the input with `_clean` before its extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{stem}_clean.tex"))
}

/// Preamble macros first, then `user_macro.sty` when it sits next to the
/// input and is readable.
fn build_registry(stripped: &str, dir: &Path) -> Result<Registry> {
    let mut registry = Registry::from_preamble(stripped);
    let macro_file = dir.join(MACRO_FILE_NAME);
    if let Ok(content) = fs::read_to_string(&macro_file) {
        registry.extend_from_file(&strip_comments(&content));
    }
    Ok(registry)
}

fn deliver(cleaned: &str, dir: &Path, opts: &CleanOptions) -> Result<CleanOutcome> {
    let output = match &opts.output {
        Some(path) => path.clone(),
        None => return Ok(CleanOutcome::Text(cleaned.to_string())),
    };

    match &opts.cleanup_script {
        Some(script) => {
            let staged = dir.join(INTERMEDIATE_NAME);
            fs::write(&staged, cleaned).map_err(|e| AxError::Io {
                path: staged.clone(),
                message: format!("Failed to write intermediate file: {e}"),
            })?;
            let tool = CleanupTool::new(script.clone());
            let run = tool.run(&staged, &output);
            let removed = remove_intermediate(&staged);
            run?;
            removed?;
        }
        None => {
            fs::write(&output, cleaned).map_err(|e| AxError::Io {
                path: output.clone(),
                message: format!("Failed to write file: {e}"),
            })?;
        }
    }
    Ok(CleanOutcome::File(output))
}
