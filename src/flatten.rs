//! Recursive flattening of `\input`/`\include` directives.
//!
//! Replaces uncommented `\input{...}` and `\include{...}` lines with the
//! referenced file's contents, resolved relative to the including file's
//! directory. `\bibliography{...}` lines (but not `\bibliographystyle`)
//! splice in the current file's sibling `.bbl` when requested.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AxError, Result};

/// Options for a flattening run.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Replace `\bibliography{...}` with the sibling `.bbl` contents.
    pub include_bbl: bool,
    /// Emit a blank line after each included file.
    pub blank_line_after_include: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            include_bbl: true,
            blank_line_after_include: true,
        }
    }
}

/// Read `path` and recursively replace inclusion directives with the target
/// file contents.
pub fn flatten_file(path: &Path, opts: &FlattenOptions) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| AxError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {e}"),
    })?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut out: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if let Some(target) = include_target(line) {
            let child = resolve_target(dir, target);
            let content = flatten_file(&child, opts)?;
            out.push(content.trim_end_matches('\n').to_string());
            if opts.blank_line_after_include {
                out.push(String::new());
            }
        } else if opts.include_bbl
            && line.starts_with("\\bibliography")
            && !line.starts_with("\\bibliographystyle")
        {
            let bbl = path.with_extension("bbl");
            if bbl.exists() {
                let content = fs::read_to_string(&bbl).map_err(|e| AxError::Io {
                    path: bbl.clone(),
                    message: format!("Failed to read file: {e}"),
                })?;
                out.push(content.trim_end_matches('\n').to_string());
            } else {
                eprintln!(
                    "warning: no .bbl companion for {}; keeping the \\bibliography line",
                    path.display()
                );
                out.push(line.to_string());
            }
        } else {
            out.push(line.to_string());
        }
    }

    Ok(out.join("\n"))
}

/// Extract the inclusion target from an uncommented `\input`/`\include`
/// line, if any.
fn include_target(line: &str) -> Option<&str> {
    for pattern in ["\\input{", "\\include{"] {
        if let Some(pos) = line.find(pattern) {
            if line[..pos].contains('%') {
                continue;
            }
            let rest = &line[pos + pattern.len()..];
            if let Some(end) = rest.find('}') {
                return Some(&rest[..end]);
            }
        }
    }
    None
}

/// Resolve an inclusion target against the including file's directory,
/// appending `.tex` when the reference omits it.
fn resolve_target(dir: &Path, target: &str) -> PathBuf {
    if target.ends_with(".tex") {
        dir.join(target)
    } else {
        dir.join(format!("{target}.tex"))
    }
}
