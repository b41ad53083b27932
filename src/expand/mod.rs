//! Recursive macro expansion over a whole document.
//!
//! The document splits into three regions: the pre-body (up to and including
//! the `\begin{document}` line), the body, and the post-body (from the
//! `\end{document}` line onward, kept verbatim). Macro definition lines are
//! suppressed from the pre-body since the registry already consumed them;
//! the body is expanded line by line, invocations spanning physical lines
//! are resolved by re-expanding a growing buffer, and the result is passed
//! through the delimiter normalizer.

mod args;
mod line;

pub use args::{scan_arguments, ScanOutcome};
pub use line::LineExpansion;

use crate::macros::{is_document_begin, is_document_end, is_package_line, parse_definition, Registry};
use crate::normalize::normalize;
use crate::Result;

use line::expand_line;

/// Default bound on expansion passes per line.
pub const DEFAULT_MAX_PASSES: usize = 25;

/// Options for a document expansion pass.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Insert `\usepackage{axessibility}` before `\begin{document}` when the
    /// preamble does not already declare it.
    pub add_package: bool,
    /// Bound on expansion passes per line before reporting non-convergence.
    pub max_passes: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            add_package: false,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Expand every registered macro in `text` and normalize the body's math
/// delimiters.
pub fn expand_document(text: &str, registry: &Registry, opts: &ExpandOptions) -> Result<String> {
    let lines: Vec<&str> = text.split('\n').collect();

    let begin = lines.iter().position(|l| is_document_begin(l));
    let (pre_end, body_start) = match begin {
        Some(b) => (b + 1, b + 1),
        None => (lines.len(), lines.len()),
    };
    let body_end = lines[body_start..]
        .iter()
        .position(|l| is_document_end(l))
        .map(|e| body_start + e)
        .unwrap_or(lines.len());

    let mut out: Vec<String> = Vec::new();

    // Pre-body: definitions are suppressed, everything else passes through.
    let package_declared = lines[..pre_end].iter().any(|l| is_package_line(l));
    for (idx, line) in lines[..pre_end].iter().enumerate() {
        let is_begin_line = begin == Some(idx);
        if is_begin_line && opts.add_package && !registry.package_present() && !package_declared {
            out.push("\\usepackage{axessibility}".to_string());
        }
        if !is_begin_line && parse_definition(line).is_some() {
            continue;
        }
        out.push((*line).to_string());
    }

    // Body: expand, then normalize as one stream.
    let body = expand_body(&lines[body_start..body_end], registry, opts);
    let normalized = normalize(&body.join("\n"))?;
    if body_start < body_end {
        out.extend(normalized.split('\n').map(String::from));
    }

    // Post-body: verbatim.
    for line in &lines[body_end..] {
        out.push((*line).to_string());
    }

    Ok(out.join("\n"))
}

/// Expand body lines, reassembling invocations that span physical lines.
///
/// A `Pending` line is concatenated with following lines and re-expanded as
/// a growing buffer until it resolves or input runs out; a buffer still
/// pending at end of document is flushed literally.
fn expand_body(lines: &[&str], registry: &Registry, opts: &ExpandOptions) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut buffer: Option<String> = None;

    for raw in lines {
        let (candidate, joined) = match buffer.take() {
            Some(b) => (format!("{b}\n{raw}"), true),
            None => ((*raw).to_string(), false),
        };
        match expand_line_recovering(&candidate, registry, opts) {
            LineExpansion::Resolved(text) => {
                let text = if joined { collapse_soft_breaks(&text) } else { text };
                out.extend(text.split('\n').map(String::from));
            }
            LineExpansion::Pending(text) => buffer = Some(text),
        }
    }

    if let Some(b) = buffer {
        out.extend(b.split('\n').map(String::from));
    }

    out
}

/// A single line failing to expand is logged and left as-is; processing
/// continues with the rest of the document.
fn expand_line_recovering(line: &str, registry: &Registry, opts: &ExpandOptions) -> LineExpansion {
    match expand_line(line, registry, opts.max_passes) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("warning: leaving line unexpanded: {e}");
            LineExpansion::Resolved(line.to_string())
        }
    }
}

/// Collapse the soft continuation `\`+space left over from joining lines
/// back to a literal space (`\\` stays untouched).
fn collapse_soft_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            if chars[i + 1] == '\\' {
                out.push_str("\\\\");
                i += 2;
                continue;
            }
            if chars[i + 1] == ' ' {
                out.push(' ');
                i += 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::Registry;
    use pretty_assertions::assert_eq;

    fn doc(preamble: &str, body: &str) -> String {
        format!("{preamble}\n\\begin{{document}}\n{body}\n\\end{{document}}\npost text")
    }

    fn expand(text: &str) -> String {
        let registry = Registry::from_preamble(text);
        expand_document(text, &registry, &ExpandOptions::default()).unwrap()
    }

    #[test]
    fn test_definition_lines_suppressed_in_preamble() {
        let text = doc(
            "\\documentclass{article}\n\\newcommand{\\LL}{\\mathcal{L}^2}",
            "x",
        );
        let out = expand(&text);
        assert!(!out.contains("newcommand"));
        assert!(out.contains("\\documentclass{article}"));
    }

    #[test]
    fn test_body_expanded_and_post_body_verbatim() {
        let text = doc("\\def\\F{\\mathcal{F}}", "\\F(x)");
        let out = expand(&text);
        assert!(out.contains("\\mathcal{F}(x)"));
        assert!(out.ends_with("\\end{document}\npost text"));
    }

    #[test]
    fn test_macros_not_expanded_outside_body() {
        // The marker fragment in the post-body stays untouched.
        let text = "\\def\\F{X}\n\\begin{document}\n\\F\n\\end{document}\n\\F after end";
        let out = expand(text);
        assert!(out.ends_with("\\F after end"));
    }

    #[test]
    fn test_package_inserted_before_begin_document() {
        let text = doc("\\documentclass{article}", "x");
        let registry = Registry::from_preamble(&text);
        let opts = ExpandOptions {
            add_package: true,
            ..ExpandOptions::default()
        };
        let out = expand_document(&text, &registry, &opts).unwrap();
        assert!(out.contains("\\usepackage{axessibility}\n\\begin{document}"));
        assert_eq!(out.matches("axessibility").count(), 1);
    }

    #[test]
    fn test_package_not_inserted_twice() {
        let text = doc(
            "\\documentclass{article}\n\\usepackage{axessibility}",
            "x",
        );
        let registry = Registry::from_preamble(&text);
        let opts = ExpandOptions {
            add_package: true,
            ..ExpandOptions::default()
        };
        let out = expand_document(&text, &registry, &opts).unwrap();
        assert_eq!(out.matches("axessibility").count(), 1);
    }

    #[test]
    fn test_multi_line_invocation_reassembled() {
        let text = doc(
            "\\newcommand{\\pair}[2]{(#1, #2)}",
            "before\n\\pair{a}\n{b} tail\nafter",
        );
        let out = expand(&text);
        assert!(out.contains("(a, b) tail"), "got: {out}");
        assert!(out.contains("before\n"));
        assert!(out.contains("\nafter"));
    }

    #[test]
    fn test_unterminated_invocation_left_literal() {
        let text = doc("\\newcommand{\\pair}[2]{(#1, #2)}", "\\pair{a}{never closed");
        let out = expand(&text);
        assert!(out.contains("\\pair{a}{never closed"));
        assert!(out.contains("\\end{document}"));
    }

    #[test]
    fn test_document_without_markers_passes_through() {
        let text = "just\nsome lines\n";
        assert_eq!(expand(text), text);
    }

    #[test]
    fn test_collapse_soft_breaks() {
        assert_eq!(collapse_soft_breaks("a\\ b"), "a b");
        assert_eq!(collapse_soft_breaks("a\\\\ b"), "a\\\\ b");
        assert_eq!(collapse_soft_breaks("a\\alpha"), "a\\alpha");
    }
}
