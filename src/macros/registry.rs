//! Registry construction from document preambles and macro files.

use super::def::MacroDef;
use super::parse::parse_definition;

/// Marker fragments shared with the expansion engine. Matching on the tail
/// of the control word keeps the scan tolerant of how the backslash got
/// escaped upstream.
const BEGIN_MARKER: &str = "egin{document}";
const END_MARKER: &str = "nd{document}";

pub(crate) fn is_document_begin(line: &str) -> bool {
    line.contains(BEGIN_MARKER)
}

pub(crate) fn is_document_end(line: &str) -> bool {
    line.contains(END_MARKER)
}

/// Whether the line declares the accessibility support package.
pub(crate) fn is_package_line(line: &str) -> bool {
    line.contains("sepackage{axessibility}") || line.contains("sepackage {axessibility}")
}

/// Ordered collection of parsed macros.
///
/// Insertion order is discovery order: preamble first, then the external
/// macro file. Duplicate names are kept as-is; because earlier entries are
/// substituted first, the first definition always wins during expansion.
/// Read-only once construction is finished.
#[derive(Debug, Default)]
pub struct Registry {
    macros: Vec<MacroDef>,
    package_present: bool,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Build a registry by scanning a stripped document preamble.
    ///
    /// Scanning stops at the document-begin marker; macros are never
    /// recognized inside the document body. Also records whether an
    /// accessibility-package declaration is already present.
    pub fn from_preamble(text: &str) -> Registry {
        let mut registry = Registry::new();
        registry.scan_preamble(text);
        registry
    }

    fn scan_preamble(&mut self, text: &str) {
        for line in text.split('\n') {
            if is_document_begin(line) {
                break;
            }
            if is_package_line(line) {
                self.package_present = true;
            }
            if let Some(def) = parse_definition(line) {
                self.macros.push(def);
            }
        }
    }

    /// Append macros from an external macro file (e.g. `user_macro.sty`).
    ///
    /// Does not touch the package flag; that belongs to the main preamble.
    pub fn extend_from_file(&mut self, text: &str) {
        for line in text.split('\n') {
            if is_document_begin(line) {
                break;
            }
            if let Some(def) = parse_definition(line) {
                self.macros.push(def);
            }
        }
    }

    /// All macros in discovery order.
    pub fn macros(&self) -> &[MacroDef] {
        &self.macros
    }

    /// Whether the scanned preamble already declared the package.
    pub fn package_present(&self) -> bool {
        self.package_present
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
