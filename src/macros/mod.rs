//! Macro definitions, parsing, and the document registry.
//!
//! A macro is discovered by scanning preamble lines (and an optional
//! `user_macro.sty` companion file) with [`parse_definition`]; the parsed
//! definitions are collected in discovery order into a [`Registry`], which is
//! read-only once built.

mod def;
mod parse;
mod registry;

pub use def::{CommandType, MacroDef};
pub use parse::parse_definition;
pub use registry::Registry;

pub(crate) use registry::{is_document_begin, is_document_end, is_package_line};
