//! axess - LaTeX accessibility transpiler
//!
//! A library for rewriting LaTeX documents so that mathematical content is
//! readable by screen readers: user macros are inlined to literal math and
//! symmetric `$`/`$$` delimiters become direction-explicit `\(\)`/`\[\]`.

pub mod cli;
pub mod cleanup;
pub mod error;
pub mod expand;
pub mod flatten;
pub mod macros;
pub mod normalize;
pub mod pipeline;
pub mod strip;

pub use cleanup::{remove_intermediate, CleanupTool};
pub use error::{AxError, Result};
pub use expand::{expand_document, ExpandOptions, LineExpansion};
pub use flatten::{flatten_file, FlattenOptions};
pub use macros::{parse_definition, CommandType, MacroDef, Registry};
pub use normalize::{count_math_delimiters, normalize, pair_inline_dollars, DollarTracker};
pub use pipeline::{clean_document, CleanOptions, CleanOutcome};
pub use strip::strip_comments;
