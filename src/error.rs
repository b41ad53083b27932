use miette::Diagnostic;
use thiserror::Error;

/// Main error type for axess operations
#[derive(Error, Diagnostic, Debug)]
pub enum AxError {
    #[error("IO error: {0}")]
    #[diagnostic(code(axess::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(axess::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Input error: {message}")]
    #[diagnostic(code(axess::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Expansion error: {message}")]
    #[diagnostic(code(axess::expand))]
    Expand {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unsupported math delimiter {symbol:?}")]
    #[diagnostic(
        code(axess::delimiter),
        help("supported delimiter symbols are \"$\" and \"$$\"")
    )]
    UnsupportedDelimiter { symbol: String },

    #[error("Cleanup tool error: {message}")]
    #[diagnostic(code(axess::cleanup))]
    Cleanup {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, AxError>;
