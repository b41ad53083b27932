//! Parsed macro definitions.

use std::fmt;

use serde::{Serialize, Serializer};

/// The defining keyword of a macro.
///
/// Any control word textually ending in `command` is accepted and kept
/// verbatim in the `Command` variant (`newcommand`, `renewcommand`,
/// `providecommand`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandType {
    Def,
    Edef,
    Xdef,
    Gdef,
    DeclareMathOperator,
    Command(String),
}

impl CommandType {
    /// Recognize a defining keyword, or `None` for any other control word.
    pub fn from_keyword(word: &str) -> Option<CommandType> {
        match word {
            "def" => Some(CommandType::Def),
            "edef" => Some(CommandType::Edef),
            "xdef" => Some(CommandType::Xdef),
            "gdef" => Some(CommandType::Gdef),
            "DeclareMathOperator" => Some(CommandType::DeclareMathOperator),
            w if w.ends_with("command") => Some(CommandType::Command(w.to_string())),
            _ => None,
        }
    }

    /// The keyword as written in the source.
    pub fn keyword(&self) -> &str {
        match self {
            CommandType::Def => "def",
            CommandType::Edef => "edef",
            CommandType::Xdef => "xdef",
            CommandType::Gdef => "gdef",
            CommandType::DeclareMathOperator => "DeclareMathOperator",
            CommandType::Command(w) => w,
        }
    }

    pub fn is_math_operator(&self) -> bool {
        matches!(self, CommandType::DeclareMathOperator)
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Serialize for CommandType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}

/// One parsed macro definition.
///
/// Created during registry construction and immutable afterwards. A
/// `MacroDef` always has a non-empty name and body; lines without both never
/// produce one. `DeclareMathOperator` bodies are stored pre-wrapped as
/// `\operatorname{body}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroDef {
    pub command_type: CommandType,
    /// Control sequence including the leading backslash, e.g. `\weird`.
    pub name: String,
    /// Character opening each argument (default `{`).
    pub separator_open: char,
    /// Character closing each argument (default `}`).
    pub separator_close: char,
    /// Declared argument count 0-9; `None` for a 0-argument macro.
    pub arity: Option<u8>,
    /// Replacement text with `#1`..`#9` placeholders.
    pub body: String,
}

impl MacroDef {
    /// Whether the macro takes arguments.
    pub fn is_multi(&self) -> bool {
        self.arity.is_some()
    }

    /// Number of arguments an invocation must supply.
    pub fn input_count(&self) -> usize {
        self.arity.map(usize::from).unwrap_or(0)
    }
}
