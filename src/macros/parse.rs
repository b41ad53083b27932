//! Single-line macro definition parsing.
//!
//! Recognizes the first definition pattern on a line: a defining keyword,
//! an optionally brace-wrapped control-sequence name, an optional `[N]`
//! arity, then a brace-delimited body. Multi-line definitions are not
//! supported; a line without the pattern yields no macro.

use super::def::{CommandType, MacroDef};

/// Parse one stripped text line into zero-or-one macro definitions.
pub fn parse_definition(line: &str) -> Option<MacroDef> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            if let Some(def) = parse_at(&chars, i) {
                return Some(def);
            }
            // Skip the whole control word so its tail is not re-scanned.
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Try to parse a definition whose backslash sits at `start`.
fn parse_at(chars: &[char], start: usize) -> Option<MacroDef> {
    let mut i = start + 1;

    let keyword_start = i;
    while i < chars.len() && chars[i].is_ascii_alphabetic() {
        i += 1;
    }
    let keyword: String = chars[keyword_start..i].iter().collect();
    let command_type = CommandType::from_keyword(&keyword)?;

    // Optional brace around the name; the closing brace is tolerated
    // independently of the opening one.
    if i < chars.len() && chars[i] == '{' {
        i += 1;
    }
    if !(i < chars.len() && chars[i] == '\\') {
        return None;
    }
    i += 1;
    let name_start = i;
    while i < chars.len() && chars[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name: String = std::iter::once('\\')
        .chain(chars[name_start..i].iter().copied())
        .collect();
    if i < chars.len() && chars[i] == '}' {
        i += 1;
    }

    // Optional [N] arity, 0-9.
    let mut arity = None;
    if i + 2 < chars.len() && chars[i] == '[' && chars[i + 1].is_ascii_digit() && chars[i + 2] == ']'
    {
        arity = Some(chars[i + 1] as u8 - b'0');
        i += 3;
    }

    while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
        i += 1;
    }

    // Body: from the opening brace to its matching close on the same line.
    if !(i < chars.len() && chars[i] == '{') {
        return None;
    }
    i += 1;
    let mut depth = 1usize;
    let mut body = String::new();
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' && i + 1 < chars.len() {
            body.push('\\');
            body.push(chars[i + 1]);
            i += 2;
            continue;
        }
        if c == '{' {
            depth += 1;
        } else if c == '}' {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
        body.push(c);
        i += 1;
    }
    if depth != 0 || body.is_empty() {
        return None;
    }

    let body = if command_type.is_math_operator() {
        format!("\\operatorname{{{body}}}")
    } else {
        body
    };

    Some(MacroDef {
        command_type,
        name,
        separator_open: '{',
        separator_close: '}',
        arity,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_newcommand_with_arity() {
        let def = parse_definition(
            "\\newcommand{\\weird}[3]{\\sum_{n = #1}^{#2} \\F(#3) - 7 +\\frac{#1}{#2}}",
        )
        .unwrap();
        assert_eq!(
            def.command_type,
            CommandType::Command("newcommand".to_string())
        );
        assert_eq!(def.name, "\\weird");
        assert_eq!(def.separator_open, '{');
        assert_eq!(def.separator_close, '}');
        assert_eq!(def.arity, Some(3));
        assert_eq!(
            def.body,
            "\\sum_{n = #1}^{#2} \\F(#3) - 7 +\\frac{#1}{#2}"
        );
    }

    #[test]
    fn test_def_without_braced_name() {
        let def = parse_definition("\\def\\F{\\mathcal{F}}").unwrap();
        assert_eq!(def.command_type, CommandType::Def);
        assert_eq!(def.name, "\\F");
        assert_eq!(def.arity, None);
        assert!(!def.is_multi());
        assert_eq!(def.body, "\\mathcal{F}");
    }

    #[test]
    fn test_declare_math_operator_wraps_body() {
        let def = parse_definition("\\DeclareMathOperator{\\im}{Im}").unwrap();
        assert_eq!(def.command_type, CommandType::DeclareMathOperator);
        assert_eq!(def.name, "\\im");
        assert_eq!(def.body, "\\operatorname{Im}");
    }

    #[test]
    fn test_trailing_text_ignored() {
        let def = parse_definition("\\newcommand{\\x}{y} % and a note {z}").unwrap();
        assert_eq!(def.name, "\\x");
        assert_eq!(def.body, "y");
    }

    #[test]
    fn test_pattern_not_at_line_start() {
        let def = parse_definition("  \\hbox{} \\def\\a{b}").unwrap();
        assert_eq!(def.name, "\\a");
        assert_eq!(def.body, "b");
    }

    #[test]
    fn test_non_matching_lines() {
        assert_eq!(parse_definition("plain text"), None);
        assert_eq!(parse_definition("\\section{Intro}"), None);
        assert_eq!(parse_definition("\\newcommand{\\x}{}"), None); // empty body
        assert_eq!(parse_definition("\\newcommand{\\x}"), None); // no body
        assert_eq!(parse_definition("\\def\\x{unterminated"), None);
    }

    #[test]
    fn test_nested_braces_in_body() {
        let def = parse_definition("\\newcommand{\\LL}{\\mathcal{L}^2}").unwrap();
        assert_eq!(def.body, "\\mathcal{L}^2");
    }

    #[test]
    fn test_escaped_braces_do_not_close_body() {
        let def = parse_definition("\\newcommand{\\set}[1]{\\{#1\\}}").unwrap();
        assert_eq!(def.body, "\\{#1\\}");
        assert_eq!(def.arity, Some(1));
    }
}
