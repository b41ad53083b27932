//! Dollar rewriting inside text-mode boxes.
//!
//! `$...$` pairs found strictly inside `\mbox{...}`, `\textrm{...}` or
//! `\mathrm{...}` bodies are rewritten before the main scan, independent of
//! the enclosing line's own dollar parity. The pairing is same-line,
//! first-match, repeated until no pair remains in the captured span.

use crate::error::{AxError, Result};

const BOX_COMMANDS: [&str; 3] = ["mbox", "textrm", "mathrm"];

/// Count occurrences of a delimiter symbol.
///
/// `"$"` counts dollars not preceded by another dollar; `"$$"` counts
/// non-overlapping double dollars. Anything else is a fatal
/// invalid-argument error, never silently zero.
pub fn count_math_delimiters(text: &str, sym: &str) -> Result<usize> {
    let chars: Vec<char> = text.chars().collect();
    match sym {
        "$" => {
            let mut count = 0;
            for (i, c) in chars.iter().enumerate() {
                if *c == '$' && (i == 0 || chars[i - 1] != '$') {
                    count += 1;
                }
            }
            Ok(count)
        }
        "$$" => {
            let mut count = 0;
            let mut i = 0;
            while i + 1 < chars.len() {
                if chars[i] == '$' && chars[i + 1] == '$' {
                    count += 1;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            Ok(count)
        }
        _ => Err(AxError::UnsupportedDelimiter {
            symbol: sym.to_string(),
        }),
    }
}

/// Rewrite same-line `$...$` (or `$$...$$`) pairs as directional brackets.
///
/// Only applies when the text's count of the symbol is even; an odd count
/// means a region continues past this text and is left for the main scan.
pub fn pair_inline_dollars(text: &str, sym: &str) -> Result<String> {
    let (open, close) = match sym {
        "$" => ("\\(", "\\)"),
        "$$" => ("\\[", "\\]"),
        _ => {
            return Err(AxError::UnsupportedDelimiter {
                symbol: sym.to_string(),
            })
        }
    };

    if count_math_delimiters(text, sym)? % 2 != 0 {
        return Ok(text.to_string());
    }

    let double = sym == "$$";
    let mut chars: Vec<char> = text.chars().collect();
    while let Some((start, end)) = find_pair(&chars, double) {
        let width = if double { 2 } else { 1 };
        let mut next: Vec<char> = Vec::with_capacity(chars.len() + 2);
        next.extend(&chars[..start]);
        next.extend(open.chars());
        next.extend(&chars[start + width..end]);
        next.extend(close.chars());
        next.extend(&chars[end + width..]);
        chars = next;
    }
    Ok(chars.into_iter().collect())
}

/// Find the first same-line delimiter pair, returning the indices of its
/// opening and closing symbol.
fn find_pair(chars: &[char], double: bool) -> Option<(usize, usize)> {
    let len = chars.len();
    for i in 0..len {
        if chars[i] != '$' {
            continue;
        }
        if double {
            if i + 1 >= len || chars[i + 1] != '$' {
                continue;
            }
            let mut j = i + 2;
            while j + 1 < len && chars[j] != '\n' {
                if chars[j] == '$' && chars[j + 1] == '$' {
                    return Some((i, j));
                }
                j += 1;
            }
        } else {
            // Not preceded or followed by another dollar.
            if i > 0 && chars[i - 1] == '$' {
                continue;
            }
            if i + 1 >= len || chars[i + 1] == '$' {
                continue;
            }
            let mut j = i + 1;
            while j < len && chars[j] != '\n' {
                if chars[j] == '$' {
                    return Some((i, j));
                }
                j += 1;
            }
        }
    }
    None
}

/// Apply the box sub-pass to one physical line.
///
/// Every box span on the line is processed; a span runs from the command's
/// opening brace to the first unescaped closing brace.
pub(crate) fn rewrite_boxed_math(line: &str) -> Result<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' {
            if let Some(head_len) = match_box_head(&chars[i..]) {
                let span_start = i + head_len;
                if let Some(close_rel) = find_unescaped_close(&chars[span_start..]) {
                    let span: String = chars[span_start..span_start + close_rel].iter().collect();
                    let rewritten = pair_inline_dollars(&span, "$")?;
                    out.extend(chars[i..span_start].iter());
                    out.push_str(&rewritten);
                    out.push('}');
                    i = span_start + close_rel + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    Ok(out)
}

/// Match `\mbox {`, `\textrm {` or `\mathrm {` (whitespace tolerated before
/// the brace), returning the consumed length including the brace.
fn match_box_head(chars: &[char]) -> Option<usize> {
    for command in BOX_COMMANDS {
        let word: Vec<char> = command.chars().collect();
        if chars.len() <= word.len() || chars[1..].len() < word.len() {
            continue;
        }
        if chars[1..1 + word.len()] != word[..] {
            continue;
        }
        let mut i = 1 + word.len();
        while i < chars.len() && chars[i].is_whitespace() && chars[i] != '\n' {
            i += 1;
        }
        if i < chars.len() && chars[i] == '{' {
            return Some(i + 1);
        }
    }
    None
}

/// Index of the first `}` not preceded by a backslash.
fn find_unescaped_close(chars: &[char]) -> Option<usize> {
    for (i, c) in chars.iter().enumerate() {
        if *c == '}' && (i == 0 || chars[i - 1] != '\\') {
            return Some(i);
        }
    }
    None
}
