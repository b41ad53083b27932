//! Inline macro substitution over a single line (or joined buffer).

use crate::error::{AxError, Result};
use crate::macros::{MacroDef, Registry};

use super::args::{scan_arguments, ScanOutcome};

/// Outcome of substituting one line of body text.
///
/// `Pending` carries the partially-expanded text of a line whose invocation
/// could not be completed from the text seen so far; the reassembly driver
/// grows it with following lines and retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineExpansion {
    Resolved(String),
    Pending(String),
}

enum Substitution {
    Replaced(String),
    Incomplete,
    Absent,
}

/// Substitute every registered macro in `line`, repeating passes until no
/// macro name remains or `max_passes` is exhausted.
///
/// A self-referential definition never converges; instead of looping
/// forever this returns a did-not-converge error for the caller to handle.
pub(crate) fn expand_line(
    line: &str,
    registry: &Registry,
    max_passes: usize,
) -> Result<LineExpansion> {
    let mut text = line.to_string();

    for _ in 0..max_passes {
        let mut changed = false;
        let mut pending = false;

        for mac in registry.macros() {
            match substitute_macro(&text, mac) {
                Substitution::Replaced(next) => {
                    text = next;
                    changed = true;
                }
                Substitution::Incomplete => pending = true,
                Substitution::Absent => {}
            }
        }

        if !any_invocation(&text, registry) {
            return Ok(LineExpansion::Resolved(text));
        }
        if !changed {
            if pending {
                return Ok(LineExpansion::Pending(text));
            }
            return Ok(LineExpansion::Resolved(text));
        }
    }

    Err(AxError::Expand {
        message: format!("macro expansion did not converge after {max_passes} passes"),
        help: Some("the document may define a self-referential macro".to_string()),
    })
}

/// One substitution attempt for one macro.
///
/// 0-arity macros are replaced at every occurrence; N-arity macros at the
/// first occurrence only (the remainder is picked up by the next pass).
fn substitute_macro(text: &str, mac: &MacroDef) -> Substitution {
    let Some(pos) = find_invocation(text, &mac.name) else {
        return Substitution::Absent;
    };

    if !mac.is_multi() {
        return Substitution::Replaced(replace_all_invocations(text, &mac.name, &mac.body));
    }

    let trailing = &text[pos + mac.name.len()..];
    match scan_arguments(
        trailing,
        mac.separator_open,
        mac.separator_close,
        mac.input_count(),
    ) {
        ScanOutcome::Complete { args, rest } => {
            let mut body = mac.body.clone();
            for (k, arg) in args.iter().enumerate() {
                body = body.replace(&format!("#{}", k + 1), arg);
            }
            let mut next = String::with_capacity(text.len() + body.len());
            next.push_str(&text[..pos]);
            next.push_str(&body);
            next.push_str(&rest);
            Substitution::Replaced(next)
        }
        ScanOutcome::Incomplete => Substitution::Incomplete,
    }
}

/// First occurrence of `name` not immediately followed by a letter (which
/// would make it the prefix of a longer control word).
fn find_invocation(text: &str, name: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(name) {
        let pos = search_from + rel;
        let after = pos + name.len();
        let followed_by_letter = text[after..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        if !followed_by_letter {
            return Some(pos);
        }
        search_from = pos + 1;
    }
    None
}

fn replace_all_invocations(text: &str, name: &str, body: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = find_invocation(rest, name) {
        out.push_str(&rest[..pos]);
        out.push_str(body);
        rest = &rest[pos + name.len()..];
    }
    out.push_str(rest);
    out
}

/// Whether any registered macro name still occurs in `text`.
fn any_invocation(text: &str, registry: &Registry) -> bool {
    registry
        .macros()
        .iter()
        .any(|mac| find_invocation(text, &mac.name).is_some())
}
