//! Balanced-argument scanning for macro invocations.
//!
//! Given the text trailing a matched macro name, the scanner collects the
//! macro's arguments by counting matched opening/closing separator
//! characters instead of fixed-width slicing. The separator pair is usually
//! `{`/`}` but may coincide, in which case parity alone disambiguates.

/// Result of scanning one invocation's trailing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// All arguments closed; `rest` is the unconsumed trailing text.
    Complete { args: Vec<String>, rest: String },
    /// Fewer arguments closed than the macro's arity by end of input.
    Incomplete,
}

/// Per-invocation scanning state, discarded once the invocation is resolved
/// or deferred.
#[derive(Debug, Default)]
struct ArgFrame {
    open: usize,
    close: usize,
    args: Vec<String>,
    current: String,
}

impl ArgFrame {
    fn at_parity(&self) -> bool {
        self.open == self.close
    }

    fn close_arg(&mut self) {
        self.args.push(std::mem::take(&mut self.current));
    }
}

/// Scan `trailing` for `arity` balanced arguments.
///
/// Rules, in order, for each character:
/// - an opening separator at parity starts a new argument uncopied; inside
///   an argument it is copied and counted;
/// - a closing separator that restores parity closes the accumulated
///   argument, otherwise it is copied;
/// - a backslash escape (control word, or single character when no letters
///   follow) is copied whole without being read as a separator;
/// - whitespace at parity is skipped, so invocations joined across physical
///   lines scan the same as single-line ones;
/// - any other character at parity closes as a one-token argument (TeX's
///   single-token-if-no-brace convention); inside an argument it is copied.
pub fn scan_arguments(
    trailing: &str,
    open_sep: char,
    close_sep: char,
    arity: usize,
) -> ScanOutcome {
    let chars: Vec<char> = trailing.chars().collect();
    let mut frame = ArgFrame::default();
    let mut i = 0;

    while i < chars.len() && frame.args.len() < arity {
        let c = chars[i];
        if c == open_sep {
            if frame.at_parity() {
                frame.open += 1;
            } else if c == close_sep {
                frame.close += 1;
                if frame.at_parity() {
                    frame.close_arg();
                } else {
                    frame.current.push(c);
                }
            } else {
                frame.open += 1;
                frame.current.push(c);
            }
        } else if c == close_sep {
            frame.close += 1;
            if frame.at_parity() {
                frame.close_arg();
            } else {
                frame.current.push(c);
            }
        } else if c.is_whitespace() && frame.at_parity() {
            // between arguments; never a single-token argument
        } else {
            if c == '\\' {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                if j == i + 1 && j < chars.len() {
                    // no letters: a single escaped character
                    j += 1;
                }
                frame.current.extend(chars[i..j].iter());
                i = j - 1;
            } else {
                frame.current.push(c);
            }
            if frame.at_parity() {
                frame.close_arg();
            }
        }
        i += 1;
    }

    if frame.at_parity() && frame.args.len() == arity {
        ScanOutcome::Complete {
            args: frame.args,
            rest: chars[i..].iter().collect(),
        }
    } else {
        ScanOutcome::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(trailing: &str, arity: usize) -> (Vec<String>, String) {
        match scan_arguments(trailing, '{', '}', arity) {
            ScanOutcome::Complete { args, rest } => (args, rest),
            ScanOutcome::Incomplete => panic!("expected complete scan of {trailing:?}"),
        }
    }

    #[test]
    fn test_simple_braced_arguments() {
        let (args, rest) = complete("{a}{b c} tail", 2);
        assert_eq!(args, vec!["a", "b c"]);
        assert_eq!(rest, " tail");
    }

    #[test]
    fn test_nested_braces_stay_inside_argument() {
        let (args, rest) = complete("{\\frac{1}{2}}x", 1);
        assert_eq!(args, vec!["\\frac{1}{2}"]);
        assert_eq!(rest, "x");
    }

    #[test]
    fn test_escaped_braces_not_counted() {
        let (args, _) = complete("{\\{\\LL\\}}", 1);
        assert_eq!(args, vec!["\\{\\LL\\}"]);
    }

    #[test]
    fn test_bare_token_arguments() {
        // Bare letters/digits and control words count as single arguments.
        let (args, rest) = complete("{\\frac{1}{\\{\\LL\\}}}{a}\\alpha d", 3);
        assert_eq!(args, vec!["\\frac{1}{\\{\\LL\\}}", "a", "\\alpha"]);
        assert_eq!(rest, " d");
    }

    #[test]
    fn test_whitespace_between_arguments_skipped() {
        let (args, rest) = complete("{a}\n{b}{c}!", 3);
        assert_eq!(args, vec!["a", "b", "c"]);
        assert_eq!(rest, "!");
    }

    #[test]
    fn test_incomplete_when_brace_never_closes() {
        assert_eq!(scan_arguments("{a}{unclosed", '{', '}', 2), ScanOutcome::Incomplete);
        assert_eq!(scan_arguments("", '{', '}', 1), ScanOutcome::Incomplete);
    }

    #[test]
    fn test_identical_separators_use_parity() {
        match scan_arguments("|a||b| rest", '|', '|', 2) {
            ScanOutcome::Complete { args, rest } => {
                assert_eq!(args, vec!["a", "b"]);
                assert_eq!(rest, " rest");
            }
            ScanOutcome::Incomplete => panic!("expected complete scan"),
        }
    }

    #[test]
    fn test_trailing_lone_backslash_closes_as_argument() {
        // A bare backslash at end of input still counts as a one-token
        // argument rather than stalling the scan.
        let (args, rest) = complete("{a}\\", 2);
        assert_eq!(args, vec!["a", "\\"]);
        assert_eq!(rest, "");
    }
}
