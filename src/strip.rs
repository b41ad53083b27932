//! Comment stripping for LaTeX sources.
//!
//! A single left-to-right pass over the input removes `%` line comments and
//! `comment`-environment bodies while leaving `verbatim` environments and
//! escaped `\%`/`\\` sequences untouched. Inside a
//! `\makeatletter`..`\makeatother` block a bare `%` is kept (dropping it can
//! break compilation of at-sign redefinitions) but the rest of that line is
//! still discarded.
//!
//! The scanner is an enum-tagged state machine over a char cursor; every
//! character is handled by exactly one state's rules and line structure is
//! preserved, so stripping already-stripped text is a no-op.

/// Exclusive scanner modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    CommentEnv,
    Verbatim,
    MakeatBlock,
    MakeatLineComment,
}

/// Remove comments from `source`, preserving line structure.
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = State::Normal;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match state {
            State::Normal => {
                if let Some(n) = match_literal(&chars[i..], "\\\\") {
                    out.push_str("\\\\");
                    i += n;
                } else if let Some(n) = match_literal(&chars[i..], "\\%") {
                    out.push_str("\\%");
                    i += n;
                } else if let Some(n) = match_literal(&chars[i..], "\\makeatletter") {
                    push_chars(&mut out, &chars[i..i + n]);
                    state = State::MakeatBlock;
                    i += n;
                } else if let Some(n) = match_env_control(&chars[i..], "begin", "comment") {
                    state = State::CommentEnv;
                    i += n;
                } else if let Some(n) = match_env_control(&chars[i..], "begin", "verbatim") {
                    push_chars(&mut out, &chars[i..i + n]);
                    state = State::Verbatim;
                    i += n;
                } else if c == '%' {
                    state = State::LineComment;
                    i += 1;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Normal;
                }
                i += 1;
            }
            State::CommentEnv => {
                if let Some(n) = match_env_control(&chars[i..], "end", "comment") {
                    // Anything after \end{comment} on the line is dropped too.
                    state = State::LineComment;
                    i += n;
                } else {
                    i += 1;
                }
            }
            State::Verbatim => {
                if let Some(n) = match_env_control(&chars[i..], "end", "verbatim") {
                    push_chars(&mut out, &chars[i..i + n]);
                    state = State::Normal;
                    i += n;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
            State::MakeatBlock => {
                if let Some(n) = match_literal(&chars[i..], "\\\\") {
                    out.push_str("\\\\");
                    i += n;
                } else if let Some(n) = match_literal(&chars[i..], "\\%") {
                    out.push_str("\\%");
                    i += n;
                } else if let Some(n) = match_literal(&chars[i..], "\\makeatother") {
                    push_chars(&mut out, &chars[i..i + n]);
                    state = State::Normal;
                    i += n;
                } else if c == '%' {
                    // The % itself stays; the rest of the line goes.
                    out.push('%');
                    state = State::MakeatLineComment;
                    i += 1;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
            State::MakeatLineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::MakeatBlock;
                }
                i += 1;
            }
        }
    }

    out
}

fn push_chars(out: &mut String, chars: &[char]) {
    out.extend(chars.iter());
}

/// Match `lit` at the start of `chars`, returning the consumed length.
fn match_literal(chars: &[char], lit: &str) -> Option<usize> {
    let lit: Vec<char> = lit.chars().collect();
    if chars.len() >= lit.len() && chars[..lit.len()] == lit[..] {
        Some(lit.len())
    } else {
        None
    }
}

/// Match `\command { env }` at the start of `chars`, tolerating whitespace
/// around the brace group, returning the consumed length.
fn match_env_control(chars: &[char], command: &str, env: &str) -> Option<usize> {
    let mut i = match_literal(chars, "\\")?;
    i += match_literal(&chars[i..], command)?;
    i += skip_spaces(&chars[i..]);
    i += match_literal(&chars[i..], "{")?;
    i += skip_spaces(&chars[i..]);
    i += match_literal(&chars[i..], env)?;
    i += skip_spaces(&chars[i..]);
    i += match_literal(&chars[i..], "}")?;
    Some(i)
}

fn skip_spaces(chars: &[char]) -> usize {
    chars
        .iter()
        .take_while(|c| c.is_whitespace() && **c != '\n')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_comment_dropped_newline_kept() {
        assert_eq!(
            strip_comments("text % a comment\nmore"),
            "text \nmore"
        );
    }

    #[test]
    fn test_escaped_percent_kept() {
        assert_eq!(strip_comments("50\\% of x"), "50\\% of x");
    }

    #[test]
    fn test_escaped_backslash_does_not_escape_percent() {
        // \\% is a row separator followed by a comment.
        assert_eq!(strip_comments("a \\\\% gone\nb"), "a \\\\\nb");
    }

    #[test]
    fn test_comment_environment_dropped() {
        let input = "before\n\\begin{comment}\nhidden\n\\end{comment} tail\nafter";
        assert_eq!(strip_comments(input), "before\n\nafter");
    }

    #[test]
    fn test_comment_environment_with_spaces() {
        let input = "\\begin {  comment }x\\end{ comment}\nkept";
        assert_eq!(strip_comments(input), "\nkept");
    }

    #[test]
    fn test_verbatim_kept_including_percent() {
        let input = "\\begin{verbatim}\n% not a comment\n\\end{verbatim}";
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn test_makeat_block_keeps_percent_trims_line() {
        let input = "\\makeatletter\n\\x@a % note\n\\makeatother\n";
        assert_eq!(strip_comments(input), "\\makeatletter\n\\x@a %\n\\makeatother\n");
    }

    #[test]
    fn test_makeat_block_escapes() {
        let input = "\\makeatletter a\\% \\\\ b\\makeatother";
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn test_idempotent() {
        let input = "a % c\n\\begin{comment}x\\end{comment}\n\\makeatletter\n%rest\n\\makeatother\nend";
        let once = strip_comments(input);
        assert_eq!(strip_comments(&once), once);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "no comments here\njust text\n";
        assert_eq!(strip_comments(input), input);
    }
}
