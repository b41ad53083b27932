//! Math delimiter normalization.
//!
//! Rewrites symmetric `$`/`$$` delimiters into direction-explicit `\(\)` /
//! `\[\]` so assistive technology can find math-region boundaries. The body
//! is scanned as one stream: delimiter state crosses line boundaries, and an
//! environment stack keeps parity independent inside `table`/`tabular`
//! environments.

mod boxed;
mod tracker;

pub use boxed::{count_math_delimiters, pair_inline_dollars};
pub use tracker::DollarTracker;

use boxed::rewrite_boxed_math;

use crate::Result;

const TRACKED_ENVS: [&str; 2] = ["tabular", "table"]; // longest first

/// Normalize every `$`/`$$` in `body` into directional delimiters.
///
/// For any well-formed document (math regions eventually close, environment
/// nesting balanced) every delimiter is paired with exactly one opening and
/// one closing bracket, however many physical lines separate them. Line
/// structure is preserved verbatim.
pub fn normalize(body: &str) -> Result<String> {
    // Boxed text spans first; their pairing is local to a line.
    let prepared = body
        .split('\n')
        .map(rewrite_boxed_math)
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    Ok(scan(&prepared))
}

/// Which side of an environment boundary a control sequence marks.
enum Boundary {
    Open,
    Close,
}

/// The continuous main scan.
fn scan(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut tracker = DollarTracker::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                if let Some((consumed, boundary)) = env_boundary(&chars[i..]) {
                    match boundary {
                        Boundary::Open => tracker.push_frame(),
                        Boundary::Close => tracker.pop_frame(),
                    }
                    out.extend(chars[i..i + consumed].iter());
                    i += consumed;
                } else {
                    // Escape: the next character is never a math delimiter.
                    out.push('\\');
                    i += 1;
                    if i < chars.len() {
                        out.push(chars[i]);
                        i += 1;
                    }
                }
            }
            '$' => {
                if i + 1 < chars.len() && chars[i + 1] == '$' {
                    out.push_str(if tracker.bump_double() { "\\[" } else { "\\]" });
                    i += 2;
                } else {
                    out.push_str(if tracker.bump_single() { "\\(" } else { "\\)" });
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Match `\begin{table|tabular}` / `\end{table|tabular}` at the head of
/// `chars` (braces tolerated missing), returning the consumed length.
fn env_boundary(chars: &[char]) -> Option<(usize, Boundary)> {
    for (word, boundary) in [("\\begin", Boundary::Open), ("\\end", Boundary::Close)] {
        let word: Vec<char> = word.chars().collect();
        if chars.len() < word.len() || chars[..word.len()] != word[..] {
            continue;
        }
        let mut i = word.len();
        if i < chars.len() && chars[i] == '{' {
            i += 1;
        }
        let env = TRACKED_ENVS
            .iter()
            .find(|env| matches_word(&chars[i..], env))?;
        i += env.len();
        if i < chars.len() && chars[i] == '}' {
            i += 1;
        }
        return Some((i, boundary));
    }
    None
}

fn matches_word(chars: &[char], word: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    chars.len() >= word.len() && chars[..word.len()] == word[..]
}
