//! Bullet text normalizer.
//!
//! # Responsibility
//! - Collapse whitespace runs and trim each bullet.
//! - Undo the "sentence pasted twice" data-entry defect.
//! - Drop repeated bullets, keeping the first occurrence.
//!
//! # Invariants
//! - `normalize(normalize(xs)) == normalize(xs)` for every input.
//! - Doubled-sentence detection is an exact first-half/second-half match on
//!   characters; near-duplicates are left untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Normalizes one ordered bullet list.
///
/// Each entry is whitespace-collapsed and trimmed, then exact doublings are
/// collapsed, then later duplicates are dropped.
pub fn normalize<I, S>(bullets: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::<String>::new();
    let mut out = Vec::new();

    for bullet in bullets {
        let collapsed = collapse_whitespace(bullet.as_ref());
        let text = collapse_doubled(&collapsed).to_string();
        if seen.insert(text.clone()) {
            out.push(text);
        }
    }
    out
}

/// Replaces every whitespace run (spaces, tabs, newlines, Unicode spaces)
/// with one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Strips exact `A + A` doublings.
///
/// A string of even character length whose halves are identical is replaced
/// by its (trimmed) first half. This repeats while the result is still an
/// exact doubling, so quadrupled text (`"xyxyxyxy"`) settles in one call.
/// Odd lengths and empty strings are returned unchanged.
pub fn collapse_doubled(text: &str) -> &str {
    let mut current = text;
    loop {
        let char_count = current.chars().count();
        if char_count == 0 || char_count % 2 != 0 {
            return current;
        }
        let Some((split, _)) = current.char_indices().nth(char_count / 2) else {
            return current;
        };
        let (head, tail) = current.split_at(split);
        if head != tail {
            return current;
        }
        current = head.trim();
    }
}
