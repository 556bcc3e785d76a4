//! Second-level heading scanner.
//!
//! Plain line matching, no markdown parser: a heading is any column-0 line
//! starting with exactly `##`, whitespace and some text. Fenced code blocks
//! and block quotes are not special-cased.

use crate::model::HeadingEntry;
use regex::Regex;
use std::sync::LazyLock;

/// `##`, at least one whitespace char, then text with a non-blank character.
/// `###` fails because the third char must be whitespace.
static RE_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s+(\S.*)$").unwrap());

/// Title of a second-level heading line, or `None` if the line is not one.
pub fn heading_title(line: &str) -> Option<&str> {
    RE_H2
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Scan lines for second-level headings and compute their spans.
pub fn scan<S: AsRef<str>>(lines: &[S]) -> Vec<HeadingEntry> {
    let headings: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| heading_title(line.as_ref()).map(|title| (i, title)))
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(n, &(idx, title))| {
            // 0-based index of the next heading == 1-based line before it
            let end_line = headings
                .get(n + 1)
                .map_or(lines.len(), |&(next_idx, _)| next_idx);
            HeadingEntry::new(title, idx + 1, end_line)
        })
        .collect()
}

/// Scan a whole document. A trailing newline does not add an empty line.
pub fn scan_text(text: &str) -> Vec<HeadingEntry> {
    let lines: Vec<&str> = text.lines().collect();
    scan(&lines)
}
