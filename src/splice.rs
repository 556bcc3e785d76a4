//! Insert or replace the index block inside the target document.
//!
//! The target is treated as unstructured text with literal markers: the
//! anchor decides where a new block goes, the block's own header line
//! identifies an existing block. Spans run from a marker up to the next
//! top-level section break.

use crate::error::IndexError;
use crate::format::INDEX_HEADER;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Default anchor the index is placed after.
pub const DEFAULT_ANCHOR: &str = "# Field Mapping Reference";

/// A line break followed by `# ` and an uppercase letter.
static RE_TOP_LEVEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n# [A-Z]").unwrap());

/// Finds where the section starting at the front of a haystack ends.
pub trait SectionBoundary {
    /// Byte offset of the next section break in `haystack`, if any.
    fn next_boundary(&self, haystack: &str) -> Option<usize>;
}

impl SectionBoundary for Regex {
    fn next_boundary(&self, haystack: &str) -> Option<usize> {
        self.find(haystack).map(|m| m.start())
    }
}

/// Boundary at the next top-level (`# X...`) section.
pub struct TopLevelSection;

impl SectionBoundary for TopLevelSection {
    fn next_boundary(&self, haystack: &str) -> Option<usize> {
        RE_TOP_LEVEL.next_boundary(haystack)
    }
}

/// Span from the first occurrence of `marker` to the next boundary after it,
/// or to the end of `text`. `None` if the marker does not occur.
pub fn locate_block(
    text: &str,
    marker: &str,
    boundary: &dyn SectionBoundary,
) -> Option<Range<usize>> {
    let start = text.find(marker)?;
    // Boundaries must lie strictly after the marker start.
    let search_from = start + marker.chars().next().map_or(0, char::len_utf8);
    let end = boundary
        .next_boundary(&text[search_from..])
        .map_or(text.len(), |offset| search_from + offset);
    Some(start..end)
}

/// Literal markers used to place the index block.
#[derive(Debug, Clone)]
pub struct Markers<'a> {
    pub anchor: &'a str,
    pub header: &'a str,
}

impl Default for Markers<'_> {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR,
            header: INDEX_HEADER,
        }
    }
}

/// Return `target` with `block` inserted after the anchor section, or with
/// an existing block replaced in place.
///
/// Fails with [`IndexError::MissingAnchor`] when the anchor is absent, even
/// if an index block already exists.
pub fn splice(target: &str, block: &str, markers: &Markers) -> Result<String, IndexError> {
    let anchor_span = locate_block(target, markers.anchor, &TopLevelSection).ok_or_else(|| {
        IndexError::MissingAnchor {
            anchor: markers.anchor.to_string(),
        }
    })?;

    let (span, replacement) = match locate_block(target, markers.header, &TopLevelSection) {
        Some(existing) => {
            log::debug!("replacing existing index block at {:?}", existing);
            // The existing span starts at the header line; whatever the block
            // carries before its header is already in the target.
            let body = block.find(markers.header).map_or(block, |i| &block[i..]);
            (existing, body)
        }
        None => {
            let at = anchor_span.end;
            log::debug!("inserting new index block at byte {}", at);
            (at..at, block)
        }
    };

    let mut out = String::with_capacity(target.len() - span.len() + replacement.len());
    out.push_str(&target[..span.start]);
    out.push_str(replacement);
    out.push_str(&target[span.end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_index;
    use crate::model::{DocumentIndex, HeadingEntry};

    fn block() -> String {
        let docs = vec![
            DocumentIndex::new("claude-code-docs.md", vec![HeadingEntry::new("Hooks", 1, 9)]),
            DocumentIndex::new("opencode-docs.md", vec![HeadingEntry::new("Agents", 1, 4)]),
        ];
        format_index("./openspec/research", &docs)
    }

    const AGENTS: &str = "# Project\n\nIntro text.\n\n# Field Mapping Reference\n\n| a | b |\n\n# Pre-commit Hooks\n\nRun them.\n";

    #[test]
    fn locate_to_next_top_level_section() {
        let text = "# One\nbody\n# Two\nmore\n";
        assert_eq!(locate_block(text, "# One", &TopLevelSection), Some(0..10));
    }

    #[test]
    fn locate_to_end_of_text() {
        let text = "pre\n# One\nbody\n";
        assert_eq!(locate_block(text, "# One", &TopLevelSection), Some(4..text.len()));
    }

    #[test]
    fn locate_missing_marker() {
        assert_eq!(locate_block("# One\n", "# Two", &TopLevelSection), None);
    }

    #[test]
    fn locate_skips_lowercase_and_nested_sections() {
        let text = "# One\n# lower\n## Sub\n# Next\n";
        let span = locate_block(text, "# One", &TopLevelSection).unwrap();
        assert_eq!(&text[span], "# One\n# lower\n## Sub");
    }

    #[test]
    fn locate_with_custom_boundary() {
        let rule = Regex::new(r"\n---").unwrap();
        let text = "# One\nbody\n---\ntail";
        assert_eq!(locate_block(text, "# One", &rule), Some(0..10));
    }

    #[test]
    fn inserts_before_next_section() {
        let out = splice(AGENTS, &block(), &Markers::default()).unwrap();
        let expected = format!(
            "# Project\n\nIntro text.\n\n# Field Mapping Reference\n\n| a | b |\n{}\n# Pre-commit Hooks\n\nRun them.\n",
            block()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn inserts_at_end_without_following_section() {
        let target = "# Field Mapping Reference\n\n| a | b |\n";
        let out = splice(target, &block(), &Markers::default()).unwrap();
        assert_eq!(out, format!("{}{}", target, block()));
    }

    #[test]
    fn second_splice_is_identity() {
        let markers = Markers::default();
        let once = splice(AGENTS, &block(), &markers).unwrap();
        let twice = splice(&once, &block(), &markers).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.matches(INDEX_HEADER).count(), 1);
    }

    #[test]
    fn second_splice_at_end_is_identity() {
        let markers = Markers::default();
        let target = "# Field Mapping Reference\n\n| a | b |";
        let once = splice(target, &block(), &markers).unwrap();
        let twice = splice(&once, &block(), &markers).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_anchor_fails() {
        let target = "# Project\n\n# Pre-commit Hooks\n";
        let err = splice(target, &block(), &Markers::default()).unwrap_err();
        assert!(matches!(err, IndexError::MissingAnchor { ref anchor } if anchor == DEFAULT_ANCHOR));
    }

    #[test]
    fn missing_anchor_fails_even_with_existing_block() {
        let target = format!("# Project\n{}\n# Other\n", block());
        assert!(splice(&target, &block(), &Markers::default()).is_err());
    }

    #[test]
    fn replacement_preserves_surrounding_content() {
        let markers = Markers::default();
        let stale = "# Project\n\nIntro.\n\n# Field Mapping Reference\n\n| a | b |\n\n# Research Documentation Index\n\n|old.md:{X:1-2}\n\n---\n\n# Pre-commit Hooks\n\nRun them.\n";
        let out = splice(stale, &block(), &markers).unwrap();

        let prefix = "# Project\n\nIntro.\n\n# Field Mapping Reference\n\n| a | b |\n\n";
        let suffix = "\n# Pre-commit Hooks\n\nRun them.\n";
        assert!(out.starts_with(prefix), "got: {out}");
        assert!(out.ends_with(suffix), "got: {out}");
        assert!(!out.contains("old.md"));
        assert!(out.contains("|claude-code-docs.md:{Hooks:1-9}"));
        assert_eq!(out.matches(INDEX_HEADER).count(), 1);
    }

    #[test]
    fn replaces_block_located_before_anchor() {
        let markers = Markers::default();
        let stale = "# Research Documentation Index\n\n|old.md:{}\n\n# Field Mapping Reference\n\nrows\n";
        let out = splice(stale, &block(), &markers).unwrap();
        assert!(out.starts_with(INDEX_HEADER));
        assert!(out.ends_with("\n# Field Mapping Reference\n\nrows\n"));
        assert_eq!(out.matches(INDEX_HEADER).count(), 1);
    }

    #[test]
    fn replaces_trailing_block_to_end() {
        let markers = Markers::default();
        let stale = "# Field Mapping Reference\n\nrows\n\n# Research Documentation Index\n\n|old.md:{}\n";
        let out = splice(stale, &block(), &markers).unwrap();
        assert_eq!(
            out,
            format!("# Field Mapping Reference\n\nrows\n{}", block())
        );
    }

    #[test]
    fn custom_anchor() {
        let markers = Markers {
            anchor: "# Appendix",
            header: INDEX_HEADER,
        };
        let target = "# Appendix\n\nnotes\n\n# Zed\n";
        let out = splice(target, &block(), &markers).unwrap();
        assert!(out.starts_with("# Appendix\n\nnotes\n\n# Research Documentation Index\n"));
        assert!(out.ends_with("---\n\n# Zed\n"));
    }
}
