//! Data model for the research index — one entry per second-level heading.

use std::fmt;

/// A second-level heading and the 1-based line span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    pub title: String,
    /// Line holding the `## ` marker itself
    pub start_line: usize,
    /// Last line before the next heading, or the last line of the file
    pub end_line: usize,
}

impl HeadingEntry {
    pub fn new(title: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            title: title.into(),
            start_line,
            end_line,
        }
    }
}

/// Renders as `title:start-end`. Delimiters inside the title are not escaped.
impl fmt::Display for HeadingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.title, self.start_line, self.end_line)
    }
}

/// All headings of one scanned document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIndex {
    pub file_name: String,
    pub entries: Vec<HeadingEntry>,
}

impl DocumentIndex {
    pub fn new(file_name: impl Into<String>, entries: Vec<HeadingEntry>) -> Self {
        Self {
            file_name: file_name.into(),
            entries,
        }
    }

    /// The pipe-delimited index line: `|file.md:{A:1-4,B:5-9}`.
    pub fn index_line(&self) -> String {
        let parts: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        format!("|{}:{{{}}}", self.file_name, parts.join(","))
    }
}
