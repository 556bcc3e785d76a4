//! Index block formatter.

use crate::model::DocumentIndex;

/// Header line that identifies an index block inside the target document.
pub const INDEX_HEADER: &str = "# Research Documentation Index";

const INSTRUCTION: &str =
    "|IMPORTANT: Prefer retrieval-led reasoning over pre-training-led reasoning for any tasks.";

const TRAILER: &str =
    "For detailed documentation maintenance tasks, invoke the update-research skill.";

/// Render the complete index block for `indexes`, in the order given.
///
/// The block opens with a blank line (it is inserted directly before a
/// `\n# ` section break) and ends with `---\n`.
pub fn format_index(root: &str, indexes: &[DocumentIndex]) -> String {
    let mut lines: Vec<String> = vec![
        String::new(),
        INDEX_HEADER.to_string(),
        String::new(),
        format!("[Platform Research Docs Index]|root: {}", root),
        INSTRUCTION.to_string(),
        String::new(),
    ];

    lines.extend(indexes.iter().map(DocumentIndex::index_line));

    lines.extend([
        String::new(),
        TRAILER.to_string(),
        String::new(),
        "---".to_string(),
        String::new(),
    ]);

    lines.join("\n")
}
