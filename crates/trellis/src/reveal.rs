//! Node id -> source location, for hosts that jump from the graph to the document text.

use serde::Serialize;

/// Zero-based position of a match in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    /// In characters, not bytes.
    pub column: usize,
    /// Byte offset from the start of the text.
    pub offset: usize,
}

/// Finds the first literal `id="<node_id>"` in `text`.
///
/// This is a plain text search, not an XML query: a key or edge with the same id earlier in the
/// document wins, and single-quoted attributes are not found.
pub fn locate_node_id(text: &str, node_id: &str) -> Option<SourcePosition> {
    let needle = format!("id=\"{node_id}\"");
    let offset = text.find(&needle)?;
    let before = &text[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Some(SourcePosition {
        line: before.matches('\n').count(),
        column: before[line_start..].chars().count(),
        offset,
    })
}
