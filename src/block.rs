//! Comment blocks and document positions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Zero-based document position. `character` counts chars within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocRange {
    pub start: Position,
    pub end: Position,
}

impl DocRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `pos`.
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if any line in `lo..=hi` is touched by this range.
    pub fn touches_lines(&self, lo: usize, hi: usize) -> bool {
        self.start.line <= hi && self.end.line >= lo
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Single-line marker comment (`//`, `#`, `--`).
    Line,
    /// Start/end delimited comment, possibly on one line.
    Block,
    /// Markdown file mode: the whole document.
    Document,
}

/// Byte spans inside one original line.
///
/// `content` is the slice that became this line of `clean_text`; it is always
/// contiguous, which is what lets [`crate::mapping::OffsetTable`] map offsets
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineLayout {
    pub content: Range<usize>,
    /// Decorative continuation prefix (`*` plus one space) in block comments.
    pub prefix: Option<Range<usize>>,
    pub open_marker: Option<Range<usize>>,
    pub close_marker: Option<Range<usize>>,
    /// `//`, `///`, `#` ... for single-line comments.
    pub line_marker: Option<Range<usize>>,
}

/// One contiguous comment region, or the entire file in markdown mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub kind: BlockKind,
    pub clean_text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub original_lines: Vec<String>,
    pub layout: Vec<LineLayout>,
}

impl CommentBlock {
    pub(crate) fn from_lines(
        kind: BlockKind,
        start_line: usize,
        original_lines: Vec<String>,
        layout: Vec<LineLayout>,
    ) -> Self {
        debug_assert_eq!(original_lines.len(), layout.len());
        let mut clean_text = String::new();
        for (idx, (line, spans)) in original_lines.iter().zip(layout.iter()).enumerate() {
            if idx > 0 {
                clean_text.push('\n');
            }
            if let Some(content) = line.get(spans.content.clone()) {
                clean_text.push_str(content);
            }
        }
        let end_line = start_line + original_lines.len().saturating_sub(1);
        Self {
            kind,
            clean_text,
            start_line,
            end_line,
            original_lines,
            layout,
        }
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// One-line comments only get inline formatting and links.
    pub fn is_single_line(&self) -> bool {
        self.kind != BlockKind::Document && self.start_line == self.end_line
    }

    /// Original line for a document line inside this block.
    pub fn original_line(&self, doc_line: usize) -> Option<&str> {
        if !self.contains_line(doc_line) {
            return None;
        }
        self.original_lines
            .get(doc_line - self.start_line)
            .map(String::as_str)
    }

    /// Convert a byte span inside an original line into a document range.
    pub fn line_span_to_range(&self, idx: usize, span: &Range<usize>) -> Option<DocRange> {
        let line = self.original_lines.get(idx)?;
        let start = char_column(line, span.start)?;
        let end = char_column(line, span.end)?;
        Some(DocRange::on_line(self.start_line + idx, start, end))
    }
}

/// Byte offset → char column, `None` when not on a char boundary.
pub(crate) fn char_column(line: &str, byte: usize) -> Option<usize> {
    if byte > line.len() || !line.is_char_boundary(byte) {
        return None;
    }
    Some(line[..byte].chars().count())
}

#[cfg(test)]
#[path = "../tests/unit/block.rs"]
mod tests;
