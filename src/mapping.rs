//! Clean-text offsets → document positions.
//!
//! A block's `clean_text` is not a slice of the document: markers were
//! removed line by line, so offsets shift by a different amount on every
//! line. Two strategies are provided:
//!
//! - [`OffsetTable`]: built once per block in O(lines). Each clean line is a
//!   contiguous slice of its original line, so a lookup is a binary search
//!   over line starts plus one char count. Exact, even for repeated tokens.
//! - [`SearchMapper`]: re-finds the matched substring in the raw block text by
//!   occurrence index. Worst case is a linear scan of the block per lookup,
//!   and it gives up when stripping made the substring differ from the raw
//!   text (for example across a `*` continuation prefix).

use std::ops::Range;

use memchr::{memchr_iter, memrchr};
use serde::{Deserialize, Serialize};

use crate::block::{char_column, CommentBlock, DocRange, Position};

pub trait PositionMap {
    /// Document span for a clean-text byte range, `None` if it cannot be
    /// located. Callers drop the match instead of guessing.
    fn map_range(&self, range: Range<usize>) -> Option<DocRange>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStrategy {
    #[default]
    Table,
    Search,
}

impl MappingStrategy {
    pub fn mapper<'a>(self, block: &'a CommentBlock) -> Box<dyn PositionMap + 'a> {
        match self {
            Self::Table => Box::new(OffsetTable::new(block)),
            Self::Search => Box::new(SearchMapper::new(block)),
        }
    }
}

pub struct OffsetTable<'a> {
    block: &'a CommentBlock,
    /// Byte offset in `clean_text` where each clean line starts.
    line_starts: Vec<usize>,
}

impl<'a> OffsetTable<'a> {
    pub fn new(block: &'a CommentBlock) -> Self {
        let mut line_starts = Vec::with_capacity(block.layout.len());
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', block.clean_text.as_bytes()).map(|i| i + 1));
        Self { block, line_starts }
    }

    pub fn map_offset(&self, offset: usize) -> Option<Position> {
        if offset > self.block.clean_text.len() {
            return None;
        }
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .checked_sub(1)?;
        let local = offset - self.line_starts[idx];
        let layout = self.block.layout.get(idx)?;
        if local > layout.content.len() {
            return None;
        }
        let line = self.block.original_lines.get(idx)?;
        let character = char_column(line, layout.content.start + local)?;
        Some(Position::new(self.block.start_line + idx, character))
    }
}

impl PositionMap for OffsetTable<'_> {
    fn map_range(&self, range: Range<usize>) -> Option<DocRange> {
        if range.start > range.end {
            return None;
        }
        let start = self.map_offset(range.start)?;
        let end = self.map_offset(range.end)?;
        Some(DocRange::new(start, end))
    }
}

pub struct SearchMapper<'a> {
    block: &'a CommentBlock,
    /// Raw block text starting at the first line's content.
    raw: String,
    /// Char column where `raw` starts on the first line.
    raw_column: usize,
}

impl<'a> SearchMapper<'a> {
    pub fn new(block: &'a CommentBlock) -> Self {
        let first_start = block
            .layout
            .first()
            .map(|layout| layout.content.start)
            .unwrap_or(0);
        let mut raw = String::new();
        let mut raw_column = 0;
        for (idx, line) in block.original_lines.iter().enumerate() {
            if idx == 0 {
                let start = first_start.min(line.len());
                raw_column = char_column(line, start).unwrap_or(0);
                raw.push_str(line.get(start..).unwrap_or(line));
            } else {
                raw.push('\n');
                raw.push_str(line);
            }
        }
        Self {
            block,
            raw,
            raw_column,
        }
    }

    fn position_at(&self, offset: usize) -> Position {
        let before = &self.raw.as_bytes()[..offset];
        let line = memchr_iter(b'\n', before).count();
        let line_start = memrchr(b'\n', before).map_or(0, |i| i + 1);
        let mut character = self.raw[line_start..offset].chars().count();
        if line == 0 {
            character += self.raw_column;
        }
        Position::new(self.block.start_line + line, character)
    }
}

impl PositionMap for SearchMapper<'_> {
    fn map_range(&self, range: Range<usize>) -> Option<DocRange> {
        let clean = self.block.clean_text.as_str();
        let needle = clean.get(range.clone())?;
        if needle.is_empty() {
            return None;
        }
        let occurrence = occurrences_before(clean, needle, range.start)?;
        let found = nth_occurrence(&self.raw, needle, occurrence)?;
        Some(DocRange::new(
            self.position_at(found),
            self.position_at(found + needle.len()),
        ))
    }
}

/// How many (possibly overlapping) occurrences of `needle` start before `at`.
/// `None` if no occurrence starts exactly at `at`.
fn occurrences_before(haystack: &str, needle: &str, at: usize) -> Option<usize> {
    let mut count = 0;
    let mut from = 0;
    while let Some(rel) = haystack.get(from..)?.find(needle) {
        let pos = from + rel;
        if pos == at {
            return Some(count);
        }
        if pos > at {
            return None;
        }
        count += 1;
        from = pos + haystack[pos..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

fn nth_occurrence(haystack: &str, needle: &str, n: usize) -> Option<usize> {
    let mut from = 0;
    let mut seen = 0;
    while let Some(rel) = haystack.get(from..)?.find(needle) {
        let pos = from + rel;
        if seen == n {
            return Some(pos);
        }
        seen += 1;
        from = pos + haystack[pos..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[cfg(test)]
#[path = "../tests/unit/mapping.rs"]
mod tests;
