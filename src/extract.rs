//! Comment extraction: raw document text → ordered, non-overlapping comment
//! blocks with their markers stripped.
//!
//! Malformed input never fails. An unterminated block comment is closed at
//! end of file, and a language without markers simply yields no blocks.

use ropey::Rope;

use crate::block::{BlockKind, CommentBlock, LineLayout};
use crate::language::{BlockMarkers, CommentSyntax};

/// Extract comment blocks, or the whole document for markdown files.
pub fn extract_blocks(rope: &Rope, syntax: &CommentSyntax) -> Vec<CommentBlock> {
    if syntax.document {
        return vec![document_block(rope)];
    }

    let lines = rope_lines(rope);
    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (line_idx, line) in lines.iter().enumerate() {
        let mut pos = 0usize;

        if let Some(mut block) = open.take() {
            match block.push_line(line) {
                Some(after_close) => {
                    blocks.push(block.finish());
                    pos = after_close;
                }
                None => {
                    open = Some(block);
                    continue;
                }
            }
        }

        while pos < line.len() {
            let Some((start, hit)) = find_comment_start(line, pos, syntax) else {
                break;
            };

            match hit {
                MarkerHit::Line(marker) => {
                    blocks.push(line_comment(line_idx, line, start, marker));
                    break;
                }
                MarkerHit::Block(markers) => {
                    let marker_end = opening_marker_end(line, start, markers);
                    let content_start = skip_one_space(line, marker_end);
                    let end_marker = markers.end.as_str();

                    if let Some(rel) = line[marker_end..].find(end_marker) {
                        let close = marker_end + rel;
                        let layout = LineLayout {
                            content: content_start.min(close)..close,
                            open_marker: Some(start..marker_end),
                            close_marker: Some(close..close + end_marker.len()),
                            ..LineLayout::default()
                        };
                        blocks.push(CommentBlock::from_lines(
                            BlockKind::Block,
                            line_idx,
                            vec![line.clone()],
                            vec![layout],
                        ));
                        pos = close + end_marker.len();
                        continue;
                    }

                    open = Some(OpenBlock {
                        markers: markers.clone(),
                        indent: leading_ws(line),
                        start_line: line_idx,
                        lines: vec![line.clone()],
                        layout: vec![LineLayout {
                            content: content_start..line.len(),
                            open_marker: Some(start..marker_end),
                            ..LineLayout::default()
                        }],
                    });
                    break;
                }
            }
        }
    }

    if let Some(block) = open {
        tracing::debug!(
            start_line = block.start_line,
            "unterminated block comment closed at end of file"
        );
        blocks.push(block.finish());
    }

    blocks
}

/// Markdown-file mode: one synthetic block, no marker stripping.
pub fn document_block(rope: &Rope) -> CommentBlock {
    let lines = rope_lines(rope);
    let layout = lines
        .iter()
        .map(|line| LineLayout {
            content: 0..line.len(),
            ..LineLayout::default()
        })
        .collect();
    CommentBlock::from_lines(BlockKind::Document, 0, lines, layout)
}

const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}',
];

/// Every rope line without its terminator; the count equals `len_lines()`.
pub(crate) fn rope_lines(rope: &Rope) -> Vec<String> {
    rope.lines()
        .map(|slice| {
            let s = slice.to_string();
            s.trim_end_matches(LINE_BREAKS).to_string()
        })
        .collect()
}

struct OpenBlock {
    markers: BlockMarkers,
    indent: usize,
    start_line: usize,
    lines: Vec<String>,
    layout: Vec<LineLayout>,
}

impl OpenBlock {
    /// Append a continuation line. Returns the byte offset right after the
    /// closing marker if this line closes the block.
    fn push_line(&mut self, line: &str) -> Option<usize> {
        let end_marker = self.markers.end.as_str();
        let ws_end = leading_ws(line);
        let prefix = if self.markers.strips_star_prefix() {
            decorative_prefix(line, ws_end, end_marker)
        } else {
            None
        };
        let content_start = match &prefix {
            Some(prefix) => prefix.end,
            None => ws_end.min(self.indent),
        };

        let close = line[content_start..]
            .find(end_marker)
            .map(|rel| content_start + rel);
        let layout = match close {
            Some(close) => LineLayout {
                content: content_start..close,
                prefix,
                close_marker: Some(close..close + end_marker.len()),
                ..LineLayout::default()
            },
            None => LineLayout {
                content: content_start..line.len(),
                prefix,
                ..LineLayout::default()
            },
        };

        self.lines.push(line.to_string());
        self.layout.push(layout);
        close.map(|close| close + end_marker.len())
    }

    fn finish(self) -> CommentBlock {
        CommentBlock::from_lines(BlockKind::Block, self.start_line, self.lines, self.layout)
    }
}

enum MarkerHit<'a> {
    Line(&'a str),
    Block(&'a BlockMarkers),
}

/// Earliest comment marker at or after `from`, ignoring markers inside
/// string and char literals. At equal offsets the longest marker wins, so
/// `--[[` beats `--`.
///
/// Double-quoted and backtick strings left open run to end of line. A single
/// quote only opens a string when it closes on the same line; otherwise it is
/// an apostrophe or a lifetime.
fn find_comment_start<'a>(
    line: &str,
    from: usize,
    syntax: &'a CommentSyntax,
) -> Option<(usize, MarkerHit<'a>)> {
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    let mut skip_until = from;

    for (offset, ch) in line[from..].char_indices() {
        let i = from + offset;
        if i < skip_until {
            continue;
        }
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }

        let rest = &line[i..];
        let mut best: Option<(usize, MarkerHit<'a>)> = None;
        for markers in &syntax.block_markers {
            let len = markers.start.len();
            if rest.starts_with(markers.start.as_str())
                && best.as_ref().map_or(true, |(l, _)| len > *l)
            {
                best = Some((len, MarkerHit::Block(markers)));
            }
        }
        for marker in &syntax.line_markers {
            let len = marker.len();
            if rest.starts_with(marker.as_str()) && best.as_ref().map_or(true, |(l, _)| len > *l) {
                best = Some((len, MarkerHit::Line(marker.as_str())));
            }
        }
        if let Some((_, hit)) = best {
            return Some((i, hit));
        }

        match ch {
            '"' | '`' => in_string = Some(ch),
            '\'' => {
                if let Some(len) = char_literal_len(rest).or_else(|| quoted_len(rest)) {
                    skip_until = i + len;
                }
            }
            _ => {}
        }
    }

    None
}

/// Byte length of a char literal at the start of `rest`: `'x'`, `'"'`,
/// `'\n'`, `'\''`, `'\u{1F600}'`.
fn char_literal_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().skip(1);
    let (_, first) = chars.next()?;
    if first == '\\' {
        chars.next()?;
        return chars
            .take(10)
            .find(|&(_, c)| c == '\'')
            .map(|(idx, _)| idx + 1);
    }
    match chars.next()? {
        (idx, '\'') => Some(idx + 1),
        _ => None,
    }
}

/// Byte length of a single-quoted string closed on this line.
fn quoted_len(rest: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '\'' {
            return Some(idx + 1);
        }
    }
    None
}

fn line_comment(line_idx: usize, line: &str, start: usize, marker: &str) -> CommentBlock {
    let mut marker_end = start + marker.len();
    // Rust doc comments: `///` and `//!`.
    if marker == "//" && matches!(line[marker_end..].chars().next(), Some('/' | '!')) {
        marker_end += 1;
    }
    let content_start = skip_one_space(line, marker_end);
    let layout = LineLayout {
        content: content_start..line.len(),
        line_marker: Some(start..marker_end),
        ..LineLayout::default()
    };
    CommentBlock::from_lines(BlockKind::Line, line_idx, vec![line.to_string()], vec![layout])
}

/// End of an opening marker; `/**` and `/*****` banners absorb their extra
/// stars as long as that does not eat into a `*/`.
fn opening_marker_end(line: &str, start: usize, markers: &BlockMarkers) -> usize {
    let mut end = start + markers.start.len();
    if markers.start.as_str() == "/*" {
        while line[end..].starts_with('*') && !line[end..].starts_with("*/") {
            end += 1;
        }
    }
    end
}

/// A single `*` followed by whitespace or end of line. `**` is never a
/// prefix: it is markdown bold at the start of a line.
fn decorative_prefix(line: &str, ws_end: usize, end_marker: &str) -> Option<std::ops::Range<usize>> {
    let rest = &line[ws_end..];
    if !rest.starts_with('*') || rest.starts_with("**") || rest.starts_with(end_marker) {
        return None;
    }
    match rest[1..].chars().next() {
        None => Some(ws_end..ws_end + 1),
        Some(' ' | '\t') => Some(ws_end..ws_end + 2),
        Some(_) => None,
    }
}

fn leading_ws(line: &str) -> usize {
    line.len() - line.trim_start_matches(&[' ', '\t'][..]).len()
}

fn skip_one_space(line: &str, at: usize) -> usize {
    if line[at..].starts_with(' ') {
        at + 1
    } else {
        at
    }
}

#[cfg(test)]
#[path = "../tests/unit/extract.rs"]
mod tests;
