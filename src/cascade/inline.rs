//! Inline formatting: code spans, `**bold**`, `~~strike~~` and `*italic*`.
//!
//! Scans each line left to right. At any position the order is code span,
//! bold, strikethrough, italic, so a `*` that belongs to a `**` pair never
//! opens an italic span.

use super::{
    lines_with_offsets, ColorClass, ExclusionZones, MarkdownPass, MatchKind, MdMatch, StyleHints,
};

pub struct InlinePass;

impl MarkdownPass for InlinePass {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn runs_on_single_line(&self) -> bool {
        true
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();
        for (start, line) in lines_with_offsets(text) {
            if line.is_empty() || zones.in_fence(&(start..start + line.len())) {
                continue;
            }
            scan_line(line, start, &mut zones, &mut matches);
        }
        (matches, zones)
    }
}

fn scan_line(src: &str, base: usize, zones: &mut ExclusionZones, out: &mut Vec<MdMatch>) {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        // Escaped marker: skip it and the char it escapes.
        if bytes[i] == b'\\' {
            i += 1;
            i += src[i..].chars().next().map_or(0, char::len_utf8);
            continue;
        }

        if let Some(found) = inline_at(src, i) {
            let m = found.into_match(src, base);
            if zones.try_claim(&m) {
                i = found.end;
                out.push(m);
                continue;
            }
        }

        if bytes[i] == b'`' {
            // An unmatched backtick run is skipped whole so its tail cannot
            // open a shorter span.
            i += run_length(bytes, i, b'`');
        } else {
            i += src[i..].chars().next().map_or(1, char::len_utf8);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Found {
    kind: MatchKind,
    start: usize,
    content_start: usize,
    content_end: usize,
    end: usize,
}

impl Found {
    fn into_match(self, src: &str, base: usize) -> MdMatch {
        let hints = match self.kind {
            MatchKind::Bold => StyleHints {
                bold: true,
                ..StyleHints::default()
            },
            MatchKind::Italic => StyleHints {
                italic: true,
                ..StyleHints::default()
            },
            MatchKind::Strikethrough => StyleHints {
                strike: true,
                ..StyleHints::default()
            },
            _ => StyleHints {
                color_class: Some(ColorClass::Code),
                ..StyleHints::default()
            },
        };
        MdMatch {
            kind: self.kind,
            range: base + self.start..base + self.end,
            content: base + self.content_start..base + self.content_end,
            rendered: src[self.content_start..self.content_end].to_string(),
            hints,
        }
    }
}

fn inline_at(src: &str, i: usize) -> Option<Found> {
    let bytes = src.as_bytes();
    match bytes[i] {
        b'`' => parse_code_span(src, i),
        b'*' if bytes.get(i + 1) == Some(&b'*') => paired(src, i, "**", MatchKind::Bold),
        b'~' if bytes.get(i + 1) == Some(&b'~') => paired(src, i, "~~", MatchKind::Strikethrough),
        b'*' => parse_italic(src, i),
        _ => None,
    }
}

/// `**x**` or `~~x~~`: non-empty content that neither starts nor ends with
/// whitespace.
fn paired(src: &str, start: usize, marker: &str, kind: MatchKind) -> Option<Found> {
    let content_start = start + marker.len();
    let (content, end) = find_closing(src, content_start, marker)?;
    if content.is_empty()
        || content.starts_with(char::is_whitespace)
        || content.ends_with(char::is_whitespace)
    {
        return None;
    }
    Some(Found {
        kind,
        start,
        content_start,
        content_end: content_start + content.len(),
        end,
    })
}

fn find_closing<'a>(src: &'a str, start: usize, marker: &str) -> Option<(&'a str, usize)> {
    let rest = src.get(start..)?;
    let pos = rest.find(marker)?;
    Some((&rest[..pos], start + pos + marker.len()))
}

/// `*x*` where neither star touches another star. The opener must be followed
/// by a non-space; the closer must follow a non-space.
fn parse_italic(src: &str, start: usize) -> Option<Found> {
    let bytes = src.as_bytes();
    if start > 0 && bytes[start - 1] == b'*' {
        return None;
    }
    let next = src[start + 1..].chars().next()?;
    if next == '*' || next.is_whitespace() {
        return None;
    }

    let content_start = start + 1;
    let close = find_closing_single(src, content_start)?;
    Some(Found {
        kind: MatchKind::Italic,
        start,
        content_start,
        content_end: close,
        end: close + 1,
    })
}

fn find_closing_single(src: &str, from: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'*' => {
                let prev = src[..i].chars().next_back();
                let prev_ok = prev.is_some_and(|c| c != '*' && !c.is_whitespace());
                let next_star = bytes.get(i + 1) == Some(&b'*');
                if prev_ok && !next_star && i > from {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// A run of one or two backticks closed by a run of the same length. Longer
/// runs are fence syntax and never inline code.
fn parse_code_span(src: &str, start: usize) -> Option<Found> {
    let bytes = src.as_bytes();
    let run = run_length(bytes, start, b'`');
    if run > 2 {
        return None;
    }

    let content_start = start + run;
    let mut i = content_start;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let close = run_length(bytes, i, b'`');
            if close == run {
                if i == content_start {
                    return None;
                }
                return Some(Found {
                    kind: MatchKind::InlineCode,
                    start,
                    content_start,
                    content_end: i,
                    end: i + run,
                });
            }
            i += close;
            continue;
        }
        i += 1;
    }
    None
}

fn run_length(bytes: &[u8], start: usize, byte: u8) -> usize {
    bytes[start..].iter().take_while(|&&b| b == byte).count()
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/inline.rs"]
mod tests;
