//! Fenced code blocks. Runs first: every fence becomes an exclusion zone for
//! the passes after it.

use super::{
    lines_with_offsets, ColorClass, ExclusionZones, FenceZone, MarkdownPass, MatchKind, MdMatch,
    StyleHints,
};

pub struct FencePass;

struct OpenFence {
    marker: u8,
    len: usize,
    lang: Option<String>,
    start: usize,
    body_start: usize,
}

impl MarkdownPass for FencePass {
    fn name(&self) -> &'static str {
        "fences"
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();
        let mut open: Option<OpenFence> = None;

        for (start, line) in lines_with_offsets(text) {
            let line_end = start + line.len();
            let trimmed = line.trim_start();
            let indent = line.len() - trimmed.len();

            if let Some((marker, run_len, rest)) = parse_fence_marker(trimmed) {
                match open.as_ref() {
                    Some(fence) => {
                        // A closing fence must match the delimiter and be at least as long.
                        if marker == fence.marker && run_len >= fence.len && rest.trim().is_empty() {
                            let range = start + indent..line_end;
                            matches.push(MdMatch {
                                kind: MatchKind::FenceClose,
                                range: range.clone(),
                                content: range,
                                rendered: String::new(),
                                hints: StyleHints {
                                    rule: true,
                                    color_class: Some(ColorClass::Muted),
                                    ..StyleHints::default()
                                },
                            });
                            zones.add_fence(FenceZone {
                                range: fence.start..line_end,
                                body: fence.body_start..start.max(fence.body_start),
                                lang: fence.lang.clone(),
                            });
                            open = None;
                            continue;
                        }
                    }
                    None => {
                        // Backtick fences cannot carry backticks in their info string.
                        if marker == b'`' && rest.contains('`') {
                            continue;
                        }
                        let lang = rest
                            .split_whitespace()
                            .next()
                            .filter(|s| !s.is_empty())
                            .map(str::to_string);
                        let range = start + indent..line_end;
                        let content = match &lang {
                            Some(lang) => {
                                let at = line_end - rest.len() + rest.find(lang.as_str()).unwrap_or(0);
                                at..at + lang.len()
                            }
                            None => range.end..range.end,
                        };
                        matches.push(MdMatch {
                            kind: MatchKind::FenceOpen,
                            range,
                            content,
                            rendered: lang.clone().unwrap_or_default(),
                            hints: StyleHints {
                                rule: true,
                                lang: lang.clone(),
                                color_class: Some(ColorClass::Muted),
                                ..StyleHints::default()
                            },
                        });
                        open = Some(OpenFence {
                            marker,
                            len: run_len,
                            lang,
                            start,
                            body_start: (line_end + 1).min(text.len()),
                        });
                        continue;
                    }
                }
            }

            if open.is_some() {
                let range = start..line_end;
                matches.push(MdMatch {
                    kind: MatchKind::CodeLine,
                    range: range.clone(),
                    content: range,
                    rendered: line.to_string(),
                    hints: StyleHints {
                        color_class: Some(ColorClass::Code),
                        ..StyleHints::default()
                    },
                });
            }
        }

        // Unterminated: the fence runs to the end of the text.
        if let Some(fence) = open {
            zones.add_fence(FenceZone {
                range: fence.start..text.len(),
                body: fence.body_start..text.len(),
                lang: fence.lang,
            });
        }

        (matches, zones)
    }
}

fn parse_fence_marker(trimmed: &str) -> Option<(u8, usize, &str)> {
    let bytes = trimmed.as_bytes();
    let marker = *bytes.first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }

    let mut run_len = 0;
    while run_len < bytes.len() && bytes[run_len] == marker {
        run_len += 1;
    }
    if run_len < 3 {
        return None;
    }

    Some((marker, run_len, &trimmed[run_len..]))
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/fence.rs"]
mod tests;
