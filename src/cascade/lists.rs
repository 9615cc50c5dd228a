//! Task items, bullets and numbered items.
//!
//! Tasks run as their own pass before plain bullets so `- [x] done` is never
//! rendered as a bullet followed by literal brackets.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{ColorClass, ExclusionZones, MarkdownPass, MatchKind, MdMatch, StyleHints};

static TASK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)([-*+])[ \t]+\[([ xX])\](?:[ \t]+|$)([^\n]*)$").unwrap()
});
static BULLET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)([-*+])[ \t]+(\S[^\n]*)$").unwrap());
static NUMBERED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(\d{1,9})([.)])[ \t]+(\S[^\n]*)$").unwrap());

pub const CHECKED_GLYPH: &str = "☑ ";
pub const UNCHECKED_GLYPH: &str = "☐ ";
pub const BULLET_GLYPH: &str = "• ";
pub const NESTED_BULLET_GLYPH: &str = "◦ ";

pub struct TaskPass;

impl MarkdownPass for TaskPass {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();
        for caps in TASK_REGEX.captures_iter(text) {
            let Some((indent, marker_start, body)) = marker_groups(&caps, 4) else {
                continue;
            };
            let checked = caps
                .get(3)
                .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"));
            let m = MdMatch {
                kind: MatchKind::Task { checked },
                range: marker_start..body.end,
                content: body.clone(),
                rendered: if checked { CHECKED_GLYPH } else { UNCHECKED_GLYPH }.to_string(),
                hints: StyleHints {
                    checked: Some(checked),
                    strike: checked,
                    color_class: Some(ColorClass::Accent),
                    collapse_residual: indent.is_empty(),
                    ..StyleHints::default()
                },
            };
            if zones.try_claim(&m) {
                matches.push(m);
            }
        }
        (matches, zones)
    }
}

pub struct ListPass;

impl MarkdownPass for ListPass {
    fn name(&self) -> &'static str {
        "lists"
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();

        for caps in BULLET_REGEX.captures_iter(text) {
            let Some((indent, marker_start, body)) = marker_groups(&caps, 3) else {
                continue;
            };
            let m = MdMatch {
                kind: MatchKind::Bullet,
                range: marker_start..body.end,
                content: body,
                rendered: if indent.is_empty() {
                    BULLET_GLYPH
                } else {
                    NESTED_BULLET_GLYPH
                }
                .to_string(),
                hints: StyleHints {
                    color_class: Some(ColorClass::Accent),
                    collapse_residual: indent.is_empty(),
                    ..StyleHints::default()
                },
            };
            if zones.try_claim(&m) {
                matches.push(m);
            }
        }

        for caps in NUMBERED_REGEX.captures_iter(text) {
            let Some((indent, marker_start, body)) = marker_groups(&caps, 4) else {
                continue;
            };
            let number = caps.get(2).map_or("", |m| m.as_str());
            let m = MdMatch {
                kind: MatchKind::Numbered,
                range: marker_start..body.end,
                content: body,
                rendered: format!("{number}. "),
                hints: StyleHints {
                    color_class: Some(ColorClass::Accent),
                    collapse_residual: indent.is_empty(),
                    ..StyleHints::default()
                },
            };
            if zones.try_claim(&m) {
                matches.push(m);
            }
        }

        matches.sort_by_key(|m| m.range.start);
        (matches, zones)
    }
}

/// `(indent, marker start, body span)` from an item match. Group 1 is always
/// the indentation and `body` names the group holding the item text.
fn marker_groups<'t>(
    caps: &Captures<'t>,
    body: usize,
) -> Option<(&'t str, usize, std::ops::Range<usize>)> {
    let indent = caps.get(1)?;
    let body = caps.get(body)?;
    Some((indent.as_str(), indent.end(), body.range()))
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/lists.rs"]
mod tests;
