//! Images, then links. Images run as their own pass ahead of links so the
//! link pattern never claims the `[alt](url)` tail of an image. One-line
//! comments get links only.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ColorClass, ExclusionZones, MarkdownPass, MatchKind, MdMatch, StyleHints};

static IMAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\s]*)(?:[ \t]+[^)\n]*)?\)").unwrap());
static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]*)(?:[ \t]+[^)\n]*)?\)").unwrap());

pub const IMAGE_GLYPH: &str = "🖼";

pub struct ImagePass;

impl MarkdownPass for ImagePass {
    fn name(&self) -> &'static str {
        "images"
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();
        for caps in IMAGE_REGEX.captures_iter(text) {
            let (Some(all), Some(alt), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            let rendered = if alt.as_str().trim().is_empty() {
                format!("{IMAGE_GLYPH} image")
            } else {
                format!("{IMAGE_GLYPH} {}", alt.as_str())
            };
            let m = MdMatch {
                kind: MatchKind::Image,
                range: all.range(),
                content: alt.range(),
                rendered,
                hints: StyleHints {
                    italic: true,
                    url: Some(url.as_str().to_string()),
                    color_class: Some(ColorClass::Link),
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

pub struct LinkPass;

impl MarkdownPass for LinkPass {
    fn name(&self) -> &'static str {
        "links"
    }

    fn runs_on_single_line(&self) -> bool {
        true
    }

    /// `![alt](url)` is never a link, even where the image pass did not run.
    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();
        for caps in LINK_REGEX.captures_iter(text) {
            let (Some(all), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            if text[..all.start()].ends_with('!') {
                continue;
            }
            let m = MdMatch {
                kind: MatchKind::Link,
                range: all.range(),
                content: label.range(),
                rendered: label.as_str().to_string(),
                hints: StyleHints {
                    underline: true,
                    url: Some(url.as_str().to_string()),
                    color_class: Some(ColorClass::Link),
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

#[cfg(test)]
#[path = "../../tests/unit/cascade/links.rs"]
mod tests;
