//! ATX headers, levels 7 down to 1.
//!
//! Only the `#` run and the spaces after it are hidden, so emphasis inside the
//! header text (already matched by the inline pass) stays intact.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExclusionZones, MarkdownPass, MatchKind, MdMatch, StyleHints};

pub const MAX_LEVEL: u8 = 7;

/// Longest marker first, so `###` is never read as `#` followed by `##`.
static HEADER_REGEXES: Lazy<Vec<(u8, Regex)>> = Lazy::new(|| {
    (1..=MAX_LEVEL)
        .rev()
        .map(|level| {
            let pattern = format!(r"(?m)^[ \t]*(#{{{level}}})[ \t]+(\S[^\n]*?)[ \t]*$");
            (level, Regex::new(&pattern).unwrap())
        })
        .collect()
});

pub struct HeaderPass;

impl MarkdownPass for HeaderPass {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn run(&self, text: &str, mut zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();

        for (level, regex) in HEADER_REGEXES.iter() {
            for caps in regex.captures_iter(text) {
                let (Some(marker), Some(body)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let m = MdMatch {
                    kind: MatchKind::Header(*level),
                    range: marker.start()..body.end(),
                    content: body.range(),
                    rendered: body.as_str().to_string(),
                    hints: StyleHints {
                        bold: true,
                        ..StyleHints::default()
                    },
                };
                if zones.try_claim(&m) {
                    matches.push(m);
                }
            }
        }

        matches.sort_by_key(|m| m.range.start);
        (matches, zones)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/headers.rs"]
mod tests;
