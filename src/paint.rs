//! Reference host: applies an [`OverlaySet`] to document lines the way an
//! editor's decoration layer would, producing styled segments per line.
//! Used by the CLI preview.

use crate::overlay::{Category, OverlaySet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedSegment {
    pub text: String,
    /// Styles applied to this run, in the order they were attached.
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintedLine {
    pub segments: Vec<PaintedSegment>,
    /// Whole-line background category, if any.
    pub background: Option<Category>,
}

impl PaintedLine {
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

struct LineState {
    chars: Vec<char>,
    hidden: Vec<bool>,
    styles: Vec<Vec<Category>>,
    /// `(column, text, category)`
    inserts: Vec<(usize, String, Category)>,
    background: Option<Category>,
}

pub fn paint<S: AsRef<str>>(lines: &[S], set: &OverlaySet) -> Vec<PaintedLine> {
    let mut states: Vec<LineState> = lines
        .iter()
        .map(|line| {
            let chars: Vec<char> = line.as_ref().chars().collect();
            LineState {
                hidden: vec![false; chars.len()],
                styles: vec![Vec::new(); chars.len()],
                chars,
                inserts: Vec::new(),
                background: None,
            }
        })
        .collect();

    for instruction in set.iter() {
        let range = instruction.range;
        if let Some(text) = &instruction.inserted_text {
            if let Some(state) = states.get_mut(range.start.line) {
                let col = range.start.character.min(state.chars.len());
                state.inserts.push((col, text.clone(), instruction.category));
            }
            continue;
        }

        if instruction.whole_line {
            for line in range.start.line..=range.end.line {
                if let Some(state) = states.get_mut(line) {
                    state.background = Some(instruction.category);
                }
            }
            continue;
        }

        for line in range.start.line..=range.end.line {
            let Some(state) = states.get_mut(line) else {
                continue;
            };
            let len = state.chars.len();
            let from = if line == range.start.line {
                range.start.character.min(len)
            } else {
                0
            };
            let to = if line == range.end.line {
                range.end.character.min(len)
            } else {
                len
            };
            for col in from..to {
                if instruction.category == Category::Hide {
                    state.hidden[col] = true;
                } else if !state.styles[col].contains(&instruction.category) {
                    state.styles[col].push(instruction.category);
                }
            }
        }
    }

    states.into_iter().map(LineState::finish).collect()
}

impl LineState {
    fn finish(mut self) -> PaintedLine {
        self.inserts.sort_by_key(|(col, _, _)| *col);
        let mut segments: Vec<PaintedSegment> = Vec::new();
        let mut inserts = self.inserts.into_iter().peekable();

        for col in 0..=self.chars.len() {
            while let Some((_, text, category)) = inserts.next_if(|(c, _, _)| *c == col) {
                push_segment(&mut segments, &text, &[category]);
            }
            if col < self.chars.len() && !self.hidden[col] {
                let mut buf = [0u8; 4];
                push_segment(&mut segments, self.chars[col].encode_utf8(&mut buf), &self.styles[col]);
            }
        }

        PaintedLine {
            segments,
            background: self.background,
        }
    }
}

fn push_segment(segments: &mut Vec<PaintedSegment>, text: &str, categories: &[Category]) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = segments.last_mut() {
        if last.categories == categories {
            last.text.push_str(text);
            return;
        }
    }
    segments.push(PaintedSegment {
        text: text.to_string(),
        categories: categories.to_vec(),
    });
}

#[cfg(test)]
#[path = "../tests/unit/paint.rs"]
mod tests;
