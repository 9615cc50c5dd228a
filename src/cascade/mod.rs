//! Markdown pattern cascade.
//!
//! Passes run in a fixed order and thread an [`ExclusionZones`] value from
//! one to the next. A pass may only register a match whose hidden span is
//! still free, which is how later passes are kept from re-matching text that
//! earlier passes already claimed.
//!
//! | # | pass        | single-line comments |
//! |---|-------------|----------------------|
//! | 1 | fences      | no                   |
//! | 2 | code tokens | no (fence bodies only) |
//! | 3 | inline      | yes                  |
//! | 4 | images      | no                   |
//! | 5 | links       | yes                  |
//! | 6 | tasks       | no                   |
//! | 7 | lists       | no                   |
//! | 8 | headers     | no                   |

use std::ops::Range;

use crate::block::CommentBlock;

mod code;
mod fence;
mod headers;
mod inline;
mod links;
mod lists;

pub use code::CodeTokenPass;
pub use fence::FencePass;
pub use headers::HeaderPass;
pub use inline::InlinePass;
pub use links::{ImagePass, LinkPass};
pub use lists::{ListPass, TaskPass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    String,
    Comment,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Bold,
    Italic,
    InlineCode,
    Strikethrough,
    /// Levels 1..=7.
    Header(u8),
    Bullet,
    Numbered,
    Task { checked: bool },
    Link,
    Image,
    FenceOpen,
    FenceClose,
    /// One body line of a fenced code block.
    CodeLine,
    CodeToken(TokenClass),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Accent,
    Link,
    Code,
    Muted,
    Keyword,
    String,
    Comment,
    Number,
}

/// Presentation attributes attached to a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleHints {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub underline: bool,
    /// Rendered as a horizontal rule.
    pub rule: bool,
    pub checked: Option<bool>,
    pub color_class: Option<ColorClass>,
    pub url: Option<String>,
    pub lang: Option<String>,
    /// The marker sat at column zero, so nothing absorbs the residual width
    /// of the hidden characters.
    pub collapse_residual: bool,
}

/// One pattern application over a block's clean text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdMatch {
    pub kind: MatchKind,
    /// Full syntax span, byte offsets into `clean_text`.
    pub range: Range<usize>,
    /// Inner span that carries the displayed content.
    pub content: Range<usize>,
    pub rendered: String,
    pub hints: StyleHints,
}

impl MdMatch {
    /// The span this match hides. Headers and list markers only hide their
    /// leading marker; code highlighting hides nothing.
    pub fn hidden(&self) -> Option<Range<usize>> {
        match self.kind {
            MatchKind::Header(_)
            | MatchKind::Bullet
            | MatchKind::Numbered
            | MatchKind::Task { .. } => Some(self.range.start..self.content.start),
            MatchKind::CodeLine | MatchKind::CodeToken(_) => None,
            _ => Some(self.range.clone()),
        }
    }
}

/// A fenced code block inside the clean text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceZone {
    /// Opening fence line start through closing fence line end.
    pub range: Range<usize>,
    /// Lines strictly between the fences.
    pub body: Range<usize>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionZones {
    fences: Vec<FenceZone>,
    hidden: Vec<Range<usize>>,
}

impl ExclusionZones {
    pub fn fences(&self) -> &[FenceZone] {
        &self.fences
    }

    pub fn add_fence(&mut self, zone: FenceZone) {
        self.fences.push(zone);
    }

    pub fn in_fence(&self, range: &Range<usize>) -> bool {
        self.fences.iter().any(|f| intersects(&f.range, range))
    }

    /// Outside every fence and not overlapping anything already hidden.
    pub fn is_free(&self, range: &Range<usize>) -> bool {
        !self.in_fence(range) && !self.hidden.iter().any(|h| overlaps(h, range))
    }

    /// Register `m` if its hidden span is free. Returns whether it was taken.
    pub fn try_claim(&mut self, m: &MdMatch) -> bool {
        let Some(hidden) = m.hidden() else {
            return true;
        };
        if !self.is_free(&hidden) {
            return false;
        }
        if !hidden.is_empty() {
            self.hidden.push(hidden);
        }
        true
    }
}

/// Half-open overlap, with an empty range counting when it sits inside.
fn intersects(zone: &Range<usize>, range: &Range<usize>) -> bool {
    if range.is_empty() {
        return zone.start <= range.start && range.start < zone.end;
    }
    range.start < zone.end && zone.start < range.end
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    !a.is_empty() && !b.is_empty() && a.start < b.end && b.start < a.end
}

pub trait MarkdownPass {
    fn name(&self) -> &'static str;

    /// Whether the pass also runs on one-line comments.
    fn runs_on_single_line(&self) -> bool {
        false
    }

    fn run(&self, text: &str, zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones);
}

pub struct Cascade {
    passes: Vec<Box<dyn MarkdownPass>>,
}

impl Cascade {
    pub fn new(highlight_code: bool) -> Self {
        let mut passes: Vec<Box<dyn MarkdownPass>> = vec![Box::new(FencePass)];
        if highlight_code {
            passes.push(Box::new(CodeTokenPass));
        }
        passes.push(Box::new(InlinePass));
        passes.push(Box::new(ImagePass));
        passes.push(Box::new(LinkPass));
        passes.push(Box::new(TaskPass));
        passes.push(Box::new(ListPass));
        passes.push(Box::new(HeaderPass));
        Self { passes }
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// All matches for one block, ordered by start offset.
    pub fn run(&self, block: &CommentBlock) -> Vec<MdMatch> {
        self.run_text(&block.clean_text, block.is_single_line())
    }

    pub fn run_text(&self, text: &str, single_line: bool) -> Vec<MdMatch> {
        let mut zones = ExclusionZones::default();
        let mut matches = Vec::new();

        for pass in &self.passes {
            if single_line && !pass.runs_on_single_line() {
                continue;
            }
            let (found, next) = pass.run(text, zones);
            tracing::trace!(pass = pass.name(), matches = found.len(), "cascade pass");
            matches.extend(found);
            zones = next;
        }

        matches.sort_by_key(|m| (m.range.start, m.range.end));
        matches
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(true)
    }
}

/// `(start offset, line)` for every line of `text`.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0usize;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/mod.rs"]
mod tests;
