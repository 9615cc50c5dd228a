//! Style/overlay emission: matches and block chrome → [`OverlaySet`].
//!
//! Every construct becomes a `hide` instruction over its source syntax plus a
//! rendered instruction anchored at the same start. Headers and list markers
//! hide only their leading marker. Nothing here touches the document.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::block::{BlockKind, CommentBlock, DocRange, LineLayout};
use crate::cascade::{MatchKind, MdMatch, TokenClass};
use crate::mapping::{MappingStrategy, PositionMap};
use crate::overlay::{Category, OverlayInstruction, OverlaySet};
use crate::theme::ThemeContext;

pub const DEFAULT_RULE_WIDTH: usize = 40;
pub const RULE_CHAR: char = '─';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    pub rule_width: usize,
    pub mapping: MappingStrategy,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            rule_width: DEFAULT_RULE_WIDTH,
            mapping: MappingStrategy::default(),
        }
    }
}

pub struct Emitter<'a> {
    options: EmitOptions,
    theme: &'a ThemeContext,
}

impl<'a> Emitter<'a> {
    pub fn new(options: EmitOptions, theme: &'a ThemeContext) -> Self {
        Self { options, theme }
    }

    /// `matches[i]` belongs to `blocks[i]`.
    pub fn emit(&self, blocks: &[CommentBlock], matches: &[Vec<MdMatch>]) -> OverlaySet {
        let mut set = OverlaySet::with_styles(self.theme.styles().clone());
        for (block, block_matches) in blocks.iter().zip(matches) {
            self.emit_block(block, block_matches, &mut set);
        }
        set.normalize();
        set
    }

    pub fn emit_block(&self, block: &CommentBlock, matches: &[MdMatch], set: &mut OverlaySet) {
        self.emit_chrome(block, set);

        let mapper = self.options.mapping.mapper(block);
        let mut dropped = 0usize;
        for m in matches {
            if !self.emit_match(mapper.as_ref(), m, set) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(
                start_line = block.start_line,
                dropped,
                "unmappable matches dropped"
            );
        }
    }

    /// Returns false when the match could not be mapped and was skipped.
    fn emit_match(&self, mapper: &dyn PositionMap, m: &MdMatch, set: &mut OverlaySet) -> bool {
        match m.kind {
            MatchKind::Bold
            | MatchKind::Italic
            | MatchKind::InlineCode
            | MatchKind::Strikethrough
            | MatchKind::Link
            | MatchKind::Image => {
                let Some(range) = mapper.map_range(m.range.clone()) else {
                    return false;
                };
                let category = inline_category(m.kind);
                set.push(OverlayInstruction::new(range, Category::Hide));
                set.push(
                    OverlayInstruction::new(DocRange::point(range.start), category)
                        .with_text(m.rendered.clone()),
                );
            }
            MatchKind::Header(level) => {
                let (Some(marker), Some(content)) = (
                    mapper.map_range(m.range.start..m.content.start),
                    mapper.map_range(m.content.clone()),
                ) else {
                    return false;
                };
                set.push(OverlayInstruction::new(marker, Category::Hide));
                set.push(OverlayInstruction::new(content, Category::header(level)));
            }
            MatchKind::Bullet | MatchKind::Numbered | MatchKind::Task { .. } => {
                let Some(marker) = mapper.map_range(m.range.start..m.content.start) else {
                    return false;
                };
                let category = match m.kind {
                    MatchKind::Task { checked: true } => Category::TaskChecked,
                    MatchKind::Task { checked: false } => Category::TaskUnchecked,
                    MatchKind::Numbered => Category::Numbered,
                    _ => Category::Bullet,
                };
                set.push(OverlayInstruction::new(marker, Category::Hide));
                set.push(
                    OverlayInstruction::new(DocRange::point(marker.start), category)
                        .with_text(m.rendered.clone())
                        .collapsing(m.hints.collapse_residual),
                );
                if m.kind == (MatchKind::Task { checked: true }) && !m.content.is_empty() {
                    if let Some(text) = mapper.map_range(m.content.clone()) {
                        set.push(OverlayInstruction::new(text, Category::TaskDoneText));
                    }
                }
            }
            MatchKind::FenceOpen | MatchKind::FenceClose => {
                let Some(range) = mapper.map_range(m.range.clone()) else {
                    return false;
                };
                let label = m.hints.lang.as_deref();
                set.push(OverlayInstruction::new(range, Category::Hide));
                set.push(
                    OverlayInstruction::new(DocRange::point(range.start), Category::Fence)
                        .with_text(rule(self.options.rule_width, label)),
                );
            }
            MatchKind::CodeLine => {
                let Some(range) = mapper.map_range(m.range.clone()) else {
                    return false;
                };
                set.push(OverlayInstruction::new(range, Category::CodeBlock).whole_line());
            }
            MatchKind::CodeToken(class) => {
                let Some(range) = mapper.map_range(m.range.clone()) else {
                    return false;
                };
                set.push(OverlayInstruction::new(range, token_category(class)));
            }
        }
        true
    }

    /// Marker coloring, block rules and continuation-prefix hiding.
    fn emit_chrome(&self, block: &CommentBlock, set: &mut OverlaySet) {
        match block.kind {
            BlockKind::Document => {}
            BlockKind::Line => {
                for (idx, layout) in block.layout.iter().enumerate() {
                    if let Some(marker) = &layout.line_marker {
                        if let Some(range) = block.line_span_to_range(idx, marker) {
                            set.push(OverlayInstruction::new(range, Category::CommentGray));
                        }
                    }
                }
            }
            BlockKind::Block => {
                let multi_line = block.start_line != block.end_line;
                for (idx, layout) in block.layout.iter().enumerate() {
                    let Some(line) = block.original_lines.get(idx) else {
                        continue;
                    };
                    self.emit_delimiters(block, idx, line, layout, multi_line, set);
                    if let Some(prefix) = &layout.prefix {
                        if let Some(range) = block.line_span_to_range(idx, prefix) {
                            let width = line[prefix.clone()].width();
                            set.push(OverlayInstruction::new(range, Category::Hide));
                            set.push(
                                OverlayInstruction::new(DocRange::point(range.start), Category::Indent)
                                    .with_text(" ".repeat(width)),
                            );
                        }
                    }
                }
            }
        }
    }

    fn emit_delimiters(
        &self,
        block: &CommentBlock,
        idx: usize,
        line: &str,
        layout: &LineLayout,
        multi_line: bool,
        set: &mut OverlaySet,
    ) {
        let content_blank = line
            .get(layout.content.clone())
            .map_or(true, |s| s.trim().is_empty());

        if let Some(open) = &layout.open_marker {
            // A bare opener line (`/**` alone) becomes a rule.
            let bare = multi_line && content_blank && line[..open.start].trim().is_empty();
            let hide = bare.then(|| open.start..line.trim_end().len().max(open.end));
            self.emit_delimiter(block, idx, open, hide, set);
        }
        if let Some(close) = &layout.close_marker {
            let bare = multi_line
                && content_blank
                && line[..close.start]
                    .trim_start_matches(&[' ', '\t', '*'][..])
                    .is_empty()
                && line[close.end..].trim().is_empty();
            let hide = bare.then(|| close.clone());
            self.emit_delimiter(block, idx, close, hide, set);
        }
    }

    /// `hide` is set for a delimiter alone on its line: it is hidden and
    /// replaced by a rule. Otherwise the marker is only grayed.
    fn emit_delimiter(
        &self,
        block: &CommentBlock,
        idx: usize,
        marker: &Range<usize>,
        hide: Option<Range<usize>>,
        set: &mut OverlaySet,
    ) {
        if let Some(range) = hide.and_then(|span| block.line_span_to_range(idx, &span)) {
            set.push(OverlayInstruction::new(range, Category::Hide));
            set.push(
                OverlayInstruction::new(DocRange::point(range.start), Category::BlockRule)
                    .with_text(rule(self.options.rule_width, None)),
            );
            return;
        }
        if let Some(range) = block.line_span_to_range(idx, marker) {
            set.push(OverlayInstruction::new(range, Category::CommentGray));
        }
    }
}

fn inline_category(kind: MatchKind) -> Category {
    match kind {
        MatchKind::Bold => Category::Bold,
        MatchKind::Italic => Category::Italic,
        MatchKind::InlineCode => Category::InlineCode,
        MatchKind::Strikethrough => Category::Strikethrough,
        MatchKind::Image => Category::Image,
        _ => Category::Link,
    }
}

fn token_category(class: TokenClass) -> Category {
    match class {
        TokenClass::Keyword => Category::SyntaxKeyword,
        TokenClass::String => Category::SyntaxString,
        TokenClass::Comment => Category::SyntaxComment,
        TokenClass::Number => Category::SyntaxNumber,
    }
}

/// A horizontal rule `width` display columns wide, with `label` centred in
/// it when present.
pub fn rule(width: usize, label: Option<&str>) -> String {
    let label = label.map(str::trim).filter(|l| !l.is_empty());
    let Some(label) = label else {
        return RULE_CHAR.to_string().repeat(width);
    };

    let inner = format!(" {label} ");
    let inner_width = inner.width();
    if inner_width >= width {
        return inner;
    }
    let left = (width - inner_width) / 2;
    let right = width - inner_width - left;
    let mut out = String::with_capacity(width * RULE_CHAR.len_utf8() + inner.len());
    out.extend(std::iter::repeat(RULE_CHAR).take(left));
    out.push_str(&inner);
    out.extend(std::iter::repeat(RULE_CHAR).take(right));
    out
}

#[cfg(test)]
#[path = "../tests/unit/emit.rs"]
mod tests;
