//! Edit-mode gate: the block under the cursor reverts to raw text.

use crate::block::{BlockKind, CommentBlock};
use crate::overlay::OverlaySet;

/// Inclusive line span whose overlays are suppressed for `cursor_line`.
///
/// A cursor inside a comment block suppresses the whole block. Outside any
/// block, or inside a markdown document, only the cursor line is affected.
pub fn suppressed_lines(blocks: &[CommentBlock], cursor_line: usize) -> (usize, usize) {
    blocks
        .iter()
        .filter(|b| b.kind != BlockKind::Document)
        .find(|b| b.contains_line(cursor_line))
        .map_or((cursor_line, cursor_line), |b| (b.start_line, b.end_line))
}

/// Drop every instruction touching the suppressed span. `None` means no
/// cursor is tracked and nothing is filtered.
pub fn filter_active(
    set: &OverlaySet,
    blocks: &[CommentBlock],
    cursor_line: Option<usize>,
) -> OverlaySet {
    let Some(cursor_line) = cursor_line else {
        return set.clone();
    };
    let (lo, hi) = suppressed_lines(blocks, cursor_line);
    set.filtered(|instruction| !instruction.range.touches_lines(lo, hi))
}

/// Per-document gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// No active line tracked yet.
    #[default]
    Idle,
    Rendered {
        line: usize,
    },
    /// Text changed; the cached parse is stale.
    NeedsReparse {
        line: Option<usize>,
    },
}

impl GateState {
    pub fn active_line(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Rendered { line } => Some(line),
            Self::NeedsReparse { line } => line,
        }
    }

    pub fn needs_reparse(self) -> bool {
        matches!(self, Self::NeedsReparse { .. })
    }

    pub fn on_render(&mut self, line: usize) {
        *self = Self::Rendered { line };
    }

    /// Returns whether the filtered set must be recomputed.
    pub fn on_cursor(&mut self, line: usize) -> bool {
        match *self {
            Self::Rendered { line: current } if current == line => false,
            Self::NeedsReparse { .. } => {
                *self = Self::NeedsReparse { line: Some(line) };
                true
            }
            _ => {
                *self = Self::Rendered { line };
                true
            }
        }
    }

    pub fn on_edit(&mut self) {
        *self = Self::NeedsReparse {
            line: self.active_line(),
        };
    }
}

#[cfg(test)]
#[path = "../tests/unit/gate.rs"]
mod tests;
