use super::*;
use crate::block::DocRange;
use crate::extract::extract_blocks;
use crate::language::LanguageId;
use crate::overlay::{Category, OverlayInstruction};
use ropey::Rope;

fn blocks(lang: LanguageId, text: &str) -> Vec<CommentBlock> {
    extract_blocks(&Rope::from_str(text), &lang.comment_syntax())
}

fn set_on_lines(lines: &[usize]) -> OverlaySet {
    let mut set = OverlaySet::empty();
    for &line in lines {
        set.push(OverlayInstruction::new(
            DocRange::on_line(line, 0, 1),
            Category::Hide,
        ));
    }
    set
}

// ---------------------------------------------------------------------------
// Suppressed span
// ---------------------------------------------------------------------------

#[test]
fn cursor_in_block_suppresses_whole_block() {
    let text = "a\nb\n/*\n x\n y\n*/\nc";
    let blocks = blocks(LanguageId::C, text);
    assert_eq!(suppressed_lines(&blocks, 3), (2, 5));
    assert_eq!(suppressed_lines(&blocks, 0), (0, 0));
}

#[test]
fn document_mode_suppresses_only_cursor_line() {
    let blocks = blocks(LanguageId::Markdown, "# a\n\n- b\n- c");
    assert_eq!(suppressed_lines(&blocks, 2), (2, 2));
}

#[test]
fn filter_drops_touching_instructions() {
    let text = "a\nb\n/*\n x\n y\n*/\nc";
    let blocks = blocks(LanguageId::C, text);
    let set = set_on_lines(&[0, 2, 3, 5, 6]);

    let filtered = filter_active(&set, &blocks, Some(4));
    let lines: Vec<usize> = filtered.iter().map(|i| i.range.start.line).collect();
    assert_eq!(lines, vec![0, 6]);

    let outside = filter_active(&set, &blocks, Some(6));
    assert_eq!(outside.len(), 4);

    assert_eq!(filter_active(&set, &blocks, None), set);
}

#[test]
fn multi_line_instruction_touching_span_is_dropped() {
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(
        DocRange::new(
            crate::block::Position::new(0, 0),
            crate::block::Position::new(3, 0),
        ),
        Category::CodeBlock,
    ));
    let filtered = filter_active(&set, &[], Some(3));
    assert!(filtered.is_empty());
}

// ---------------------------------------------------------------------------
// GateState
// ---------------------------------------------------------------------------

#[test]
fn same_line_cursor_is_a_no_op() {
    let mut state = GateState::default();
    assert_eq!(state.active_line(), None);
    assert!(state.on_cursor(4));
    assert_eq!(state, GateState::Rendered { line: 4 });
    assert!(!state.on_cursor(4));
    assert!(state.on_cursor(5));
    assert_eq!(state.active_line(), Some(5));
}

#[test]
fn edit_forces_reparse_and_keeps_line() {
    let mut state = GateState::Rendered { line: 2 };
    state.on_edit();
    assert!(state.needs_reparse());
    assert_eq!(state.active_line(), Some(2));

    assert!(state.on_cursor(2));
    assert!(state.needs_reparse());
    assert!(state.on_cursor(7));
    assert_eq!(state, GateState::NeedsReparse { line: Some(7) });

    state.on_render(7);
    assert!(!state.needs_reparse());
    assert_eq!(state, GateState::Rendered { line: 7 });
}

#[test]
fn edit_from_idle_has_no_line() {
    let mut state = GateState::Idle;
    state.on_edit();
    assert_eq!(state, GateState::NeedsReparse { line: None });
}
