use super::*;

fn layout(content: Range<usize>) -> LineLayout {
    LineLayout {
        content,
        ..LineLayout::default()
    }
}

#[test]
fn from_lines_joins_content_slices() {
    let block = CommentBlock::from_lines(
        BlockKind::Block,
        4,
        vec!["/* one".to_string(), " * two */".to_string()],
        vec![layout(3..6), layout(3..6)],
    );
    assert_eq!(block.clean_text, "one\ntwo");
    assert_eq!(block.start_line, 4);
    assert_eq!(block.end_line, 5);
    assert_eq!(block.line_count(), 2);
    assert_eq!(block.clean_text.lines().count(), block.line_count());
}

#[test]
fn single_line_excludes_document_mode() {
    let line = CommentBlock::from_lines(
        BlockKind::Line,
        0,
        vec!["// hi".to_string()],
        vec![layout(3..5)],
    );
    assert!(line.is_single_line());

    let doc = CommentBlock::from_lines(
        BlockKind::Document,
        0,
        vec!["# Title".to_string()],
        vec![layout(0..7)],
    );
    assert!(!doc.is_single_line());
}

#[test]
fn original_line_is_bounded_by_block() {
    let block = CommentBlock::from_lines(
        BlockKind::Block,
        10,
        vec!["/*".to_string(), "x".to_string(), "*/".to_string()],
        vec![layout(2..2), layout(0..1), layout(0..0)],
    );
    assert_eq!(block.original_line(11), Some("x"));
    assert_eq!(block.original_line(9), None);
    assert_eq!(block.original_line(13), None);
    assert!(block.contains_line(12));
}

#[test]
fn line_span_uses_char_columns() {
    let block = CommentBlock::from_lines(
        BlockKind::Line,
        3,
        vec!["// héllo **x**".to_string()],
        vec![layout(3..15)],
    );
    // "**" starts at byte 10, char 9.
    let range = block.line_span_to_range(0, &(10..15)).unwrap();
    assert_eq!(range, DocRange::on_line(3, 9, 14));
}

#[test]
fn char_column_rejects_mid_char_offsets() {
    assert_eq!(char_column("é", 1), None);
    assert_eq!(char_column("é", 2), Some(1));
    assert_eq!(char_column("ab", 3), None);
}

#[test]
fn doc_range_touches_lines() {
    let range = DocRange::new(Position::new(5, 0), Position::new(7, 2));
    assert!(range.touches_lines(7, 9));
    assert!(range.touches_lines(0, 5));
    assert!(!range.touches_lines(8, 10));
    assert!(DocRange::point(Position::new(1, 1)).is_empty());
}
