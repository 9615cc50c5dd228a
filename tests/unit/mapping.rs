use super::*;
use crate::extract::extract_blocks;
use crate::language::LanguageId;
use ropey::Rope;

fn first_block(lang: LanguageId, text: &str) -> CommentBlock {
    extract_blocks(&Rope::from_str(text), &lang.comment_syntax())
        .into_iter()
        .next()
        .unwrap()
}

fn clean_range(block: &CommentBlock, needle: &str, nth: usize) -> Range<usize> {
    let start = block
        .clean_text
        .match_indices(needle)
        .nth(nth)
        .map(|(i, _)| i)
        .unwrap();
    start..start + needle.len()
}

// ---------------------------------------------------------------------------
// Offset table
// ---------------------------------------------------------------------------

#[test]
fn table_maps_trailing_comment() {
    let block = first_block(LanguageId::Rust, "let x = 1; // This is **bold** text");
    let table = OffsetTable::new(&block);
    let range = table.map_range(clean_range(&block, "**bold**", 0)).unwrap();
    assert_eq!(range, DocRange::on_line(0, 22, 30));
}

#[test]
fn table_disambiguates_repeated_tokens() {
    let block = first_block(LanguageId::Rust, "// **a** and **a**");
    let table = OffsetTable::new(&block);
    let first = table.map_range(clean_range(&block, "**a**", 0)).unwrap();
    let second = table.map_range(clean_range(&block, "**a**", 1)).unwrap();
    assert_eq!(first, DocRange::on_line(0, 3, 8));
    assert_eq!(second, DocRange::on_line(0, 13, 18));
}

#[test]
fn table_skips_stripped_prefixes() {
    let text = "/**\n * first **x**\n * second\n */";
    let block = first_block(LanguageId::Java, text);
    let table = OffsetTable::new(&block);

    let bold = table.map_range(clean_range(&block, "**x**", 0)).unwrap();
    assert_eq!(bold, DocRange::on_line(1, 9, 14));

    let second = table.map_range(clean_range(&block, "second", 0)).unwrap();
    assert_eq!(second, DocRange::on_line(2, 3, 9));
}

#[test]
fn table_spans_lines() {
    let text = "/*\n * ab\n * cd\n */";
    let block = first_block(LanguageId::C, text);
    let table = OffsetTable::new(&block);
    let start = block.clean_text.find("ab").unwrap();
    let end = block.clean_text.find("cd").unwrap() + 2;
    let range = table.map_range(start..end).unwrap();
    assert_eq!(range.start, Position::new(1, 3));
    assert_eq!(range.end, Position::new(2, 5));
}

#[test]
fn table_counts_chars_not_bytes() {
    let block = first_block(LanguageId::Rust, "// ünïcödé **b**");
    let table = OffsetTable::new(&block);
    let range = table.map_range(clean_range(&block, "**b**", 0)).unwrap();
    assert_eq!(range, DocRange::on_line(0, 11, 16));
}

#[test]
fn table_rejects_out_of_range() {
    let block = first_block(LanguageId::Rust, "// abc");
    let table = OffsetTable::new(&block);
    assert!(table.map_range(0..10).is_none());
    assert!(table.map_offset(3).is_some());
    assert!(table.map_offset(4).is_none());
}

// ---------------------------------------------------------------------------
// Search mapper
// ---------------------------------------------------------------------------

#[test]
fn search_uses_occurrence_index() {
    let block = first_block(LanguageId::Rust, "// **a** and **a**");
    let search = SearchMapper::new(&block);
    let second = search.map_range(clean_range(&block, "**a**", 1)).unwrap();
    assert_eq!(second, DocRange::on_line(0, 13, 18));
}

#[test]
fn search_agrees_with_table_on_simple_blocks() {
    let text = "/*\n * # Title\n * - item **b**\n */";
    let block = first_block(LanguageId::C, text);
    let table = OffsetTable::new(&block);
    let search = SearchMapper::new(&block);
    for needle in ["# ", "Title", "- ", "**b**"] {
        let range = clean_range(&block, needle, 0);
        assert_eq!(
            search.map_range(range.clone()),
            table.map_range(range),
            "{needle}"
        );
    }
}

#[test]
fn search_reports_not_found_across_stripped_prefix() {
    let text = "/*\n * ab\n * cd\n */";
    let block = first_block(LanguageId::C, text);
    let search = SearchMapper::new(&block);
    let start = block.clean_text.find("ab").unwrap();
    let end = block.clean_text.find("cd").unwrap() + 2;
    // "ab\ncd" does not occur verbatim in the raw text.
    assert!(search.map_range(start..end).is_none());
    assert!(search.map_range(0..0).is_none());
}

#[test]
fn strategy_builds_matching_mapper() {
    let block = first_block(LanguageId::Rust, "// x **y**");
    let range = clean_range(&block, "**y**", 0);
    let expected = Some(DocRange::on_line(0, 5, 10));
    assert_eq!(MappingStrategy::Table.mapper(&block).map_range(range.clone()), expected);
    assert_eq!(MappingStrategy::Search.mapper(&block).map_range(range), expected);
}
