use super::*;
use crate::block::{DocRange, Position};
use crate::overlay::OverlayInstruction;

fn seg(text: &str, categories: &[Category]) -> PaintedSegment {
    PaintedSegment {
        text: text.to_string(),
        categories: categories.to_vec(),
    }
}

#[test]
fn hide_and_insert_replace_markers() {
    let lines = ["a **b** c"];
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(DocRange::on_line(0, 2, 7), Category::Hide));
    set.push(
        OverlayInstruction::new(DocRange::point(Position::new(0, 2)), Category::Bold).with_text("b"),
    );

    let painted = paint(&lines, &set);
    assert_eq!(painted[0].plain_text(), "a b c");
    assert_eq!(
        painted[0].segments,
        vec![
            seg("a ", &[]),
            seg("b", &[Category::Bold]),
            seg(" c", &[]),
        ]
    );
}

#[test]
fn style_ranges_mark_characters() {
    let lines = vec!["## Title".to_string()];
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(DocRange::on_line(0, 0, 3), Category::Hide));
    set.push(OverlayInstruction::new(DocRange::on_line(0, 3, 8), Category::Header2));

    let painted = paint(&lines, &set);
    assert_eq!(painted[0].segments, vec![seg("Title", &[Category::Header2])]);
}

#[test]
fn whole_line_sets_background() {
    let lines = ["```", "let x", "```"];
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(DocRange::on_line(1, 0, 5), Category::CodeBlock).whole_line());

    let painted = paint(&lines, &set);
    assert_eq!(painted[1].background, Some(Category::CodeBlock));
    assert_eq!(painted[1].plain_text(), "let x");
    assert_eq!(painted[0].background, None);
}

#[test]
fn multi_line_ranges_cover_interior_lines() {
    let lines = ["ab", "cd", "ef"];
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(
        DocRange::new(Position::new(0, 1), Position::new(2, 1)),
        Category::Italic,
    ));

    let painted = paint(&lines, &set);
    assert_eq!(painted[0].segments, vec![seg("a", &[]), seg("b", &[Category::Italic])]);
    assert_eq!(painted[1].segments, vec![seg("cd", &[Category::Italic])]);
    assert_eq!(painted[2].segments, vec![seg("e", &[Category::Italic]), seg("f", &[])]);
}

#[test]
fn out_of_range_instructions_are_ignored() {
    let lines = ["é"];
    let mut set = OverlaySet::empty();
    set.push(OverlayInstruction::new(DocRange::on_line(4, 0, 1), Category::Hide));
    set.push(OverlayInstruction::new(DocRange::on_line(0, 0, 9), Category::Bold));
    set.push(
        OverlayInstruction::new(DocRange::point(Position::new(0, 9)), Category::Link).with_text("!"),
    );

    let painted = paint(&lines, &set);
    assert_eq!(painted.len(), 1);
    assert_eq!(
        painted[0].segments,
        vec![seg("é", &[Category::Bold]), seg("!", &[Category::Link])]
    );
}
