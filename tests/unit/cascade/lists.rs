use super::*;

fn tasks(text: &str) -> Vec<MdMatch> {
    TaskPass.run(text, ExclusionZones::default()).0
}

fn lists(text: &str) -> Vec<MdMatch> {
    ListPass.run(text, ExclusionZones::default()).0
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[test]
fn checked_state_is_case_insensitive() {
    let matches = tasks("- [x] lower\n- [X] upper\n- [ ] open");
    let checked: Vec<Option<bool>> = matches.iter().map(|m| m.hints.checked).collect();
    assert_eq!(checked, vec![Some(true), Some(true), Some(false)]);
    assert_eq!(matches[0].kind, MatchKind::Task { checked: true });
    assert_eq!(matches[2].kind, MatchKind::Task { checked: false });
    assert_eq!(matches[0].rendered, CHECKED_GLYPH);
    assert_eq!(matches[2].rendered, UNCHECKED_GLYPH);
}

#[test]
fn task_hides_marker_and_box_only() {
    let text = "- [x] done";
    let m = &tasks(text)[0];
    assert_eq!(m.range, 0..10);
    assert_eq!(m.hidden(), Some(0..6));
    assert_eq!(&text[m.content.clone()], "done");
    assert!(m.hints.strike);
    assert!(m.hints.collapse_residual);
}

#[test]
fn indented_task_keeps_residual() {
    let text = "  * [ ] nested";
    let m = &tasks(text)[0];
    assert_eq!(m.hidden(), Some(2..8));
    assert!(!m.hints.collapse_residual);
    assert!(!m.hints.strike);
}

#[test]
fn task_without_text() {
    let m = &tasks("- [x]")[0];
    assert!(m.content.is_empty());
    assert_eq!(m.hidden(), Some(0..5));
}

#[test]
fn brackets_mid_line_are_not_tasks() {
    assert!(tasks("see - [x] here").is_empty());
    assert!(tasks("-[x] tight").is_empty());
}

// ---------------------------------------------------------------------------
// Bullets
// ---------------------------------------------------------------------------

#[test]
fn bullets_pick_glyph_by_indent() {
    let text = "- one\n  - two\n* three\n+ four";
    let matches = lists(text);
    let rendered: Vec<&str> = matches.iter().map(|m| m.rendered.as_str()).collect();
    assert_eq!(
        rendered,
        vec![BULLET_GLYPH, NESTED_BULLET_GLYPH, BULLET_GLYPH, BULLET_GLYPH]
    );

    assert_eq!(matches[1].hidden(), Some(8..10));
    assert_eq!(&text[matches[1].content.clone()], "two");
    assert!(matches[0].hints.collapse_residual);
    assert!(!matches[1].hints.collapse_residual);
}

#[test]
fn decorative_star_lines_are_not_bullets() {
    assert!(lists("*").is_empty());
    assert!(lists("*   ").is_empty());
    assert!(lists("-").is_empty());
}

#[test]
fn bold_at_line_start_is_not_a_bullet() {
    assert!(lists("**bold** start").is_empty());
    assert!(lists("-not a bullet").is_empty());
}

// ---------------------------------------------------------------------------
// Numbered
// ---------------------------------------------------------------------------

#[test]
fn numbered_items_keep_their_number() {
    let text = "1. first\n10) tenth";
    let matches = lists(text);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].kind, MatchKind::Numbered);
    assert_eq!(matches[0].rendered, "1. ");
    assert_eq!(matches[0].hidden(), Some(0..3));
    assert_eq!(matches[1].rendered, "10. ");
    assert_eq!(&text[matches[1].content.clone()], "tenth");
}

#[test]
fn version_numbers_are_not_items() {
    assert!(lists("1.2 release").is_empty());
    assert!(lists("3.").is_empty());
}

#[test]
fn bullets_and_numbers_sorted_together() {
    let matches = lists("1. a\n- b\n2. c");
    let kinds: Vec<MatchKind> = matches.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![MatchKind::Numbered, MatchKind::Bullet, MatchKind::Numbered]
    );
}
