use super::*;

fn run(text: &str) -> Vec<MdMatch> {
    HeaderPass.run(text, ExclusionZones::default()).0
}

#[test]
fn levels_do_not_cross_match() {
    let text = "## H2\n### H3\n# H1";
    let matches = run(text);
    let levels: Vec<MatchKind> = matches.iter().map(|m| m.kind).collect();
    assert_eq!(
        levels,
        vec![MatchKind::Header(2), MatchKind::Header(3), MatchKind::Header(1)]
    );
    assert_eq!(matches[0].rendered, "H2");
    assert_eq!(matches[1].hidden(), Some(6..10));
}

#[test]
fn level_seven_is_the_deepest() {
    let matches = run("####### seven");
    assert_eq!(matches[0].kind, MatchKind::Header(MAX_LEVEL));
    assert!(run("######## eight").is_empty());
}

#[test]
fn marker_needs_following_space_and_text() {
    assert!(run("#nospace").is_empty());
    assert!(run("#").is_empty());
    assert!(run("##   ").is_empty());
}

#[test]
fn trailing_space_is_not_content() {
    let text = "## Title  ";
    let m = &run(text)[0];
    assert_eq!(&text[m.content.clone()], "Title");
    assert_eq!(m.range, 0..8);
}

#[test]
fn indented_header_hides_from_marker() {
    let text = "  ### Deep";
    let m = &run(text)[0];
    assert_eq!(m.hidden(), Some(2..6));
    assert!(m.hints.bold);
}

#[test]
fn hash_mid_line_is_not_a_header() {
    assert!(run("issue # 12").is_empty());
}
