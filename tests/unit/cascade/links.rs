use super::*;

fn run(text: &str) -> Vec<MdMatch> {
    let (mut matches, zones) = ImagePass.run(text, ExclusionZones::default());
    matches.extend(LinkPass.run(text, zones).0);
    matches
}

#[test]
fn link_renders_label_and_keeps_url() {
    let text = "see [docs](https://x.dev/a) now";
    let matches = run(text);
    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.kind, MatchKind::Link);
    assert_eq!(&text[m.range.clone()], "[docs](https://x.dev/a)");
    assert_eq!(m.rendered, "docs");
    assert_eq!(m.hints.url.as_deref(), Some("https://x.dev/a"));
    assert!(m.hints.underline);
}

#[test]
fn image_is_not_also_a_link() {
    let text = "![logo](img/logo.png)";
    let matches = run(text);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Image);
    assert_eq!(matches[0].range, 0..text.len());
    assert_eq!(matches[0].rendered, format!("{IMAGE_GLYPH} logo"));
    assert_eq!(matches[0].hints.url.as_deref(), Some("img/logo.png"));
}

#[test]
fn image_without_alt_gets_placeholder() {
    let matches = run("![](a.png)");
    assert_eq!(matches[0].rendered, format!("{IMAGE_GLYPH} image"));
}

#[test]
fn link_pass_alone_leaves_images_raw() {
    let (matches, _) = LinkPass.run("![logo](img.png)", ExclusionZones::default());
    assert!(matches.is_empty());
}

#[test]
fn title_after_url_is_allowed() {
    let matches = run(r#"[a](u "title")"#);
    assert_eq!(matches[0].hints.url.as_deref(), Some("u"));
}

#[test]
fn brackets_without_target_are_literal() {
    assert!(run("[x] and [y] (z)").is_empty());
    assert!(run("[](empty-label)").is_empty());
}

#[test]
fn links_do_not_span_lines() {
    assert!(run("[a\nb](u)").is_empty());
}

#[test]
fn claimed_text_is_skipped() {
    let mut zones = ExclusionZones::default();
    let code = MdMatch {
        kind: MatchKind::InlineCode,
        range: 0..12,
        content: 1..11,
        rendered: "[a](b) [c]".into(),
        hints: StyleHints::default(),
    };
    assert!(zones.try_claim(&code));
    let (matches, _) = LinkPass.run("`[a](b) [c]` [d](e)", zones);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].rendered, "d");
}
