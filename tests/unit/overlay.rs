use super::*;

fn at(line: usize, start: usize, end: usize, category: Category) -> OverlayInstruction {
    OverlayInstruction::new(DocRange::on_line(line, start, end), category)
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[test]
fn names_round_trip() {
    for category in Category::ALL {
        assert_eq!(Category::from_name(category.as_str()), Some(category));
        assert_eq!(category.to_string(), category.as_str());
    }
    assert_eq!(Category::from_name("header8"), None);
}

#[test]
fn serde_uses_host_names() {
    assert_eq!(
        serde_json::to_string(&Category::SyntaxKeyword).unwrap(),
        "\"syntax-keyword\""
    );
    assert_eq!(
        serde_json::to_string(&Category::TaskDoneText).unwrap(),
        "\"taskDoneText\""
    );
}

#[test]
fn header_levels_clamp() {
    assert_eq!(Category::header(0), Category::Header1);
    assert_eq!(Category::header(3), Category::Header3);
    assert_eq!(Category::header(9), Category::Header7);
    assert_eq!(Category::Header5.header_level(), Some(5));
    assert_eq!(Category::Bold.header_level(), None);
}

// ---------------------------------------------------------------------------
// OverlaySet
// ---------------------------------------------------------------------------

#[test]
fn empty_set_has_every_category() {
    let set = OverlaySet::empty();
    assert_eq!(set.categories().count(), Category::ALL.len());
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.get(Category::Link).is_empty());
}

#[test]
fn push_buckets_by_category() {
    let mut set = OverlaySet::empty();
    set.push(at(0, 0, 2, Category::Hide));
    set.push(at(0, 2, 2, Category::Bold).with_text("b"));
    assert_eq!(set.len(), 2);
    assert_eq!(set.get(Category::Hide).len(), 1);
    assert_eq!(
        set.get(Category::Bold)[0].inserted_text.as_deref(),
        Some("b")
    );
}

#[test]
fn normalize_sorts_and_dedups() {
    let mut set = OverlaySet::empty();
    set.push(at(2, 0, 1, Category::Hide));
    set.push(at(0, 4, 5, Category::Hide));
    set.push(at(0, 4, 5, Category::Hide));
    set.normalize();
    let hides = set.get(Category::Hide);
    assert_eq!(hides.len(), 2);
    assert_eq!(hides[0].range.start.line, 0);
    assert_eq!(hides[1].range.start.line, 2);
}

#[test]
fn filtered_keeps_all_categories() {
    let mut set = OverlaySet::empty();
    set.push(at(0, 0, 1, Category::Hide));
    set.push(at(5, 0, 1, Category::Italic));
    let kept = set.filtered(|i| i.range.start.line < 3);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept.categories().count(), Category::ALL.len());
    assert_eq!(set.len(), 2);
}

#[test]
fn optional_fields_are_omitted_from_json() {
    let plain = serde_json::to_value(at(0, 0, 1, Category::Hide)).unwrap();
    assert!(plain.get("inserted_text").is_none());
    assert!(plain.get("whole_line").is_none());

    let glyph = at(0, 0, 0, Category::Bullet).with_text("• ").collapsing(true);
    let value = serde_json::to_value(glyph).unwrap();
    assert_eq!(value["inserted_text"], "• ");
    assert_eq!(value["collapse_residual"], true);
}

#[test]
fn set_serializes_category_names_as_keys() {
    let mut set = OverlaySet::empty();
    set.push(at(1, 0, 3, Category::Header2));
    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(value["buckets"]["header2"].as_array().map(Vec::len), Some(1));
    assert!(value["buckets"]["syntax-number"].as_array().is_some());

    let json = serde_json::to_string(&set).unwrap();
    let back: OverlaySet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}
