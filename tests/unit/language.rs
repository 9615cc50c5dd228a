use super::*;
use crate::settings::LanguageOverride;
use std::path::Path;

#[test]
fn from_path_maps_common_extensions() {
    let cases = [
        ("a.rs", Some(LanguageId::Rust)),
        ("a.py", Some(LanguageId::Python)),
        ("a.tsx", Some(LanguageId::Tsx)),
        ("a.h", Some(LanguageId::Cpp)),
        ("a.lua", Some(LanguageId::Lua)),
        ("a.ps1", Some(LanguageId::PowerShell)),
        ("README.md", Some(LanguageId::Markdown)),
        ("a.MD", Some(LanguageId::Markdown)),
        ("a.unknown", None),
        ("Makefile", None),
    ];
    for (path, expected) in cases {
        assert_eq!(LanguageId::from_path(Path::new(path)), expected, "{path}");
    }
}

#[test]
fn from_id_round_trips_language_id() {
    let langs = [
        LanguageId::Rust,
        LanguageId::Python,
        LanguageId::Jsx,
        LanguageId::Tsx,
        LanguageId::Shell,
        LanguageId::Markdown,
        LanguageId::Haskell,
    ];
    for lang in langs {
        assert_eq!(LanguageId::from_id(lang.language_id()), Some(lang));
    }
    assert_eq!(LanguageId::from_id("  RUST "), Some(LanguageId::Rust));
    assert_eq!(LanguageId::from_id("brainfuck"), None);
}

#[test]
fn c_family_uses_slash_markers() {
    let syntax = LanguageId::Java.comment_syntax();
    assert_eq!(syntax.line_markers, vec![CompactString::new("//")]);
    assert_eq!(syntax.block_markers.len(), 1);
    assert_eq!(syntax.block_markers[0].start.as_str(), "/*");
    assert_eq!(syntax.block_markers[0].end.as_str(), "*/");
    assert!(!syntax.document);
}

#[test]
fn python_has_hash_and_docstrings() {
    let syntax = LanguageId::Python.comment_syntax();
    assert_eq!(syntax.line_markers, vec![CompactString::new("#")]);
    let starts: Vec<&str> = syntax.block_markers.iter().map(|m| m.start.as_str()).collect();
    assert_eq!(starts, vec!["\"\"\"", "'''"]);
}

#[test]
fn markdown_is_document_mode() {
    assert!(LanguageId::Markdown.comment_syntax().document);
}

#[test]
fn resolve_falls_back_to_generic() {
    let table = SyntaxTable::default();
    let syntax = table.resolve("plaintext");
    assert_eq!(syntax, CommentSyntax::generic());
    assert_eq!(syntax.line_markers.len(), 2);
}

#[test]
fn overrides_take_precedence() {
    let table = SyntaxTable::new(&[
        LanguageOverride {
            id: "Rust".to_string(),
            line: vec![";;".to_string()],
            block_start: None,
            block_end: None,
        },
        LanguageOverride {
            id: "nim".to_string(),
            line: vec!["#".to_string()],
            block_start: Some("#[".to_string()),
            block_end: Some("]#".to_string()),
        },
        LanguageOverride {
            id: "  ".to_string(),
            line: vec!["x".to_string()],
            block_start: None,
            block_end: None,
        },
    ]);

    let rust = table.resolve("rust");
    assert_eq!(rust.line_markers, vec![CompactString::new(";;")]);
    assert!(rust.block_markers.is_empty());

    let nim = table.resolve("nim");
    assert_eq!(nim.block_markers[0].start.as_str(), "#[");
    assert_eq!(nim.block_markers[0].end.as_str(), "]#");

    // Untouched languages still come from the built-in table.
    assert_eq!(table.resolve("go"), LanguageId::Go.comment_syntax());
}
