use super::*;
use tempfile::tempdir;

fn write(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(SETTINGS_FILE);
    std::fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn empty_object_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "{}");
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings, Settings::default());
    assert!(settings.enabled);
    assert!(settings.highlight_code_blocks);
    assert_eq!(settings.debounce(), Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    assert_eq!(settings.rule_width, DEFAULT_RULE_WIDTH);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        r#"{ "theme": "light", "debounce_ms": 50, "mapping": "search" }"#,
    );
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.theme, ThemeMode::Light);
    assert_eq!(settings.debounce(), Duration::from_millis(50));
    assert_eq!(settings.mapping, MappingStrategy::Search);
    assert!(settings.enabled);
}

#[test]
fn language_overrides_parse() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        r##"{ "languages": [ { "id": "nim", "line": ["#"], "block_start": "#[", "block_end": "]#" } ] }"##,
    );
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(
        settings.languages,
        vec![LanguageOverride {
            id: "nim".into(),
            line: vec!["#".into()],
            block_start: Some("#[".into()),
            block_end: Some("]#".into()),
        }]
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_settings_from(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(..)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn invalid_json_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), r#"{ "theme": "sepia" }"#);
    let err = load_settings_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(..)));
    assert!(err.to_string().starts_with("Invalid settings"));
}

// ---------------------------------------------------------------------------
// Default file
// ---------------------------------------------------------------------------

#[test]
fn default_file_is_created_with_parents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_DIR).join(SETTINGS_FILE);
    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap(), Settings::default());
}

#[test]
fn existing_file_is_not_overwritten() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), r#"{ "enabled": false }"#);
    write_default_settings(&path).unwrap();
    assert!(!load_settings_from(&path).unwrap().enabled);
}
