use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::emit::DEFAULT_RULE_WIDTH;
use crate::mapping::MappingStrategy;
use crate::theme::ThemeMode;

const SETTINGS_DIR: &str = ".commentmd";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_rule_width")]
    pub rule_width: usize,
    #[serde(default)]
    pub mapping: MappingStrategy,
    #[serde(default = "default_true")]
    pub highlight_code_blocks: bool,
    /// Extra or overriding comment syntaxes, matched by language id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageOverride>,
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: ThemeMode::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            rule_width: DEFAULT_RULE_WIDTH,
            mapping: MappingStrategy::default(),
            highlight_code_blocks: true,
            languages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOverride {
    pub id: String,
    #[serde(default)]
    pub line: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_end: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_rule_width() -> usize {
    DEFAULT_RULE_WIDTH
}

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
    NoSettingsDir,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(path, err) => {
                write!(f, "Cannot read settings {}: {}", path.display(), err)
            }
            SettingsError::Parse(path, err) => {
                write!(f, "Invalid settings {}: {}", path.display(), err)
            }
            SettingsError::NoSettingsDir => write!(f, "Cannot determine settings directory"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(_, err) => Some(err),
            SettingsError::Parse(_, err) => Some(err),
            SettingsError::NoSettingsDir => None,
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoSettingsDir)?;
    write_default_settings(&path)?;
    Ok(path)
}

/// Write defaults to `path` unless a file is already there.
pub fn write_default_settings(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|err| SettingsError::Io(parent.to_path_buf(), err))?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content).map_err(|err| SettingsError::Io(path.to_path_buf(), err))?;
    }
    Ok(())
}

/// Settings from the default location; `None` if absent or unreadable.
pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    match load_settings_from(&path) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::debug!(error = %err, "settings not loaded");
            None
        }
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| SettingsError::Io(path.to_path_buf(), err))?;
    serde_json::from_str(&data).map_err(|err| SettingsError::Parse(path.to_path_buf(), err))
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
