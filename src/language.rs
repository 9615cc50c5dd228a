//! Language identifiers and their comment marker table.

use std::path::Path;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::settings::LanguageOverride;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageId {
    C,
    Cpp,
    CSharp,
    Java,
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Rust,
    Go,
    Swift,
    Kotlin,
    Scala,
    Dart,
    Php,
    Css,
    Python,
    Ruby,
    Shell,
    Yaml,
    Toml,
    Perl,
    R,
    PowerShell,
    Lua,
    Sql,
    Haskell,
    Html,
    Xml,
    Markdown,
}

impl LanguageId {
    /// Resolve a host language identifier (`"rust"`, `"typescriptreact"`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let lang = match id.as_str() {
            "c" => Self::C,
            "cpp" | "c++" | "cuda-cpp" | "objective-c" | "objective-cpp" => Self::Cpp,
            "csharp" | "c#" => Self::CSharp,
            "java" => Self::Java,
            "javascript" => Self::JavaScript,
            "typescript" => Self::TypeScript,
            "javascriptreact" | "jsx" => Self::Jsx,
            "typescriptreact" | "tsx" => Self::Tsx,
            "rust" => Self::Rust,
            "go" => Self::Go,
            "swift" => Self::Swift,
            "kotlin" => Self::Kotlin,
            "scala" => Self::Scala,
            "dart" => Self::Dart,
            "php" => Self::Php,
            "css" | "scss" | "less" => Self::Css,
            "python" => Self::Python,
            "ruby" => Self::Ruby,
            "shellscript" | "shell" | "bash" | "sh" | "zsh" => Self::Shell,
            "yaml" => Self::Yaml,
            "toml" => Self::Toml,
            "perl" => Self::Perl,
            "r" => Self::R,
            "powershell" => Self::PowerShell,
            "lua" => Self::Lua,
            "sql" => Self::Sql,
            "haskell" => Self::Haskell,
            "html" => Self::Html,
            "xml" => Self::Xml,
            "markdown" => Self::Markdown,
            _ => return None,
        };
        Some(lang)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase();
        let lang = match ext.as_str() {
            "c" => Self::C,
            "cc" | "cpp" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" | "h" | "m" | "mm" => {
                Self::Cpp
            }
            "cs" => Self::CSharp,
            "java" => Self::Java,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "mts" | "cts" => Self::TypeScript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "rs" => Self::Rust,
            "go" => Self::Go,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "scala" | "sc" => Self::Scala,
            "dart" => Self::Dart,
            "php" => Self::Php,
            "css" | "scss" | "less" => Self::Css,
            "py" | "pyi" => Self::Python,
            "rb" => Self::Ruby,
            "sh" | "bash" | "zsh" => Self::Shell,
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            "pl" | "pm" => Self::Perl,
            "r" => Self::R,
            "ps1" | "psm1" => Self::PowerShell,
            "lua" => Self::Lua,
            "sql" => Self::Sql,
            "hs" => Self::Haskell,
            "html" | "htm" => Self::Html,
            "xml" | "xsl" | "svg" => Self::Xml,
            "md" | "markdown" | "mdx" => Self::Markdown,
            _ => return None,
        };
        Some(lang)
    }

    pub fn language_id(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Jsx => "javascriptreact",
            Self::Tsx => "typescriptreact",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Scala => "scala",
            Self::Dart => "dart",
            Self::Php => "php",
            Self::Css => "css",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Shell => "shellscript",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Perl => "perl",
            Self::R => "r",
            Self::PowerShell => "powershell",
            Self::Lua => "lua",
            Self::Sql => "sql",
            Self::Haskell => "haskell",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Markdown => "markdown",
        }
    }

    pub fn comment_syntax(self) -> CommentSyntax {
        match self {
            Self::C
            | Self::Cpp
            | Self::CSharp
            | Self::Java
            | Self::JavaScript
            | Self::TypeScript
            | Self::Jsx
            | Self::Tsx
            | Self::Rust
            | Self::Go
            | Self::Swift
            | Self::Kotlin
            | Self::Scala
            | Self::Dart
            | Self::Php => CommentSyntax::new(&["//"], &[("/*", "*/")]),
            Self::Css => CommentSyntax::new(&[], &[("/*", "*/")]),
            Self::Python => CommentSyntax::new(&["#"], &[("\"\"\"", "\"\"\""), ("'''", "'''")]),
            Self::Ruby | Self::Shell | Self::Yaml | Self::Toml | Self::Perl | Self::R => {
                CommentSyntax::new(&["#"], &[])
            }
            Self::PowerShell => CommentSyntax::new(&["#"], &[("<#", "#>")]),
            Self::Lua => CommentSyntax::new(&["--"], &[("--[[", "]]")]),
            Self::Sql => CommentSyntax::new(&["--"], &[("/*", "*/")]),
            Self::Haskell => CommentSyntax::new(&["--"], &[("{-", "-}")]),
            Self::Html | Self::Xml => CommentSyntax::new(&[], &[("<!--", "-->")]),
            Self::Markdown => CommentSyntax::document(),
        }
    }
}

/// A start/end pair delimiting a block comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMarkers {
    pub start: CompactString,
    pub end: CompactString,
}

impl BlockMarkers {
    /// Only C-style blocks use ` * ` as a decorative line prefix. Anywhere
    /// else a leading `* ` is a markdown bullet.
    pub fn strips_star_prefix(&self) -> bool {
        self.start.as_str() == "/*"
    }
}

/// Comment markers for one language.
///
/// `document` languages (markdown) bypass comment extraction entirely: the
/// whole file is one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntax {
    pub line_markers: Vec<CompactString>,
    pub block_markers: Vec<BlockMarkers>,
    pub document: bool,
}

impl CommentSyntax {
    pub fn new(line: &[&str], block: &[(&str, &str)]) -> Self {
        Self {
            line_markers: line.iter().map(|m| CompactString::new(m)).collect(),
            block_markers: block
                .iter()
                .map(|(start, end)| BlockMarkers {
                    start: CompactString::new(start),
                    end: CompactString::new(end),
                })
                .collect(),
            document: false,
        }
    }

    pub fn document() -> Self {
        Self {
            line_markers: Vec::new(),
            block_markers: Vec::new(),
            document: true,
        }
    }

    /// Fallback for unrecognized languages: `//`, `#` and `/* */`.
    pub fn generic() -> Self {
        Self::new(&["//", "#"], &[("/*", "*/")])
    }
}

/// Language id → comment syntax, with user overrides taking precedence over
/// the built-in table.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTable {
    overrides: Vec<(CompactString, CommentSyntax)>,
}

impl SyntaxTable {
    pub fn new(overrides: &[LanguageOverride]) -> Self {
        let overrides = overrides
            .iter()
            .filter(|o| !o.id.trim().is_empty())
            .map(|o| {
                let line: Vec<&str> = o.line.iter().map(|m| m.as_str()).collect();
                let block: Vec<(&str, &str)> = match (&o.block_start, &o.block_end) {
                    (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                        vec![(start.as_str(), end.as_str())]
                    }
                    _ => Vec::new(),
                };
                (
                    CompactString::new(o.id.trim().to_ascii_lowercase()),
                    CommentSyntax::new(&line, &block),
                )
            })
            .collect();
        Self { overrides }
    }

    pub fn resolve(&self, language_id: &str) -> CommentSyntax {
        let key = language_id.trim().to_ascii_lowercase();
        if let Some((_, syntax)) = self.overrides.iter().find(|(id, _)| id.as_str() == key) {
            return syntax.clone();
        }
        match LanguageId::from_id(&key) {
            Some(lang) => lang.comment_syntax(),
            None => {
                tracing::debug!(language = %key, "unrecognized language, using generic markers");
                CommentSyntax::generic()
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/language.rs"]
mod tests;
