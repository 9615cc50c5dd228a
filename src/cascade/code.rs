//! Pattern-based token highlighting inside fenced code blocks. This is the
//! only pass allowed to match inside fence zones.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ColorClass, ExclusionZones, MarkdownPass, MatchKind, MdMatch, StyleHints, TokenClass};

static C_LIKE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<comment>//[^\n]*|/\*[^\n]*?\*/)|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)'|`[^`\n]*`)"#,
    )
    .unwrap()
});
static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<comment>//[^\n]*|/\*[^\n]*?\*/)|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`[^`\n]*`)"#,
    )
    .unwrap()
});
static HASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<comment>#[^\n]*)|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#)
        .unwrap()
});
static DASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<comment>--[^\n]*)|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#)
        .unwrap()
});
static PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?P<string>"(?:[^"\\\n]|\\.)*")"#).unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b")
        .unwrap()
});

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "False", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True", "try", "while",
    "with", "yield",
];
const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "do", "else", "export", "extends", "false", "finally", "for", "from", "function",
    "if", "import", "in", "instanceof", "interface", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "type", "typeof", "undefined",
    "var", "void", "while", "yield",
];
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "false", "for", "func", "go", "goto", "if", "import", "interface", "map", "nil", "package",
    "range", "return", "select", "struct", "switch", "true", "type", "var",
];
const C_KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "catch", "char", "class", "const", "continue", "default",
    "delete", "do", "double", "else", "enum", "extends", "false", "final", "float", "for", "if",
    "implements", "import", "int", "interface", "long", "namespace", "new", "null", "nullptr",
    "package", "private", "protected", "public", "return", "short", "signed", "sizeof",
    "static", "struct", "switch", "template", "this", "throw", "true", "try", "typedef",
    "union", "unsigned", "using", "virtual", "void", "volatile", "while",
];
const SHELL_KEYWORDS: &[&str] = &[
    "case", "do", "done", "echo", "elif", "else", "esac", "exit", "export", "fi", "for",
    "function", "if", "in", "local", "return", "then", "until", "while",
];
const SQL_KEYWORDS: &[&str] = &[
    "and", "as", "by", "create", "delete", "from", "group", "having", "insert", "into", "join",
    "left", "limit", "not", "null", "on", "or", "order", "select", "set", "table", "update",
    "values", "where", "AND", "AS", "BY", "CREATE", "DELETE", "FROM", "GROUP", "HAVING",
    "INSERT", "INTO", "JOIN", "LEFT", "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER", "SELECT",
    "SET", "TABLE", "UPDATE", "VALUES", "WHERE",
];
const GENERIC_KEYWORDS: &[&str] = &[
    "break", "class", "const", "continue", "else", "false", "for", "function", "if", "import",
    "let", "null", "return", "true", "var", "while",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    CLike,
    Script,
    Hash,
    Dash,
    Plain,
}

fn family_for(lang: Option<&str>) -> (Family, &'static [&'static str]) {
    let lang = lang.map(|l| l.to_ascii_lowercase());
    match lang.as_deref() {
        Some("rust" | "rs") => (Family::CLike, RUST_KEYWORDS),
        Some("c" | "cpp" | "c++" | "h" | "hpp" | "java" | "csharp" | "cs" | "kotlin" | "scala") => {
            (Family::CLike, C_KEYWORDS)
        }
        Some("go" | "golang") => (Family::CLike, GO_KEYWORDS),
        Some(
            "js" | "javascript" | "jsx" | "ts" | "typescript" | "tsx" | "php" | "dart" | "swift",
        ) => (Family::Script, JS_KEYWORDS),
        Some("py" | "python") => (Family::Hash, PYTHON_KEYWORDS),
        Some("sh" | "bash" | "zsh" | "shell" | "console") => (Family::Hash, SHELL_KEYWORDS),
        Some("rb" | "ruby" | "yaml" | "yml" | "toml" | "perl" | "r") => {
            (Family::Hash, GENERIC_KEYWORDS)
        }
        Some("sql" | "lua" | "haskell" | "hs") => (Family::Dash, SQL_KEYWORDS),
        Some("json" | "text" | "txt") => (Family::Plain, &[]),
        _ => (Family::Plain, GENERIC_KEYWORDS),
    }
}

fn family_regex(family: Family) -> &'static Regex {
    match family {
        Family::CLike => &C_LIKE_RE,
        Family::Script => &SCRIPT_RE,
        Family::Hash => &HASH_RE,
        Family::Dash => &DASH_RE,
        Family::Plain => &PLAIN_RE,
    }
}

/// Classify the tokens of a code body. Ranges are relative to `body`.
pub fn tokenize(lang: Option<&str>, body: &str) -> Vec<(Range<usize>, TokenClass)> {
    let (family, keywords) = family_for(lang);
    let mut tokens: Vec<(Range<usize>, TokenClass)> = Vec::new();

    for caps in family_regex(family).captures_iter(body) {
        if let Some(m) = caps.name("comment") {
            tokens.push((m.range(), TokenClass::Comment));
        } else if let Some(m) = caps.name("string") {
            tokens.push((m.range(), TokenClass::String));
        }
    }

    let claimed = tokens.clone();
    let free = |range: &Range<usize>| {
        !claimed
            .iter()
            .any(|(r, _)| range.start < r.end && r.start < range.end)
    };

    for m in WORD_RE.find_iter(body) {
        if keywords.contains(&m.as_str()) && free(&m.range()) {
            tokens.push((m.range(), TokenClass::Keyword));
        }
    }
    for m in NUMBER_RE.find_iter(body) {
        if free(&m.range()) {
            tokens.push((m.range(), TokenClass::Number));
        }
    }

    tokens.sort_by_key(|(range, _)| range.start);
    tokens
}

pub struct CodeTokenPass;

impl MarkdownPass for CodeTokenPass {
    fn name(&self) -> &'static str {
        "code-tokens"
    }

    fn run(&self, text: &str, zones: ExclusionZones) -> (Vec<MdMatch>, ExclusionZones) {
        let mut matches = Vec::new();

        for fence in zones.fences() {
            let Some(body) = text.get(fence.body.clone()) else {
                continue;
            };
            for (range, class) in tokenize(fence.lang.as_deref(), body) {
                let range = fence.body.start + range.start..fence.body.start + range.end;
                let color_class = match class {
                    TokenClass::Keyword => ColorClass::Keyword,
                    TokenClass::String => ColorClass::String,
                    TokenClass::Comment => ColorClass::Comment,
                    TokenClass::Number => ColorClass::Number,
                };
                matches.push(MdMatch {
                    kind: MatchKind::CodeToken(class),
                    rendered: text[range.clone()].to_string(),
                    content: range.clone(),
                    range,
                    hints: StyleHints {
                        bold: class == TokenClass::Keyword,
                        italic: class == TokenClass::Comment,
                        color_class: Some(color_class),
                        ..StyleHints::default()
                    },
                });
            }
        }

        (matches, zones)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cascade/code.rs"]
mod tests;
