//! Light/dark palettes and the per-category style sheet.
//!
//! The emitter resolves a [`ThemeContext`] once per render pass; nothing else
//! looks at the theme mode.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::overlay::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// 24-bit color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s).ok_or_else(|| format!("invalid color: {s}"))
    }
}

/// Presentation for one category, as handed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub dim: bool,
    /// Relative font scale, only meaningful for headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_percent: Option<u16>,
}

/// Semantic colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub header: Rgb,
    pub link: Rgb,
    pub code_fg: Rgb,
    pub code_bg: Rgb,
    pub keyword: Rgb,
    pub string: Rgb,
    pub comment: Rgb,
    pub number: Rgb,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                fg: Rgb(0xd4, 0xd4, 0xd4),
                muted: Rgb(0x6a, 0x73, 0x7d),
                accent: Rgb(0xe5, 0xc0, 0x7b),
                header: Rgb(0x61, 0xaf, 0xef),
                link: Rgb(0x56, 0xb6, 0xc2),
                code_fg: Rgb(0xce, 0x91, 0x78),
                code_bg: Rgb(0x2a, 0x2d, 0x33),
                keyword: Rgb(0xc6, 0x78, 0xdd),
                string: Rgb(0x98, 0xc3, 0x79),
                comment: Rgb(0x7f, 0x84, 0x8e),
                number: Rgb(0xd1, 0x9a, 0x66),
            },
            ThemeMode::Light => Self {
                fg: Rgb(0x24, 0x29, 0x2e),
                muted: Rgb(0x8c, 0x95, 0x9f),
                accent: Rgb(0xb0, 0x88, 0x00),
                header: Rgb(0x00, 0x5c, 0xc5),
                link: Rgb(0x03, 0x66, 0xd6),
                code_fg: Rgb(0xa3, 0x15, 0x15),
                code_bg: Rgb(0xf0, 0xf2, 0xf4),
                keyword: Rgb(0xa6, 0x26, 0xa4),
                string: Rgb(0x50, 0xa1, 0x4f),
                comment: Rgb(0x6a, 0x73, 0x7d),
                number: Rgb(0x98, 0x68, 0x01),
            },
        }
    }
}

/// Theme resolved for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeContext {
    mode: ThemeMode,
    palette: Palette,
    styles: BTreeMap<Category, CategoryStyle>,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        let palette = Palette::for_mode(mode);
        let styles = Category::ALL
            .into_iter()
            .map(|category| (category, style_for(category, &palette)))
            .collect();
        Self {
            mode,
            palette,
            styles,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn style(&self, category: Category) -> CategoryStyle {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    pub fn styles(&self) -> &BTreeMap<Category, CategoryStyle> {
        &self.styles
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

fn style_for(category: Category, p: &Palette) -> CategoryStyle {
    let plain = CategoryStyle::default();
    match category {
        Category::Hide | Category::Indent => plain,
        Category::Bold => CategoryStyle {
            bold: true,
            ..plain
        },
        Category::Italic => CategoryStyle {
            italic: true,
            ..plain
        },
        Category::InlineCode => CategoryStyle {
            color: Some(p.code_fg),
            background: Some(p.code_bg),
            ..plain
        },
        Category::Strikethrough => CategoryStyle {
            strikethrough: true,
            ..plain
        },
        Category::Header1
        | Category::Header2
        | Category::Header3
        | Category::Header4
        | Category::Header5
        | Category::Header6
        | Category::Header7 => {
            let level = category.header_level().unwrap_or(7);
            CategoryStyle {
                color: Some(p.header),
                bold: true,
                underline: level == 1,
                scale_percent: Some(header_scale(level)),
                ..plain
            }
        }
        Category::Link => CategoryStyle {
            color: Some(p.link),
            underline: true,
            ..plain
        },
        Category::Image => CategoryStyle {
            color: Some(p.link),
            italic: true,
            ..plain
        },
        Category::Bullet | Category::Numbered | Category::TaskUnchecked => CategoryStyle {
            color: Some(p.accent),
            bold: true,
            ..plain
        },
        Category::TaskChecked => CategoryStyle {
            color: Some(p.string),
            bold: true,
            ..plain
        },
        Category::TaskDoneText => CategoryStyle {
            color: Some(p.muted),
            strikethrough: true,
            dim: true,
            ..plain
        },
        Category::Fence | Category::BlockRule | Category::CommentGray => CategoryStyle {
            color: Some(p.muted),
            ..plain
        },
        Category::CodeBlock => CategoryStyle {
            color: Some(p.fg),
            background: Some(p.code_bg),
            ..plain
        },
        Category::SyntaxKeyword => CategoryStyle {
            color: Some(p.keyword),
            bold: true,
            ..plain
        },
        Category::SyntaxString => CategoryStyle {
            color: Some(p.string),
            ..plain
        },
        Category::SyntaxComment => CategoryStyle {
            color: Some(p.comment),
            italic: true,
            ..plain
        },
        Category::SyntaxNumber => CategoryStyle {
            color: Some(p.number),
            ..plain
        },
    }
}

fn header_scale(level: u8) -> u16 {
    match level {
        1 => 160,
        2 => 140,
        3 => 125,
        4 => 115,
        5 => 110,
        6 => 105,
        _ => 100,
    }
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
