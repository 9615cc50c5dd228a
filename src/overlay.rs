//! What the host receives: instructions bucketed by style category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::DocRange;
use crate::theme::CategoryStyle;

/// Style bucket. The serialized names are the stable identifiers hosts key
/// their decoration types on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "hide")]
    Hide,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "inlineCode")]
    InlineCode,
    #[serde(rename = "strikethrough")]
    Strikethrough,
    #[serde(rename = "header1")]
    Header1,
    #[serde(rename = "header2")]
    Header2,
    #[serde(rename = "header3")]
    Header3,
    #[serde(rename = "header4")]
    Header4,
    #[serde(rename = "header5")]
    Header5,
    #[serde(rename = "header6")]
    Header6,
    #[serde(rename = "header7")]
    Header7,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "bullet")]
    Bullet,
    #[serde(rename = "numbered")]
    Numbered,
    #[serde(rename = "taskChecked")]
    TaskChecked,
    #[serde(rename = "taskUnchecked")]
    TaskUnchecked,
    #[serde(rename = "taskDoneText")]
    TaskDoneText,
    #[serde(rename = "fence")]
    Fence,
    #[serde(rename = "codeBlock")]
    CodeBlock,
    #[serde(rename = "blockRule")]
    BlockRule,
    #[serde(rename = "indent")]
    Indent,
    #[serde(rename = "commentGray")]
    CommentGray,
    #[serde(rename = "syntax-keyword")]
    SyntaxKeyword,
    #[serde(rename = "syntax-string")]
    SyntaxString,
    #[serde(rename = "syntax-comment")]
    SyntaxComment,
    #[serde(rename = "syntax-number")]
    SyntaxNumber,
}

impl Category {
    pub const ALL: [Category; 28] = [
        Category::Hide,
        Category::Bold,
        Category::Italic,
        Category::InlineCode,
        Category::Strikethrough,
        Category::Header1,
        Category::Header2,
        Category::Header3,
        Category::Header4,
        Category::Header5,
        Category::Header6,
        Category::Header7,
        Category::Link,
        Category::Image,
        Category::Bullet,
        Category::Numbered,
        Category::TaskChecked,
        Category::TaskUnchecked,
        Category::TaskDoneText,
        Category::Fence,
        Category::CodeBlock,
        Category::BlockRule,
        Category::Indent,
        Category::CommentGray,
        Category::SyntaxKeyword,
        Category::SyntaxString,
        Category::SyntaxComment,
        Category::SyntaxNumber,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::InlineCode => "inlineCode",
            Self::Strikethrough => "strikethrough",
            Self::Header1 => "header1",
            Self::Header2 => "header2",
            Self::Header3 => "header3",
            Self::Header4 => "header4",
            Self::Header5 => "header5",
            Self::Header6 => "header6",
            Self::Header7 => "header7",
            Self::Link => "link",
            Self::Image => "image",
            Self::Bullet => "bullet",
            Self::Numbered => "numbered",
            Self::TaskChecked => "taskChecked",
            Self::TaskUnchecked => "taskUnchecked",
            Self::TaskDoneText => "taskDoneText",
            Self::Fence => "fence",
            Self::CodeBlock => "codeBlock",
            Self::BlockRule => "blockRule",
            Self::Indent => "indent",
            Self::CommentGray => "commentGray",
            Self::SyntaxKeyword => "syntax-keyword",
            Self::SyntaxString => "syntax-string",
            Self::SyntaxComment => "syntax-comment",
            Self::SyntaxNumber => "syntax-number",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Header category for a level; out-of-range levels clamp to 1..=7.
    pub fn header(level: u8) -> Self {
        match level {
            0 | 1 => Self::Header1,
            2 => Self::Header2,
            3 => Self::Header3,
            4 => Self::Header4,
            5 => Self::Header5,
            6 => Self::Header6,
            _ => Self::Header7,
        }
    }

    pub fn header_level(self) -> Option<u8> {
        match self {
            Self::Header1 => Some(1),
            Self::Header2 => Some(2),
            Self::Header3 => Some(3),
            Self::Header4 => Some(4),
            Self::Header5 => Some(5),
            Self::Header6 => Some(6),
            Self::Header7 => Some(7),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayInstruction {
    pub range: DocRange,
    pub category: Category,
    /// Synthetic text shown before `range.start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub whole_line: bool,
    /// The inserted glyph should swallow the residual width of hidden
    /// characters after it (marker at column zero).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapse_residual: bool,
}

impl OverlayInstruction {
    pub fn new(range: DocRange, category: Category) -> Self {
        Self {
            range,
            category,
            inserted_text: None,
            whole_line: false,
            collapse_residual: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.inserted_text = Some(text.into());
        self
    }

    pub fn whole_line(mut self) -> Self {
        self.whole_line = true;
        self
    }

    pub fn collapsing(mut self, collapse: bool) -> Self {
        self.collapse_residual = collapse;
        self
    }
}

/// Category → ordered instructions, plus the resolved style of each
/// category. Every category is always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySet {
    buckets: BTreeMap<Category, Vec<OverlayInstruction>>,
    #[serde(default)]
    styles: BTreeMap<Category, CategoryStyle>,
}

impl Default for OverlaySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl OverlaySet {
    pub fn empty() -> Self {
        Self {
            buckets: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
            styles: BTreeMap::new(),
        }
    }

    pub fn with_styles(styles: BTreeMap<Category, CategoryStyle>) -> Self {
        Self {
            styles,
            ..Self::empty()
        }
    }

    pub fn push(&mut self, instruction: OverlayInstruction) {
        self.buckets
            .entry(instruction.category)
            .or_default()
            .push(instruction);
    }

    pub fn get(&self, category: Category) -> &[OverlayInstruction] {
        self.buckets.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn style(&self, category: Category) -> Option<&CategoryStyle> {
        self.styles.get(&category)
    }

    pub fn styles(&self) -> &BTreeMap<Category, CategoryStyle> {
        &self.styles
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.buckets.keys().copied()
    }

    /// Every instruction, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayInstruction> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&OverlayInstruction) -> bool) {
        for list in self.buckets.values_mut() {
            list.retain(&mut keep);
        }
    }

    pub fn filtered(&self, keep: impl FnMut(&OverlayInstruction) -> bool) -> Self {
        let mut out = self.clone();
        out.retain(keep);
        out
    }

    /// Sort every bucket by document position and drop exact duplicates.
    pub fn normalize(&mut self) {
        for list in self.buckets.values_mut() {
            list.sort_by(|a, b| a.range.cmp(&b.range));
            list.dedup();
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/overlay.rs"]
mod tests;
