//! commentmd - 注释内 Markdown 渲染引擎
//!
//! 模块结构：
//! - language / extract / block: 注释提取（语言标记表、CommentBlock）
//! - mapping: clean text 偏移 → 文档行列
//! - cascade: Markdown 模式级联（fence → code → inline → links → tasks → lists → headers）
//! - emit / overlay / theme: 样式与覆盖层指令
//! - gate: 光标所在注释块回退为原文
//! - cache / engine: 文档缓存、防抖与宿主事件入口
//! - paint: 参考宿主，把覆盖层应用到文本行

pub mod block;
pub mod cache;
pub mod cascade;
pub mod emit;
pub mod engine;
pub mod extract;
pub mod gate;
pub mod language;
pub mod mapping;
pub mod overlay;
pub mod paint;
pub mod settings;
pub mod theme;

pub use block::{BlockKind, CommentBlock, DocRange, Position};
pub use engine::{parse_document, render_text, Engine, ParsedDocument};
pub use language::{CommentSyntax, LanguageId, SyntaxTable};
pub use overlay::{Category, OverlayInstruction, OverlaySet};
pub use settings::Settings;
pub use theme::ThemeMode;
