//! Integration boundary.
//!
//! The host dispatches discrete events (open, edit, cursor move, theme
//! change, toggle, refresh) one at a time and asks for the overlay set of a
//! document. Parsing is pure; the engine only decides when to redo it. A
//! panic inside parsing or emission is caught here, logged, and turned into
//! an empty set for that document.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use compact_str::CompactString;
use ropey::Rope;
use rustc_hash::FxHashMap;

use crate::block::CommentBlock;
use crate::cache::{Debouncer, DocumentUri, RenderCache};
use crate::cascade::{Cascade, MdMatch};
use crate::emit::{EmitOptions, Emitter};
use crate::extract::extract_blocks;
use crate::gate::{filter_active, GateState};
use crate::language::{CommentSyntax, SyntaxTable};
use crate::overlay::OverlaySet;
use crate::settings::Settings;
use crate::theme::{ThemeContext, ThemeMode};

/// Blocks and their matches; `matches[i]` belongs to `blocks[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub blocks: Vec<CommentBlock>,
    pub matches: Vec<Vec<MdMatch>>,
}

impl ParsedDocument {
    pub fn match_count(&self) -> usize {
        self.matches.iter().map(Vec::len).sum()
    }
}

pub fn parse_document(rope: &Rope, syntax: &CommentSyntax, cascade: &Cascade) -> ParsedDocument {
    let blocks = extract_blocks(rope, syntax);
    let matches = blocks.iter().map(|block| cascade.run(block)).collect();
    ParsedDocument { blocks, matches }
}

/// One-shot render without an engine: parse, emit, gate.
pub fn render_text(
    settings: &Settings,
    language_id: &str,
    text: &str,
    cursor_line: Option<usize>,
) -> OverlaySet {
    let mut engine = Engine::new(settings.clone());
    let uri = DocumentUri::new("untitled");
    engine.open(uri.clone(), language_id, text);
    if let Some(line) = cursor_line {
        engine.cursor_moved(&uri, line);
    }
    engine.render(&uri)
}

#[derive(Debug)]
struct DocumentSession {
    language: CompactString,
    rope: Rope,
    gate: GateState,
}

pub struct Engine {
    settings: Settings,
    syntax: SyntaxTable,
    cascade: Cascade,
    theme: ThemeContext,
    enabled: bool,
    cache: RenderCache,
    debouncer: Debouncer,
    documents: FxHashMap<DocumentUri, DocumentSession>,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        tracing::info!(
            enabled = settings.enabled,
            theme = ?settings.theme,
            mapping = ?settings.mapping,
            "commentmd engine initialized"
        );
        Self {
            syntax: SyntaxTable::new(&settings.languages),
            cascade: Cascade::new(settings.highlight_code_blocks),
            theme: ThemeContext::new(settings.theme),
            enabled: settings.enabled,
            cache: RenderCache::new(),
            debouncer: Debouncer::new(settings.debounce()),
            documents: FxHashMap::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Everything cached was derived from the old
    /// ones, so the whole cache goes.
    pub fn update_settings(&mut self, settings: Settings) {
        self.syntax = SyntaxTable::new(&settings.languages);
        self.cascade = Cascade::new(settings.highlight_code_blocks);
        self.theme = ThemeContext::new(settings.theme);
        self.enabled = settings.enabled;
        self.debouncer.set_delay(settings.debounce());
        self.cache.clear();
        self.settings = settings;
    }

    pub fn open(&mut self, uri: DocumentUri, language_id: &str, text: &str) {
        self.cache.invalidate(&uri);
        self.debouncer.cancel(&uri);
        self.documents.insert(
            uri,
            DocumentSession {
                language: CompactString::new(language_id),
                rope: Rope::from_str(text),
                gate: GateState::Idle,
            },
        );
    }

    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
        self.cache.invalidate(uri);
        self.debouncer.cancel(uri);
    }

    pub fn is_open(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    /// Replace the text of an open document. The parse is dropped now and
    /// redone on the next render; the debouncer tells the host when.
    pub fn text_changed(&mut self, uri: &str, text: &str, now: Instant) -> bool {
        let Some(session) = self.documents.get_mut(uri) else {
            return false;
        };
        session.rope = Rope::from_str(text);
        session.gate.on_edit();
        self.cache.invalidate(uri);
        self.debouncer.schedule(DocumentUri::new(uri), now);
        true
    }

    pub fn set_language(&mut self, uri: &str, language_id: &str) {
        if let Some(session) = self.documents.get_mut(uri) {
            session.language = CompactString::new(language_id);
            session.gate.on_edit();
            self.cache.invalidate(uri);
        }
    }

    /// Documents whose edit burst has settled and should be re-rendered.
    pub fn poll_debounce(&mut self, now: Instant) -> Vec<DocumentUri> {
        self.debouncer
            .poll(now)
            .into_iter()
            .filter(|uri| self.documents.contains_key(uri.as_str()))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Returns whether the host should re-render.
    pub fn cursor_moved(&mut self, uri: &str, line: usize) -> bool {
        self.documents
            .get_mut(uri)
            .is_some_and(|session| session.gate.on_cursor(line))
    }

    pub fn cursor_line(&self, uri: &str) -> Option<usize> {
        self.documents.get(uri)?.gate.active_line()
    }

    pub fn force_refresh(&mut self, uri: &str) {
        self.cache.invalidate(uri);
        self.debouncer.cancel(uri);
        if let Some(session) = self.documents.get_mut(uri) {
            session.gate.on_edit();
        }
    }

    /// Theme changes restyle but never reparse.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        if self.theme.mode() == mode {
            return;
        }
        self.theme = ThemeContext::new(mode);
        self.settings.theme = mode;
        self.cache.clear_emitted();
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn parsed(&self, uri: &str) -> Option<Arc<ParsedDocument>> {
        self.cache.get(uri).map(|entry| Arc::clone(&entry.parsed))
    }

    /// Overlay set for `uri` with the edit-mode gate applied.
    pub fn render(&mut self, uri: &str) -> OverlaySet {
        if !self.enabled {
            return OverlaySet::empty();
        }
        let Some((parsed, full)) = self.emitted(uri) else {
            return OverlaySet::empty();
        };
        let Some(session) = self.documents.get_mut(uri) else {
            return OverlaySet::empty();
        };

        let cursor = session.gate.active_line();
        match cursor {
            Some(line) => session.gate.on_render(line),
            None => session.gate = GateState::Idle,
        }
        filter_active(&full, &parsed.blocks, cursor)
    }

    /// Overlay set for `uri` without the gate.
    pub fn render_unfiltered(&mut self, uri: &str) -> OverlaySet {
        if !self.enabled {
            return OverlaySet::empty();
        }
        self.emitted(uri)
            .map(|(_, full)| full.as_ref().clone())
            .unwrap_or_else(OverlaySet::empty)
    }

    fn emitted(&mut self, uri: &str) -> Option<(Arc<ParsedDocument>, Arc<OverlaySet>)> {
        let mode = self.theme.mode();
        let parsed = self.parse_cached(uri)?;
        if let Some(set) = self.cache.emitted(uri, mode) {
            return Some((parsed, set));
        }

        let options = EmitOptions {
            rule_width: self.settings.rule_width,
            mapping: self.settings.mapping,
        };
        let emitter = Emitter::new(options, &self.theme);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            emitter.emit(&parsed.blocks, &parsed.matches)
        }));
        match result {
            Ok(set) => {
                let set = Arc::new(set);
                self.cache.set_emitted(uri, mode, Arc::clone(&set));
                Some((parsed, set))
            }
            Err(payload) => {
                tracing::error!(
                    uri,
                    panic = %panic_message(payload.as_ref()),
                    "overlay emission failed, rendering nothing"
                );
                None
            }
        }
    }

    fn parse_cached(&mut self, uri: &str) -> Option<Arc<ParsedDocument>> {
        if let Some(entry) = self.cache.get(uri) {
            return Some(Arc::clone(&entry.parsed));
        }

        let session = self.documents.get(uri)?;
        let syntax = self.syntax.resolve(&session.language);
        let cascade = &self.cascade;
        let rope = &session.rope;
        let result = panic::catch_unwind(AssertUnwindSafe(|| parse_document(rope, &syntax, cascade)));

        match result {
            Ok(parsed) => {
                tracing::debug!(
                    uri,
                    blocks = parsed.blocks.len(),
                    matches = parsed.match_count(),
                    "document parsed"
                );
                let parsed = Arc::new(parsed);
                self.cache.insert(DocumentUri::new(uri), Arc::clone(&parsed));
                self.debouncer.cancel(uri);
                Some(parsed)
            }
            Err(payload) => {
                tracing::error!(
                    uri,
                    panic = %panic_message(payload.as_ref()),
                    "comment parse failed, rendering nothing"
                );
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
