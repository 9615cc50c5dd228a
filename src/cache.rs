//! Per-document render cache and edit debouncing.
//!
//! The cache is owned by the [`crate::engine::Engine`] and passed around
//! explicitly. Its only mutation rule is full invalidation: text changes and
//! forced refreshes drop the entry, theme changes drop only the emitted set.

use std::sync::Arc;
use std::time::{Duration, Instant};

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::engine::ParsedDocument;
use crate::overlay::OverlaySet;
use crate::theme::ThemeMode;

pub type DocumentUri = CompactString;

#[derive(Debug, Clone)]
pub struct CachedRender {
    pub parsed: Arc<ParsedDocument>,
    /// Unfiltered emission for the theme it was built with.
    pub emitted: Option<(ThemeMode, Arc<OverlaySet>)>,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    entries: FxHashMap<DocumentUri, CachedRender>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &str) -> Option<&CachedRender> {
        self.entries.get(uri)
    }

    pub fn insert(&mut self, uri: DocumentUri, parsed: Arc<ParsedDocument>) {
        self.entries.insert(
            uri,
            CachedRender {
                parsed,
                emitted: None,
            },
        );
    }

    /// Attach an emitted set; ignored if the entry was invalidated meanwhile.
    pub fn set_emitted(&mut self, uri: &str, theme: ThemeMode, set: Arc<OverlaySet>) {
        if let Some(entry) = self.entries.get_mut(uri) {
            entry.emitted = Some((theme, set));
        }
    }

    /// Emitted set for `uri` if it was built with `theme`.
    pub fn emitted(&self, uri: &str, theme: ThemeMode) -> Option<Arc<OverlaySet>> {
        match &self.entries.get(uri)?.emitted {
            Some((mode, set)) if *mode == theme => Some(Arc::clone(set)),
            _ => None,
        }
    }

    pub fn invalidate(&mut self, uri: &str) -> bool {
        let removed = self.entries.remove(uri).is_some();
        if removed {
            tracing::debug!(uri, "render cache invalidated");
        }
        removed
    }

    /// Keep parses, drop every emitted set (theme change).
    pub fn clear_emitted(&mut self) {
        for entry in self.entries.values_mut() {
            entry.emitted = None;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deadline-per-document debouncer, polled by the caller's event loop.
///
/// Scheduling again before the deadline simply moves it: a newer edit
/// supersedes the pending one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadlines: FxHashMap<DocumentUri, Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: FxHashMap::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn schedule(&mut self, uri: DocumentUri, now: Instant) {
        self.deadlines.insert(uri, now + self.delay);
    }

    pub fn cancel(&mut self, uri: &str) -> bool {
        self.deadlines.remove(uri).is_some()
    }

    pub fn is_pending(&self, uri: &str) -> bool {
        self.deadlines.contains_key(uri)
    }

    /// Remove and return every document whose deadline has passed, sorted.
    pub fn poll(&mut self, now: Instant) -> Vec<DocumentUri> {
        let mut due: Vec<DocumentUri> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(uri, _)| uri.clone())
            .collect();
        due.sort();

        for uri in &due {
            if let Some(deadline) = self.deadlines.remove(uri) {
                let overshoot = now.duration_since(deadline);
                if overshoot.as_millis() > 5 {
                    tracing::debug!(
                        uri = %uri,
                        overshoot_ms = overshoot.as_millis() as u64,
                        "reparse debounce overshoot"
                    );
                }
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }
}

#[cfg(test)]
#[path = "../tests/unit/cache.rs"]
mod tests;
