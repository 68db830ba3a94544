//! Scroll State Module - active section tracking (scroll-spy)
//!
//! Manages:
//! - The registered sections, kept in document order
//! - The current scroll position (`scroll_y` signal)
//! - The active section id (`active` signal)
//!
//! Architecture:
//! - `current_offset` = `scroll_y` + fixed header height
//! - The active section is the lowest section whose top has been scrolled past
//! - When no section qualifies, the previous active id is kept

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use crate::config::DEFAULT_HEADER_OFFSET;
use crate::types::{ScrollState, Section};

// =============================================================================
// SCROLL TRACKER
// =============================================================================

pub struct ScrollTracker {
    sections: Vec<Section>,
    header_offset: f64,
    scroll_y: Signal<f64>,
    active: Signal<Option<String>>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_OFFSET)
    }
}

impl ScrollTracker {
    pub fn new(header_offset: f64) -> Self {
        Self {
            sections: Vec::new(),
            header_offset,
            scroll_y: signal(0.0),
            active: signal(None),
        }
    }

    /// Replace the tracked sections.
    ///
    /// Sections are stably sorted by `top_offset`. A repeated id keeps its
    /// first occurrence; sections with non-finite offsets are skipped.
    pub fn register(&mut self, sections: impl IntoIterator<Item = Section>) {
        let mut accepted: Vec<Section> = Vec::new();

        for section in sections {
            if !section.top_offset.is_finite() || !section.height.is_finite() {
                warn!(id = %section.id, "section has a non-finite offset, skipping");
                continue;
            }
            if accepted.iter().any(|s| s.id == section.id) {
                warn!(id = %section.id, "duplicate section id, keeping the first");
                continue;
            }
            accepted.push(section);
        }

        accepted.sort_by(|a, b| a.top_offset.total_cmp(&b.top_offset));
        debug!(count = accepted.len(), "sections registered");
        self.sections = accepted;
    }

    /// Re-register sections after a layout change.
    ///
    /// The active id survives if its section still exists, then the active
    /// section is recomputed at the current scroll position.
    pub fn relayout(&mut self, sections: impl IntoIterator<Item = Section>) {
        self.register(sections);

        if let Some(active) = self.active.get() {
            if self.section(&active).is_none() {
                self.active.set(None);
            }
        }

        self.update(self.scroll_y.get());
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    /// Scroll position adjusted for the fixed header.
    pub fn current_offset(&self) -> f64 {
        self.scroll_y.get() + self.header_offset
    }

    /// Id of the lowest section whose top is at or above `offset`.
    ///
    /// Scans from the last section to the first and stops at the first match.
    pub fn compute_active(&self, offset: f64) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .find(|s| s.top_offset <= offset)
            .map(|s| s.id.as_str())
    }

    /// Record a new scroll position and recompute the active section.
    ///
    /// Returns the active id afterwards (possibly retained from before).
    pub fn update(&mut self, scroll_y: f64) -> Option<String> {
        self.record_scroll(scroll_y);

        let computed = self.compute_active(self.current_offset()).map(str::to_string);
        if let Some(id) = computed {
            if self.active.get().as_deref() != Some(id.as_str()) {
                debug!(section = %id, scroll_y, "active section changed");
                self.active.set(Some(id));
            }
        }

        self.active.get()
    }

    /// Store the scroll position without touching the active section.
    pub fn record_scroll(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }

    /// Mark a section active without waiting for the scroll to land.
    ///
    /// Unknown ids are ignored.
    pub fn set_active(&self, id: &str) {
        if self.section(id).is_some() {
            self.active.set(Some(id.to_string()));
        }
    }

    pub fn active_section_id(&self) -> Option<String> {
        self.active.get()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.get().as_deref() == Some(id)
    }

    /// Reactive handle for binding the active id in a render effect.
    pub fn active_signal(&self) -> Signal<Option<String>> {
        self.active.clone()
    }

    pub fn scroll_y_signal(&self) -> Signal<f64> {
        self.scroll_y.clone()
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            active_section_id: self.active.get(),
            scroll_y: self.scroll_y.get(),
        }
    }
}
