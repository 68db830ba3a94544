//! Reveal Module - one-way scroll reveal for tracked elements
//!
//! Each tracked element starts unseen and becomes revealed the first time it
//! enters the viewport. `revealed` is terminal: nothing ever reverts it.
//!
//! Two feeds drive the transition:
//! - `on_intersect` - an intersection observer style callback per element
//! - `check_viewport` - a scroll tick checking every element's bounds
//!
//! Registration performs the same viewport check synchronously, so
//! above-the-fold content never flashes invisible.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::reveal::RevealAnimator;
//! use spark_folio::{ElementBounds, Viewport};
//!
//! let mut reveal = RevealAnimator::new(100.0);
//! reveal.register([ElementBounds::new(0, 200.0, 300.0)], &Viewport::default());
//! assert!(reveal.is_revealed(0));
//! ```

use std::collections::BTreeMap;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use crate::config::DEFAULT_REVEAL_MARGIN;
use crate::types::{ElementBounds, TrackedElement, Viewport};

struct Tracked {
    bounds: ElementBounds,
    revealed: Signal<bool>,
}

pub struct RevealAnimator {
    reveal_margin: f64,
    elements: BTreeMap<usize, Tracked>,
}

impl Default for RevealAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_MARGIN)
    }
}

impl RevealAnimator {
    pub fn new(reveal_margin: f64) -> Self {
        Self {
            reveal_margin,
            elements: BTreeMap::new(),
        }
    }

    /// Start tracking `elements` and reveal any already in view.
    ///
    /// Re-registering an index updates its bounds and keeps its state.
    /// Returns how many elements were revealed by the initial check.
    pub fn register(
        &mut self,
        elements: impl IntoIterator<Item = ElementBounds>,
        viewport: &Viewport,
    ) -> usize {
        let mut added = 0;
        for bounds in elements {
            match self.elements.get_mut(&bounds.index) {
                Some(tracked) => tracked.bounds = bounds,
                None => {
                    self.elements.insert(
                        bounds.index,
                        Tracked {
                            bounds,
                            revealed: signal(false),
                        },
                    );
                    added += 1;
                }
            }
        }

        let revealed = self.check_viewport(viewport);
        debug!(added, revealed, total = self.elements.len(), "reveal targets registered");
        revealed
    }

    /// Update stored bounds after a layout change. Unknown indices are ignored.
    pub fn relayout(&mut self, elements: impl IntoIterator<Item = ElementBounds>) {
        for bounds in elements {
            if let Some(tracked) = self.elements.get_mut(&bounds.index) {
                tracked.bounds = bounds;
            }
        }
    }

    /// Intersection callback. `false` never un-reveals.
    ///
    /// Returns `true` if this call revealed the element.
    pub fn on_intersect(&mut self, index: usize, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        match self.elements.get(&index) {
            Some(tracked) => Self::reveal(index, tracked),
            None => {
                trace!(index, "intersection for untracked element");
                false
            }
        }
    }

    /// Reveal every element whose top has crossed the reveal line.
    ///
    /// The reveal line sits `reveal_margin` above the viewport bottom.
    /// Elements scrolled past entirely also count, so a jump never leaves
    /// content hidden behind the user. Returns how many were newly revealed.
    pub fn check_viewport(&mut self, viewport: &Viewport) -> usize {
        let line = viewport.height - self.reveal_margin;
        self.elements
            .iter()
            .filter(|(_, tracked)| viewport.relative_top(tracked.bounds.top) < line)
            .filter(|(index, tracked)| Self::reveal(**index, tracked))
            .count()
    }

    fn reveal(index: usize, tracked: &Tracked) -> bool {
        if tracked.revealed.get() {
            return false;
        }
        trace!(index, "element revealed");
        tracked.revealed.set(true);
        true
    }

    /// Unknown indices report `false`.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.elements
            .get(&index)
            .is_some_and(|tracked| tracked.revealed.get())
    }

    pub fn is_tracked(&self, index: usize) -> bool {
        self.elements.contains_key(&index)
    }

    /// Reactive handle for binding the reveal class in a render effect.
    pub fn revealed_signal(&self, index: usize) -> Option<Signal<bool>> {
        self.elements.get(&index).map(|tracked| tracked.revealed.clone())
    }

    pub fn element(&self, index: usize) -> Option<TrackedElement> {
        self.elements.get(&index).map(|tracked| TrackedElement {
            index,
            revealed: tracked.revealed.get(),
        })
    }

    /// Every tracked element, ordered by index.
    pub fn elements(&self) -> Vec<TrackedElement> {
        self.elements
            .iter()
            .map(|(&index, tracked)| TrackedElement {
                index,
                revealed: tracked.revealed.get(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.elements
            .values()
            .filter(|tracked| tracked.revealed.get())
            .count()
    }

    /// Nothing left to watch; the scroll feed can be skipped.
    pub fn all_revealed(&self) -> bool {
        self.revealed_count() == self.elements.len()
    }
}
