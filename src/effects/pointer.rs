//! Pointer-driven flourishes: project card tilt and the cursor follower.

use spark_signals::{signal, Signal};

use crate::types::{Point, Rect};

// =============================================================================
// CARD TILT
// =============================================================================

/// Lift applied to a tilted card, in px.
const TILT_LIFT: f64 = -8.0;

/// Pointer distance from centre per degree of rotation.
const TILT_DAMPING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub lift: f64,
}

impl Tilt {
    /// Tilt toward `pointer` over `card`. The card leans away from the
    /// pointer's offset from its centre.
    pub fn toward(pointer: Point, card: &Rect) -> Self {
        let x = pointer.x - card.x;
        let y = pointer.y - card.y;
        let center_x = card.width / 2.0;
        let center_y = card.height / 2.0;

        Self {
            rotate_x: (y - center_y) / TILT_DAMPING,
            rotate_y: (center_x - x) / TILT_DAMPING,
            lift: TILT_LIFT,
        }
    }

    /// CSS transform value.
    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            self.rotate_x, self.rotate_y, self.lift
        )
    }
}

/// Per-card tilt state. Cards are addressed by registration index.
#[derive(Default)]
pub struct TiltEffect {
    cards: Vec<(Rect, Signal<Option<Tilt>>)>,
}

impl TiltEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, card: Rect) -> usize {
        self.cards.push((card, signal(None)));
        self.cards.len() - 1
    }

    /// Move card `index` after a layout change.
    pub fn set_card(&mut self, index: usize, card: Rect) {
        if let Some((bounds, _)) = self.cards.get_mut(index) {
            *bounds = card;
        }
    }

    pub fn card(&self, index: usize) -> Option<Rect> {
        self.cards.get(index).map(|(card, _)| *card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether `pointer` is over card `index`.
    pub fn contains(&self, index: usize, pointer: Point) -> bool {
        self.cards
            .get(index)
            .is_some_and(|(card, _)| card.contains(pointer))
    }

    pub fn pointer_move(&self, index: usize, pointer: Point) {
        if let Some((card, tilt)) = self.cards.get(index) {
            tilt.set(Some(Tilt::toward(pointer, card)));
        }
    }

    pub fn pointer_leave(&self, index: usize) {
        if let Some((_, tilt)) = self.cards.get(index) {
            tilt.set(None);
        }
    }

    /// Current transform; empty when the card is at rest or unknown.
    pub fn transform(&self, index: usize) -> String {
        self.cards
            .get(index)
            .and_then(|(_, tilt)| tilt.get())
            .map(|tilt| tilt.transform())
            .unwrap_or_default()
    }
}

// =============================================================================
// CURSOR FOLLOWER
// =============================================================================

/// Half the dot's size; centres the dot on the pointer.
const DOT_OFFSET: f64 = 5.0;

/// Half the ring's size.
const RING_OFFSET: f64 = 20.0;

const HOVER_SCALE: f64 = 1.5;

/// A small dot and a larger trailing ring drawn at the pointer.
pub struct CursorFollower {
    position: Signal<Point>,
    hovering: Signal<bool>,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        Self {
            position: signal(Point::default()),
            hovering: signal(false),
        }
    }

    pub fn move_to(&self, pointer: Point) {
        self.position.set(pointer);
    }

    /// Pointer entered (or left) an interactive element.
    pub fn set_hovering(&self, hovering: bool) {
        self.hovering.set(hovering);
    }

    pub fn dot_transform(&self) -> String {
        self.transform(DOT_OFFSET)
    }

    pub fn ring_transform(&self) -> String {
        self.transform(RING_OFFSET)
    }

    fn transform(&self, offset: f64) -> String {
        let pointer = self.position.get();
        let translate = format!("translate({}px, {}px)", pointer.x - offset, pointer.y - offset);
        if self.hovering.get() {
            format!("{translate} scale({HOVER_SCALE})")
        } else {
            translate
        }
    }
}
