//! Core types for spark-folio
//!
//! Plain data shared by every module: sections, links, tracked elements,
//! viewport geometry and the capability set.
//!
//! All positions are CSS pixels in document coordinates unless noted.

use serde::{Deserialize, Serialize};

// =============================================================================
// Page Content
// =============================================================================

/// A named, vertically positioned content region used as a scroll anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id, shared with `NavLink::section_id`.
    pub id: String,
    /// Distance from the document top.
    pub top_offset: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top_offset: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }

    /// Bottom edge in document coordinates.
    pub fn bottom(&self) -> f64 {
        self.top_offset + self.height
    }
}

/// A navigation link pointing at a section by id.
///
/// Nothing enforces that `section_id` names a registered section. A dangling
/// id is a configuration error that makes navigation a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub section_id: String,
    pub label: String,
}

impl NavLink {
    pub fn new(section_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            label: label.into(),
        }
    }

    /// The anchor href this link renders with (`#about`).
    pub fn href(&self) -> String {
        format!("#{}", self.section_id)
    }
}

/// An element watched for its one-way reveal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedElement {
    pub index: usize,
    pub revealed: bool,
}

/// Document-space bounds of a tracked element, used for viewport checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub index: usize,
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(index: usize, top: f64, height: f64) -> Self {
        Self { index, top, height }
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Scroll-derived state, recomputed on each permitted scroll tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollState {
    pub active_section_id: Option<String>,
    pub scroll_y: f64,
}

/// Mobile menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

// =============================================================================
// Geometry
// =============================================================================

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// Same viewport scrolled to `scroll_y`.
    pub fn at(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }

    /// Convert a document-space top into a viewport-relative top
    /// (what `getBoundingClientRect().top` reports).
    pub fn relative_top(&self, document_top: f64) -> f64 {
        document_top - self.scroll_y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

// =============================================================================
// Scroll Requests
// =============================================================================

/// How the render layer should perform a requested scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// A scroll the navigation layer asks the renderer to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

// =============================================================================
// Capabilities (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Feature set a page is mounted with.
    ///
    /// `BASIC_NAV` alone gives smooth-scroll links and the mobile menu.
    /// `SCROLL_SPY` adds active-link tracking, `REVEAL` attaches the
    /// reveal animator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        const BASIC_NAV = 1 << 0;
        const SCROLL_SPY = 1 << 1;
        const REVEAL = 1 << 2;
    }
}

impl Capabilities {
    /// Everything enabled.
    pub fn full() -> Self {
        Self::BASIC_NAV | Self::SCROLL_SPY | Self::REVEAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 29.9)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(5.0, 15.0)));
    }

    #[test]
    fn test_viewport_relative_top() {
        let viewport = Viewport::new(500.0, 1280.0, 800.0);
        assert_eq!(viewport.relative_top(900.0), 400.0);
        assert_eq!(viewport.at(0.0).relative_top(900.0), 900.0);
    }

    #[test]
    fn test_nav_link_href() {
        let link = NavLink::new("physics", "Physics");
        assert_eq!(link.href(), "#physics");
    }

    #[test]
    fn test_capabilities_full() {
        let caps = Capabilities::full();
        assert!(caps.contains(Capabilities::BASIC_NAV));
        assert!(caps.contains(Capabilities::SCROLL_SPY | Capabilities::REVEAL));
        assert!(!Capabilities::BASIC_NAV.contains(Capabilities::SCROLL_SPY));
    }
}
