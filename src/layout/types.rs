//! Layout Types - section blocks in, section offsets out.

use serde::{Deserialize, Serialize};

use crate::types::{Rect, Section};

/// How tall a section is before layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlockHeight {
    /// Fixed height in px.
    Fixed(f32),
    /// Fraction of the viewport height (`1.0` is a full-screen hero).
    Viewport(f32),
}

impl BlockHeight {
    pub fn resolve(self, viewport_height: f64) -> f32 {
        match self {
            BlockHeight::Fixed(px) => px,
            BlockHeight::Viewport(fraction) => fraction * viewport_height as f32,
        }
    }
}

/// A section as laid out on the page, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBlock {
    pub id: String,
    pub height: BlockHeight,
}

impl SectionBlock {
    pub fn fixed(id: impl Into<String>, height: f32) -> Self {
        Self {
            id: id.into(),
            height: BlockHeight::Fixed(height),
        }
    }

    pub fn screen(id: impl Into<String>, fraction: f32) -> Self {
        Self {
            id: id.into(),
            height: BlockHeight::Viewport(fraction),
        }
    }
}

/// Result of a section layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageGeometry {
    /// Sections with their computed document offsets, in document order.
    pub sections: Vec<Section>,
    pub content_width: f64,
    pub document_height: f64,
}

impl PageGeometry {
    /// Largest scroll position that still fills the viewport.
    pub fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.document_height - viewport_height).max(0.0)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

// =============================================================================
// Anchored Content
// =============================================================================

/// A document position pinned to a section: `dy` px below its top.
///
/// Content inside a section moves with it when a resize shifts the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub section: String,
    pub dy: f64,
}

impl Anchor {
    pub fn new(section: impl Into<String>, dy: f64) -> Self {
        Self {
            section: section.into(),
            dy,
        }
    }

    /// Document `y` under `geometry`. `None` if the section is not laid out.
    pub fn resolve(&self, geometry: &PageGeometry) -> Option<f64> {
        geometry
            .section(&self.section)
            .map(|section| section.top_offset + self.dy)
    }
}

/// A box pinned to a section. `x` is already a document coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchoredBox {
    pub anchor: Anchor,
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchoredBox {
    pub fn new(section: impl Into<String>, dy: f64, x: f64, width: f64, height: f64) -> Self {
        Self {
            anchor: Anchor::new(section, dy),
            x,
            width,
            height,
        }
    }

    pub fn resolve(&self, geometry: &PageGeometry) -> Option<Rect> {
        self.anchor
            .resolve(geometry)
            .map(|y| Rect::new(self.x, y, self.width, self.height))
    }
}
