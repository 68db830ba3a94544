//! Layout Module
//!
//! Section offsets computed with [Taffy](https://github.com/DioxusLabs/taffy)
//! flexbox. Offsets depend on the viewport (full-screen sections, capped
//! content width), so the page recomputes them after every debounced resize
//! and hands the result to `ScrollTracker::relayout`.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::layout::{compute_sections, SectionBlock};
//!
//! let blocks = vec![SectionBlock::screen("home", 1.0), SectionBlock::fixed("about", 600.0)];
//! let geometry = compute_sections(&blocks, &viewport, &config)?;
//! tracker.relayout(geometry.sections);
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::compute_sections;
pub use types::*;
