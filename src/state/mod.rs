//! State Module - scroll-driven UI state
//!
//! This module contains the reactive state systems behind the page:
//!
//! - **Scroll** - registered sections, scroll position, active section (scroll-spy)
//! - **Reveal** - one-way reveal of tracked elements
//! - **Navigation** - link navigation, mobile menu, navbar scrolled flag
//! - **Smooth scroll** - eased scroll animation toward a target
//! - **Input** - crossterm events to page events

pub mod input;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod smooth_scroll;

pub use input::{InputMapper, PAGE_SCROLL_FACTOR};
pub use navigation::NavigationController;
pub use reveal::RevealAnimator;
pub use scroll::ScrollTracker;
pub use smooth_scroll::SmoothScroll;
