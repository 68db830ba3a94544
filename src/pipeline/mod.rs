//! Page Pipeline
//!
//! Connects the state systems to the outside world.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host events → PageEvent → Page::handle → throttle / debounce → state signals
//!                              Page::tick → scheduler timers ↗
//! ```
//!
//! ## Key Design Principles
//!
//! - **Explicit time**: every entry point takes an `Instant`
//! - **Single owner**: the page owns every timer, so teardown clears them all
//! - **Signals out**: render layers bind to the component signals

pub mod events;
pub mod page;

// Re-exports
pub use events::{PageEvent, PageTimer};
pub use page::{run, Page, PageContent};
