//! # spark-folio
//!
//! Scroll-driven UI state for a single-page portfolio.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! The crate owns the page's interaction state and never touches a real DOM.
//! Every piece of mutable UI state (active section, menu open, revealed
//! elements, counter text, form message) lives in a `Signal`, and a render
//! layer binds effects to those signals.
//!
//! Scroll events are rate limited before they reach the state systems:
//! ```text
//! scroll → ThrottleGate → NavigationController → { ScrollTracker, RevealAnimator } → signals
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Section, NavLink, Viewport, Capabilities, etc.)
//! - [`timing`] - Throttle, debounce and deadline scheduler
//! - [`state`] - Scroll-spy, reveal, navigation, smooth scroll, terminal input
//! - [`form`] - Contact form validation and status message
//! - [`effects`] - Typing, counters, card tilt, cursor, particles, lazy images
//! - [`showcase`] - Project filter and theme toggle
//! - [`layout`] - Section offsets via Taffy
//! - [`pipeline`] - The `Page` composition root and event loop

pub mod config;
pub mod effects;
pub mod error;
pub mod form;
pub mod layout;
pub mod pipeline;
pub mod showcase;
pub mod state;
pub mod timing;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::FolioConfig;
pub use error::{FolioError, Result, ValidationError};

pub use timing::{wrap, Debouncer, Scheduler, ThrottleGate, Throttled, TimerId};

pub use state::{
    InputMapper, NavigationController, RevealAnimator, ScrollTracker, SmoothScroll,
};

pub use form::{validate, ContactForm, ContactSubmission, FormMessage, MessageKind, MessagePhase};

pub use effects::{
    CursorFollower, LazyImages, ParticleField, StatsCounter, TiltEffect, TypingEffect,
};

pub use showcase::{Project, Showcase, PROJECT_FILTERS};

pub use layout::{compute_sections, Anchor, AnchoredBox, BlockHeight, PageGeometry, SectionBlock};

pub use pipeline::{Page, PageContent, PageEvent, PageTimer};
