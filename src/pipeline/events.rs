//! Page events and timers.
//!
//! Everything that reaches a [`Page`](super::Page) is a [`PageEvent`].
//! Everything the page schedules for later is a [`PageTimer`].

use crate::form::ContactSubmission;
use crate::types::Point;

/// An input to the page, already translated out of any host event system.
///
/// Coordinates are CSS pixels. `Click` and `PointerMove` are viewport
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The document scrolled to an absolute position.
    ScrollTo(f64),
    /// The user scrolled by a delta (wheel, keys).
    ScrollBy(f64),
    /// The viewport changed size.
    Resize { width: f64, height: f64 },
    Click(Point),
    PointerMove(Point),
    /// A nav link for this section id was activated.
    Navigate(String),
    /// The nth nav link (0-based) was activated.
    NavigateNth(usize),
    ToggleMenu,
    /// Host intersection observer callback for a tracked element.
    Intersect { index: usize, is_intersecting: bool },
    /// Host intersection observer callback for a lazy image.
    ImageIntersect { index: usize, is_intersecting: bool },
    Submit(ContactSubmission),
    FilterProjects(String),
    ToggleTheme,
    Quit,
}

/// Deferred work owned by the page scheduler.
///
/// Message timers carry the generation of the message they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimer {
    TypingStep,
    CounterFrame,
    FadeMessage(u64),
    RemoveMessage(u64),
    ScrollFrame,
    ParticleFrame,
}

impl PageTimer {
    /// Timers belonging to the contact form status message.
    pub fn is_message(&self) -> bool {
        matches!(self, PageTimer::FadeMessage(_) | PageTimer::RemoveMessage(_))
    }
}
