//! Timing Module - clock-driven rate limiting and timers
//!
//! - **Throttle** - at most one call per interval, optional trailing call
//! - **Debounce** - last value of a burst after a quiet period
//! - **Scheduler** - deadline-ordered task table with bulk cancellation
//!
//! Nothing here reads the clock. Callers pass `Instant`s in.

pub mod debounce;
pub mod scheduler;
pub mod throttle;

pub use debounce::Debouncer;
pub use scheduler::{Scheduler, TimerId};
pub use throttle::{wrap, ThrottleGate, Throttled};
