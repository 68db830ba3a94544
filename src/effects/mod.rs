//! Effects Module - cosmetic animations as tick-driven state machines
//!
//! - **Typing** - hero subtitle typing/deleting loop
//! - **Counter** - one-shot count-up for stats figures
//! - **Pointer** - card tilt and cursor follower
//! - **Lazy images** - deferred image sources loaded on first view
//! - **Particles** - drifting particle field with distance links
//!
//! None of these own timers. The page scheduler advances them.

pub mod counter;
pub mod lazy_images;
pub mod particles;
pub mod pointer;
pub mod typing;

pub use counter::{parse_target, CounterAnimation, StatsCounter};
pub use lazy_images::LazyImages;
pub use particles::{Link, Particle, ParticleField};
pub use pointer::{CursorFollower, Tilt, TiltEffect};
pub use typing::TypingEffect;
