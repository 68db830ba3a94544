//! Stats counters - count up to a figure once the figure scrolls into view.
//!
//! Labels like `"40+"` animate from 0 to 40 over a fixed duration in
//! frame-sized steps, rendering `"{n}+"` along the way. Each counter starts
//! at most once.

use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::config::FolioConfig;
use crate::types::Viewport;

/// Leading integer of a label, the way the page reads `"12+"` as 12.
///
/// Leading whitespace is skipped; anything after the digits is ignored.
pub fn parse_target(label: &str) -> Option<u64> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

// =============================================================================
// SINGLE ANIMATION
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration: Duration, frame: Duration) -> Self {
        let frames = (duration.as_secs_f64() / frame.as_secs_f64()).max(1.0);
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    /// Advance one frame. Returns the text to display.
    pub fn tick(&mut self) -> String {
        if !self.done {
            self.current += self.step;
            if self.current >= self.target as f64 {
                self.done = true;
            }
        }

        if self.done {
            format!("{}+", self.target)
        } else {
            format!("{}+", self.current.floor() as u64)
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

// =============================================================================
// COUNTER SET
// =============================================================================

struct Counter {
    top: f64,
    started: bool,
    animation: Option<CounterAnimation>,
    display: Signal<String>,
}

pub struct StatsCounter {
    reveal_margin: f64,
    duration: Duration,
    frame: Duration,
    counters: Vec<Counter>,
}

impl StatsCounter {
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            reveal_margin: config.reveal_margin,
            duration: Duration::from_millis(config.counter_duration_ms),
            frame: config.frame_interval(),
            counters: Vec::new(),
        }
    }

    /// Track a counter showing `label`, whose top sits at `top` in the document.
    /// Returns its index.
    pub fn register(&mut self, label: impl Into<String>, top: f64) -> usize {
        self.counters.push(Counter {
            top,
            started: false,
            animation: None,
            display: signal(label.into()),
        });
        self.counters.len() - 1
    }

    /// Move counter `index` after a layout change. Started counters stay started.
    pub fn set_top(&mut self, index: usize, top: f64) {
        if let Some(counter) = self.counters.get_mut(index) {
            counter.top = top;
        }
    }

    pub fn top(&self, index: usize) -> Option<f64> {
        self.counters.get(index).map(|c| c.top)
    }

    /// Start every counter that has crossed the reveal line.
    ///
    /// Started counters render their first frame immediately. Returns how
    /// many animations started.
    pub fn check(&mut self, viewport: &Viewport) -> usize {
        let line = viewport.height - self.reveal_margin;
        let mut started = 0;

        for (index, counter) in self.counters.iter_mut().enumerate() {
            if counter.started || viewport.relative_top(counter.top) >= line {
                continue;
            }
            counter.started = true;

            // Non-numeric labels stay as written
            let Some(target) = parse_target(&counter.display.get()) else {
                continue;
            };
            let mut animation = CounterAnimation::new(target, self.duration, self.frame);
            counter.display.set(animation.tick());
            if !animation.is_done() {
                counter.animation = Some(animation);
            }
            debug!(index, target, "counter started");
            started += 1;
        }

        started
    }

    /// Advance every running animation one frame.
    ///
    /// Returns `true` while any animation still needs frames.
    pub fn tick(&mut self) -> bool {
        for counter in &mut self.counters {
            if let Some(animation) = counter.animation.as_mut() {
                counter.display.set(animation.tick());
                if animation.is_done() {
                    counter.animation = None;
                }
            }
        }
        self.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.counters.iter().any(|c| c.animation.is_some())
    }

    pub fn display(&self, index: usize) -> Option<String> {
        self.counters.get(index).map(|c| c.display.get())
    }

    pub fn display_signal(&self, index: usize) -> Option<Signal<String>> {
        self.counters.get(index).map(|c| c.display.clone())
    }

    pub fn is_started(&self, index: usize) -> bool {
        self.counters.get(index).is_some_and(|c| c.started)
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
