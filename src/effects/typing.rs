//! Typing effect - types, pauses, deletes and cycles through phrases.
//!
//! A step writes or erases one character and returns the delay before the
//! next step. The owner schedules that delay; the effect keeps no timer.

use std::time::Duration;

use spark_signals::{signal, Signal};

use crate::config::FolioConfig;

pub struct TypingEffect {
    texts: Vec<String>,
    typing: Duration,
    deleting: Duration,
    pause: Duration,
    text_index: usize,
    char_index: usize,
    is_deleting: bool,
    display: Signal<String>,
}

impl TypingEffect {
    pub fn new(texts: Vec<String>, typing: Duration, deleting: Duration, pause: Duration) -> Self {
        Self {
            texts,
            typing,
            deleting,
            pause,
            text_index: 0,
            char_index: 0,
            is_deleting: false,
            display: signal(String::new()),
        }
    }

    pub fn from_config(texts: Vec<String>, config: &FolioConfig) -> Self {
        Self::new(
            texts,
            Duration::from_millis(config.typing_ms),
            Duration::from_millis(config.deleting_ms),
            Duration::from_millis(config.typing_pause_ms),
        )
    }

    /// An effect with no phrases never steps.
    pub fn is_active(&self) -> bool {
        !self.texts.is_empty()
    }

    /// Advance one character. Returns the delay until the next step,
    /// or `None` when there is nothing to type.
    pub fn step(&mut self) -> Option<Duration> {
        let current = self.texts.get(self.text_index)?;
        let len = current.chars().count();

        if self.is_deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }
        self.display
            .set(current.chars().take(self.char_index).collect());

        let mut delay = if self.is_deleting {
            self.deleting
        } else {
            self.typing
        };

        if !self.is_deleting && self.char_index == len {
            delay = self.pause;
            self.is_deleting = true;
        } else if self.is_deleting && self.char_index == 0 {
            self.is_deleting = false;
            self.text_index = (self.text_index + 1) % self.texts.len();
        }

        Some(delay)
    }

    pub fn text(&self) -> String {
        self.display.get()
    }

    pub fn text_signal(&self) -> Signal<String> {
        self.display.clone()
    }

    /// Index of the phrase currently being typed or erased.
    pub fn phrase_index(&self) -> usize {
        self.text_index
    }
}
