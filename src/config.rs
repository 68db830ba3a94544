//! Page configuration.
//!
//! Every knob has a default matching the live page. A config can be loaded
//! from JSON; missing fields fall back to their defaults.
//!
//! ```ignore
//! use spark_folio::FolioConfig;
//!
//! let config = FolioConfig::from_json(r#"{ "header_offset": 80 }"#)?;
//! assert_eq!(config.header_offset, 80.0);
//! assert_eq!(config.throttle_ms, 100);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Fixed header height subtracted from / added to scroll positions.
pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;

/// Scroll tick rate limit.
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// Quiet period before a resize is applied.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Distance above the viewport bottom an element must cross to reveal.
pub const DEFAULT_REVEAL_MARGIN: f64 = 100.0;

/// Scroll distance after which the navbar switches to its compact style.
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;

/// Viewport widths at or below this are "mobile".
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub header_offset: f64,
    pub throttle_ms: u64,
    /// Process the last suppressed scroll tick once the throttle window ends.
    pub trailing_scroll: bool,
    pub resize_debounce_ms: u64,
    pub reveal_margin: f64,
    pub scrolled_threshold: f64,
    pub mobile_breakpoint: f64,

    // Contact form message lifetime
    pub message_visible_ms: u64,
    pub message_fade_ms: u64,

    // Effects
    pub typing_ms: u64,
    pub deleting_ms: u64,
    pub typing_pause_ms: u64,
    pub counter_duration_ms: u64,
    pub frame_ms: u64,
    pub particle_count: usize,
    pub particle_link_distance: f64,

    // Section layout
    pub page_padding_top: f32,
    pub section_gap: f32,
    pub max_content_width: f32,

    // Terminal input
    pub wheel_step: f64,
    pub cell_width: f64,
    pub cell_height: f64,

    /// Smooth scroll damping per frame, `0.05..=0.95`.
    pub smooth_scroll_speed: f64,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            throttle_ms: DEFAULT_THROTTLE_MS,
            trailing_scroll: false,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            reveal_margin: DEFAULT_REVEAL_MARGIN,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            message_visible_ms: 5000,
            message_fade_ms: 300,
            typing_ms: 100,
            deleting_ms: 50,
            typing_pause_ms: 2000,
            counter_duration_ms: 2000,
            frame_ms: 16,
            particle_count: 50,
            particle_link_distance: 100.0,
            page_padding_top: 64.0,
            section_gap: 80.0,
            max_content_width: 1152.0,
            wheel_step: 48.0,
            cell_width: 8.0,
            cell_height: 16.0,
            smooth_scroll_speed: 0.25,
        }
    }
}

impl FolioConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could work with.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("header_offset", self.header_offset),
            ("reveal_margin", self.reveal_margin),
            ("scrolled_threshold", self.scrolled_threshold),
            ("mobile_breakpoint", self.mobile_breakpoint),
            ("particle_link_distance", self.particle_link_distance),
            ("wheel_step", self.wheel_step),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(FolioError::InvalidValue(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let layout = [
            ("page_padding_top", self.page_padding_top),
            ("section_gap", self.section_gap),
            ("max_content_width", self.max_content_width),
        ];
        for (name, value) in layout {
            if !value.is_finite() || value < 0.0 {
                return Err(FolioError::InvalidValue(format!(
                    "{name} must be a non-negative length, got {value}"
                )));
            }
        }

        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            return Err(FolioError::InvalidValue(
                "cell_width and cell_height must be positive".to_string(),
            ));
        }

        if self.frame_ms == 0 {
            return Err(FolioError::InvalidValue("frame_ms must be at least 1".to_string()));
        }

        if !(0.05..=0.95).contains(&self.smooth_scroll_speed) {
            return Err(FolioError::InvalidValue(format!(
                "smooth_scroll_speed must be within 0.05..=0.95, got {}",
                self.smooth_scroll_speed
            )));
        }

        Ok(())
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Whether a viewport this wide gets desktop-only flourishes.
    pub fn is_desktop(&self, viewport_width: f64) -> bool {
        viewport_width > self.mobile_breakpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FolioConfig::default();

        assert_eq!(config.header_offset, 100.0);
        assert_eq!(config.throttle_interval(), Duration::from_millis(100));
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
        assert!(!config.trailing_scroll);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = FolioConfig::from_json(r#"{ "header_offset": 80, "trailing_scroll": true }"#)
            .unwrap();

        assert_eq!(config.header_offset, 80.0);
        assert!(config.trailing_scroll);
        // Untouched fields keep defaults
        assert_eq!(config.throttle_ms, 100);
        assert_eq!(config.reveal_margin, 100.0);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = FolioConfig::from_json("{ header_offset: ").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_negative_offset() {
        let err = FolioConfig::from_json(r#"{ "header_offset": -5 }"#).unwrap_err();
        assert!(matches!(err, FolioError::InvalidValue(_)));
        assert!(err.to_string().contains("header_offset"));
    }

    #[test]
    fn test_rejects_zero_cells_and_frames() {
        let config = FolioConfig {
            cell_height: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = FolioConfig {
            frame_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_desktop() {
        let config = FolioConfig::default();
        assert!(config.is_desktop(1024.0));
        assert!(!config.is_desktop(768.0));
    }
}
