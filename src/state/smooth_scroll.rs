//! Smooth scroll with exponential ease-out.
//!
//! Stands in for the browser's `scrollTo({ behavior: 'smooth' })`. Each frame
//! closes a fixed fraction of the remaining distance, so the motion starts
//! fast and decelerates. Within half a pixel the animation snaps to the
//! target and stops.

/// Distance below which the animation lands on its target.
const SETTLE_DISTANCE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    /// Fraction of the remaining distance covered per frame.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(position: f64, speed: f64) -> Self {
        Self {
            position,
            target: position,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Retarget from wherever the animation currently is.
    pub fn scroll_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump without animating (user scrolled manually).
    pub fn jump_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
    }

    /// Advance one frame. Returns the new position.
    pub fn tick(&mut self) -> f64 {
        let remaining = self.target - self.position;
        if remaining.abs() < SETTLE_DISTANCE {
            self.position = self.target;
        } else {
            self.position += remaining * self.speed;
        }
        self.position
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True until the position has landed on the target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_at_rest() {
        let scroll = SmoothScroll::new(120.0, 0.25);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.position(), 120.0);
    }

    #[test]
    fn test_decelerates_toward_target() {
        let mut scroll = SmoothScroll::new(0.0, 0.25);
        scroll.scroll_to(1000.0);

        let first = scroll.tick();
        let second = scroll.tick();

        assert_eq!(first, 250.0);
        assert!(second > first);
        // Second step covers less ground than the first
        assert!(second - first < first);
    }

    #[test]
    fn test_settles_on_target() {
        let mut scroll = SmoothScroll::new(0.0, 0.25);
        scroll.scroll_to(700.0);

        let mut frames = 0;
        while scroll.is_animating() {
            scroll.tick();
            frames += 1;
            assert!(frames < 100, "animation never settled");
        }

        assert_eq!(scroll.position(), 700.0);
    }

    #[test]
    fn test_scrolls_upward() {
        let mut scroll = SmoothScroll::new(1600.0, 0.5);
        scroll.scroll_to(0.0);

        assert_eq!(scroll.tick(), 800.0);
    }

    #[test]
    fn test_jump_cancels_animation() {
        let mut scroll = SmoothScroll::new(0.0, 0.25);
        scroll.scroll_to(1000.0);
        scroll.tick();

        scroll.jump_to(40.0);

        assert!(!scroll.is_animating());
        assert_eq!(scroll.tick(), 40.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut scroll = SmoothScroll::new(0.0, 5.0);
        scroll.scroll_to(100.0);

        assert_eq!(scroll.tick(), 95.0);
    }
}
