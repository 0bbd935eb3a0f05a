//! Exponential catch-up between the native scroll offset and the offset the
//! content is drawn at.

/// Distance (px) under which the smoothed position snaps to its target.
const SNAP_DISTANCE: f64 = 0.5;

/// `ln(100)`: after `smooth` seconds only 1% of the distance is left.
const CATCH_UP_RATE: f64 = 4.605_170_185_988_091;

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroller {
    current: f64,
    target: f64,
    smooth: f64,
}

impl SmoothScroller {
    pub fn new(smooth: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            smooth: smooth.max(0.0),
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Moves both positions, skipping the catch-up.
    pub fn jump_to(&mut self, position: f64) {
        self.current = position;
        self.target = position;
    }

    /// Advances by `dt` seconds and returns the new position.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if self.smooth == 0.0 {
            self.current = self.target;
            return self.current;
        }

        let blend = 1.0 - (-CATCH_UP_RATE * dt.max(0.0) / self.smooth).exp();
        self.current += (self.target - self.current) * blend;
        if (self.target - self.current).abs() < SNAP_DISTANCE {
            self.current = self.target;
        }
        self.current
    }

    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

/// Vertical shift for an element scrolling at `speed` times the page speed.
pub fn parallax_offset(speed: f64, scroll_y: f64) -> f64 {
    scroll_y * (1.0 - speed)
}
