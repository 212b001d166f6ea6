//! Per-gesture displacement tracking.
//!
//! A sampler lives for exactly one touch interaction: it is created on
//! touch-down and consumed on touch-up, so no state can leak from one
//! gesture into the next.

use swipedeck_deck_model::geometry::Displacement;

/// Transient state of the active touch interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Displacement captured at touch-down.
    pub start_displacement: Displacement,
    /// Offset accumulated since touch-down.
    pub current_displacement: Displacement,
    pub is_active: bool,
}

/// Samples pointer movement for a single gesture.
#[derive(Debug)]
pub struct GestureSampler {
    state: GestureState,
}

impl GestureSampler {
    /// Begin a gesture with zero displacement.
    pub fn on_touch_start() -> Self {
        Self {
            state: GestureState {
                start_displacement: Displacement::ZERO,
                current_displacement: Displacement::ZERO,
                is_active: true,
            },
        }
    }

    /// Record the cumulative offset `(dx, dy)` from the touch-down point.
    ///
    /// Returns the updated displacement, or `None` if the gesture has
    /// already been released.
    pub fn on_touch_move(&mut self, dx: f64, dy: f64) -> Option<Displacement> {
        if !self.state.is_active {
            return None;
        }
        let start = self.state.start_displacement;
        self.state.current_displacement = Displacement::new(start.x + dx, start.y + dy);
        Some(self.state.current_displacement)
    }

    /// Release the gesture and return its final displacement.
    pub fn on_touch_end(mut self) -> Displacement {
        self.state.is_active = false;
        self.state.current_displacement
    }

    /// Current accumulated displacement.
    pub fn displacement(&self) -> Displacement {
        self.state.current_displacement
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_active_at_zero() {
        let sampler = GestureSampler::on_touch_start();
        assert!(sampler.is_active());
        assert_eq!(sampler.displacement(), Displacement::ZERO);
    }

    #[test]
    fn test_moves_are_cumulative_not_additive() {
        let mut sampler = GestureSampler::on_touch_start();
        sampler.on_touch_move(10.0, 5.0);
        sampler.on_touch_move(30.0, -2.0);
        assert_eq!(sampler.displacement(), Displacement::new(30.0, -2.0));
    }

    #[test]
    fn test_end_returns_final_displacement() {
        let mut sampler = GestureSampler::on_touch_start();
        sampler.on_touch_move(150.0, 0.0);
        assert_eq!(sampler.on_touch_end(), Displacement::new(150.0, 0.0));
    }

    #[test]
    fn test_move_after_release_is_ignored() {
        let mut sampler = GestureSampler::on_touch_start();
        sampler.on_touch_move(12.0, 0.0);
        sampler.state.is_active = false;
        assert_eq!(sampler.on_touch_move(99.0, 99.0), None);
        assert_eq!(sampler.displacement(), Displacement::new(12.0, 0.0));
    }
}
