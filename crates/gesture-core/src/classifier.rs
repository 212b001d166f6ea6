//! Release-time outcome classification.
//!
//! Horizontal decisions win over vertical ones: a diagonal fling that
//! crosses both thresholds is a pass/join, not a details request.

use swipedeck_common::config::SwipeConfig;
use swipedeck_deck_model::geometry::{Displacement, ScreenSize};
use swipedeck_deck_model::outcome::{Outcome, SwipeAction};

/// Threshold-based classifier for released gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeClassifier {
    /// Minimum |x| travel (exclusive) for Left/Right.
    horizontal_threshold: f64,
    /// Maximum y (exclusive, negative) for Up.
    vertical_up_threshold: f64,
}

impl OutcomeClassifier {
    pub fn new(screen: ScreenSize, horizontal_ratio: f64, vertical_ratio: f64) -> Self {
        Self {
            horizontal_threshold: horizontal_ratio * screen.width,
            vertical_up_threshold: -vertical_ratio * screen.height,
        }
    }

    pub fn from_config(screen: ScreenSize, swipe: &SwipeConfig) -> Self {
        Self::new(screen, swipe.horizontal_ratio, swipe.vertical_ratio)
    }

    pub fn horizontal_threshold(&self) -> f64 {
        self.horizontal_threshold
    }

    pub fn vertical_up_threshold(&self) -> f64 {
        self.vertical_up_threshold
    }

    /// Classify a final displacement. Non-finite input is `Cancelled`.
    pub fn classify(&self, d: Displacement) -> Outcome {
        if !d.is_finite() {
            return Outcome::Cancelled;
        }
        if d.x.abs() > self.horizontal_threshold {
            if d.x > 0.0 {
                Outcome::Right
            } else {
                Outcome::Left
            }
        } else if d.y < self.vertical_up_threshold {
            Outcome::Up
        } else {
            Outcome::Cancelled
        }
    }

    /// Displacement a button tap injects so that it classifies as `action`.
    pub fn synthetic_release(&self, action: SwipeAction) -> Displacement {
        // Overshoot by half again so the synthetic release is never borderline.
        let dx = self.horizontal_threshold * 1.5;
        let dy = self.vertical_up_threshold * 1.5;
        match action {
            SwipeAction::Pass => Displacement::new(-dx, 0.0),
            SwipeAction::Join => Displacement::new(dx, 0.0),
            SwipeAction::Details => Displacement::new(0.0, dy),
        }
    }
}

/// Classify with the default 30% width / 20% height thresholds.
pub fn classify(d: Displacement, screen_width: f64, screen_height: f64) -> Outcome {
    let defaults = SwipeConfig::default();
    OutcomeClassifier::from_config(ScreenSize::new(screen_width, screen_height), &defaults)
        .classify(d)
}
