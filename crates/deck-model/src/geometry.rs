//! Displacement, screen, and transform types.
//!
//! All values are in screen points. Negative y is upward.

use serde::{Deserialize, Serialize};

/// Cumulative pointer offset from the touch-down origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub x: f64,
    pub y: f64,
}

impl Displacement {
    /// Zero displacement.
    pub const ZERO: Displacement = Displacement { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Screen dimensions the card stack is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }
}

impl From<swipedeck_common::ScreenConfig> for ScreenSize {
    fn from(config: swipedeck_common::ScreenConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

/// Visual transform applied to the visible card.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation_degrees: f64,
}

impl TransformState {
    /// Untransformed card at rest.
    pub const ORIGIN: TransformState = TransformState {
        offset_x: 0.0,
        offset_y: 0.0,
        rotation_degrees: 0.0,
    };

    pub fn new(offset_x: f64, offset_y: f64, rotation_degrees: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            rotation_degrees,
        }
    }

    /// Whether this transform is exactly at rest.
    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// Linearly interpolate between two transforms.
    pub fn lerp(a: &TransformState, b: &TransformState, t: f64) -> TransformState {
        let t = t.clamp(0.0, 1.0);
        TransformState {
            offset_x: a.offset_x + (b.offset_x - a.offset_x) * t,
            offset_y: a.offset_y + (b.offset_y - a.offset_y) * t,
            rotation_degrees: a.rotation_degrees + (b.rotation_degrees - a.rotation_degrees) * t,
        }
    }
}
