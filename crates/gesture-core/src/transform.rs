//! Displacement to card transform mapping.
//!
//! The card tracks the finger 1:1. Tilt grows linearly with horizontal
//! travel up to half a screen width and saturates beyond it.

use swipedeck_common::config::SwipeConfig;
use swipedeck_deck_model::geometry::{Displacement, ScreenSize, TransformState};

/// Default tilt at half a screen width of travel.
pub const DEFAULT_MAX_ROTATION_DEGREES: f64 = 10.0;

/// Maps gesture displacement to the visible card transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMapper {
    half_width: f64,
    max_rotation_degrees: f64,
}

impl TransformMapper {
    pub fn new(screen: ScreenSize, max_rotation_degrees: f64) -> Self {
        Self {
            half_width: screen.half_width(),
            max_rotation_degrees,
        }
    }

    pub fn from_config(screen: ScreenSize, swipe: &SwipeConfig) -> Self {
        Self::new(screen, swipe.max_rotation_degrees)
    }

    /// Compute the transform for a displacement.
    ///
    /// Non-finite displacement maps to `None` so it never reaches the
    /// rendered card.
    pub fn map(&self, displacement: Displacement) -> Option<TransformState> {
        if !displacement.is_finite() {
            return None;
        }
        Some(TransformState {
            offset_x: displacement.x,
            offset_y: displacement.y,
            rotation_degrees: self.rotation_for(displacement.x),
        })
    }

    /// Tilt for a horizontal offset.
    pub fn rotation_for(&self, offset_x: f64) -> f64 {
        interpolate_clamped(
            offset_x,
            [-self.half_width, 0.0, self.half_width],
            [-self.max_rotation_degrees, 0.0, self.max_rotation_degrees],
        )
    }
}

/// Map a displacement with the default ±10° tilt.
pub fn map_to_transform(displacement: Displacement, screen: ScreenSize) -> Option<TransformState> {
    TransformMapper::new(screen, DEFAULT_MAX_ROTATION_DEGREES).map(displacement)
}

/// Piecewise-linear interpolation over ascending `domain`, clamped at both ends.
///
/// A zero-width segment resolves to the value at its upper knot, so a
/// collapsed domain maps its single point to `range[1]`.
pub fn interpolate_clamped(value: f64, domain: [f64; 3], range: [f64; 3]) -> f64 {
    if value < domain[0] {
        return range[0];
    }
    if value > domain[2] {
        return range[2];
    }

    let segment = if value <= domain[1] { 0 } else { 1 };
    let (d0, d1) = (domain[segment], domain[segment + 1]);
    let (r0, r1) = (range[segment], range[segment + 1]);

    let span = d1 - d0;
    if span.abs() < f64::EPSILON {
        return r1;
    }
    r0 + (value - d0) / span * (r1 - r0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenSize {
        ScreenSize::new(400.0, 800.0)
    }

    #[test]
    fn test_offsets_track_finger() {
        let t = map_to_transform(Displacement::new(37.0, -12.5), screen()).unwrap();
        assert_eq!(t.offset_x, 37.0);
        assert_eq!(t.offset_y, -12.5);
    }

    #[test]
    fn test_rotation_linear_region() {
        let t = map_to_transform(Displacement::new(100.0, 0.0), screen()).unwrap();
        assert!((t.rotation_degrees - 5.0).abs() < 1e-9);

        let t = map_to_transform(Displacement::new(-200.0, 0.0), screen()).unwrap();
        assert!((t.rotation_degrees + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_saturates() {
        let t = map_to_transform(Displacement::new(900.0, 0.0), screen()).unwrap();
        assert_eq!(t.rotation_degrees, 10.0);
        let t = map_to_transform(Displacement::new(-900.0, 0.0), screen()).unwrap();
        assert_eq!(t.rotation_degrees, -10.0);
    }

    #[test]
    fn test_vertical_travel_does_not_rotate() {
        let t = map_to_transform(Displacement::new(0.0, -300.0), screen()).unwrap();
        assert_eq!(t.rotation_degrees, 0.0);
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(map_to_transform(Displacement::new(f64::NAN, 0.0), screen()).is_none());
    }

    #[test]
    fn test_custom_max_rotation() {
        let mapper = TransformMapper::new(screen(), 15.0);
        assert!((mapper.rotation_for(100.0) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_collapsed_screen_keeps_card_upright_at_rest() {
        let t = map_to_transform(Displacement::ZERO, ScreenSize::new(0.0, 800.0)).unwrap();
        assert_eq!(t.rotation_degrees, 0.0);
        let t = map_to_transform(Displacement::new(5.0, 0.0), ScreenSize::new(0.0, 800.0)).unwrap();
        assert_eq!(t.rotation_degrees, 10.0);
        let t = map_to_transform(Displacement::new(-5.0, 0.0), ScreenSize::new(0.0, 800.0)).unwrap();
        assert_eq!(t.rotation_degrees, -10.0);
    }

    #[test]
    fn test_interpolation_hits_knots_exactly() {
        let domain = [-200.0, 0.0, 200.0];
        let range = [-10.0, 0.0, 10.0];
        assert_eq!(interpolate_clamped(-200.0, domain, range), -10.0);
        assert_eq!(interpolate_clamped(0.0, domain, range), 0.0);
        assert_eq!(interpolate_clamped(200.0, domain, range), 10.0);
    }
}
