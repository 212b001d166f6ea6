//! Completion animations.
//!
//! Committed swipes are thrown off-screen with a damped spring; cancelled
//! gestures ease back to the centre over a fixed duration. Either way an
//! [`Animation`] reports completion on exactly one frame.

use swipedeck_common::clock::FrameClock;
use swipedeck_common::config::{AnimationConfig, SwipeConfig};
use swipedeck_deck_model::geometry::{ScreenSize, TransformState};
use swipedeck_deck_model::outcome::Outcome;

/// Upper bound on simulated spring time before snapping to the target.
const MAX_SPRING_SECS: f64 = 5.0;

/// One-dimensional damped spring, integrated with semi-implicit Euler.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub position: f64,
    pub target: f64,
    pub velocity: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl Spring {
    pub fn new(position: f64, target: f64, config: &AnimationConfig) -> Self {
        Self {
            position,
            target,
            velocity: 0.0,
            stiffness: config.stiffness.max(0.0001),
            damping: config.damping.max(0.0),
            mass: config.mass.max(0.0001),
        }
    }

    pub fn step(&mut self, dt: f64) -> f64 {
        let dt = dt.max(0.000_001);
        let acceleration =
            (self.stiffness * (self.target - self.position) - self.damping * self.velocity)
                / self.mass;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.position
    }

    pub fn is_at_rest(&self, epsilon: f64) -> bool {
        (self.target - self.position).abs() < epsilon && self.velocity.abs() < epsilon
    }

    fn snap(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Spring {
        x: Spring,
        y: Spring,
        rotation: Spring,
        epsilon: f64,
        elapsed: f64,
    },
    Eased {
        from: TransformState,
        to: TransformState,
        duration: f64,
        elapsed: f64,
    },
}

/// A single frame of animation output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub transform: TransformState,
    /// True on the single frame where the animation settles.
    pub completed: bool,
}

/// An in-flight transform animation.
#[derive(Debug, Clone)]
pub struct Animation {
    motion: Motion,
    target: TransformState,
    settled: bool,
    completion_reported: bool,
}

impl Animation {
    /// Spring every component of the transform toward `target`.
    pub fn spring(from: TransformState, target: TransformState, config: &AnimationConfig) -> Self {
        Self {
            motion: Motion::Spring {
                x: Spring::new(from.offset_x, target.offset_x, config),
                y: Spring::new(from.offset_y, target.offset_y, config),
                rotation: Spring::new(from.rotation_degrees, target.rotation_degrees, config),
                epsilon: config.settle_epsilon,
                elapsed: 0.0,
            },
            target,
            settled: false,
            completion_reported: false,
        }
    }

    /// Ease-out from `from` to `target` over `duration_secs`.
    pub fn eased(from: TransformState, target: TransformState, duration_secs: f64) -> Self {
        Self {
            motion: Motion::Eased {
                from,
                to: target,
                duration: duration_secs.max(0.0),
                elapsed: 0.0,
            },
            target,
            settled: false,
            completion_reported: false,
        }
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> AnimationFrame {
        if !self.settled {
            self.settled = match &mut self.motion {
                Motion::Spring {
                    x,
                    y,
                    rotation,
                    epsilon,
                    elapsed,
                } => {
                    x.step(dt);
                    y.step(dt);
                    rotation.step(dt);
                    *elapsed += dt;

                    let rested = x.is_at_rest(*epsilon)
                        && y.is_at_rest(*epsilon)
                        && rotation.is_at_rest(*epsilon);
                    if rested || *elapsed >= MAX_SPRING_SECS {
                        x.snap();
                        y.snap();
                        rotation.snap();
                        true
                    } else {
                        false
                    }
                }
                Motion::Eased {
                    duration, elapsed, ..
                } => {
                    *elapsed += dt;
                    // Tolerate float drift from summing frame steps.
                    *elapsed + 1e-9 >= *duration
                }
            };
        }

        let completed = self.settled && !self.completion_reported;
        if completed {
            self.completion_reported = true;
        }

        AnimationFrame {
            transform: self.transform(),
            completed,
        }
    }

    /// Current transform value.
    pub fn transform(&self) -> TransformState {
        if self.settled {
            return self.target;
        }
        match &self.motion {
            Motion::Spring {
                x, y, rotation, ..
            } => TransformState::new(x.position, y.position, rotation.position),
            Motion::Eased {
                from,
                to,
                duration,
                elapsed,
            } => {
                let t = if *duration <= 0.0 {
                    1.0
                } else {
                    (*elapsed / *duration).clamp(0.0, 1.0)
                };
                TransformState::lerp(from, to, ease_out_cubic(t))
            }
        }
    }

    pub fn target(&self) -> TransformState {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

/// Builds the resolution animation for a released gesture.
#[derive(Debug, Clone)]
pub struct CompletionAnimator {
    screen: ScreenSize,
    exit_overshoot: f64,
    config: AnimationConfig,
}

impl CompletionAnimator {
    pub fn new(screen: ScreenSize, swipe: &SwipeConfig, config: AnimationConfig) -> Self {
        Self {
            screen,
            exit_overshoot: swipe.exit_overshoot,
            config,
        }
    }

    /// Where the card should come to rest for `outcome`.
    pub fn terminal_transform(&self, outcome: Outcome, current: TransformState) -> TransformState {
        let exit_x = self.screen.width * self.exit_overshoot;
        match outcome {
            Outcome::Right => TransformState {
                offset_x: exit_x,
                ..current
            },
            Outcome::Left => TransformState {
                offset_x: -exit_x,
                ..current
            },
            Outcome::Up => TransformState {
                offset_y: -self.screen.height,
                ..current
            },
            Outcome::Cancelled => TransformState::ORIGIN,
        }
    }

    /// Animate from `current` to the terminal transform for `outcome`.
    pub fn animate_to(&self, outcome: Outcome, current: TransformState) -> Animation {
        let target = self.terminal_transform(outcome, current);
        if outcome.is_commit() {
            Animation::spring(current, target, &self.config)
        } else {
            // Snap to whole frames so the ease lands exactly on a tick.
            let clock = self.frame_clock();
            let frames = clock.frames_for_ms(self.config.cancel_duration_ms);
            Animation::eased(current, target, frames as f64 * clock.dt_secs())
        }
    }

    /// Frame clock matching the configured frame rate.
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.config.frame_rate_hz)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
