//! Discovery session: the full gesture-to-decision loop over one deck.
//!
//! ```text
//! touch_start -> touch_move* -> touch_end -> tick* -> (commit | reset)
//! ```
//!
//! Releasing a gesture classifies it and starts the completion animation.
//! The queue only changes on the frame that animation settles, so the next
//! card never renders while the previous one is still flying off-screen.
//! Input that arrives while an animation is pending is dropped.

use swipedeck_common::clock::{FrameClock, SessionClock};
use swipedeck_common::config::AppConfig;
use swipedeck_deck_model::card::Card;
use swipedeck_deck_model::event::TouchKind;
use swipedeck_deck_model::geometry::{Displacement, ScreenSize, TransformState};
use swipedeck_deck_model::outcome::{CommitEvent, FeedbackStyle, Outcome, SwipeAction};

use crate::animator::{Animation, CompletionAnimator};
use crate::classifier::OutcomeClassifier;
use crate::queue::{CardQueue, QueueState, QueueTransition};
use crate::sampler::GestureSampler;
use crate::sink::CommitSink;
use crate::transform::TransformMapper;

/// What the session is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for a touch on the current card.
    Idle,
    /// A finger is down and dragging the card.
    Dragging,
    /// A released card is animating to its resting place.
    Settling,
    /// No cards left.
    Exhausted,
}

/// Whether an input was acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Accepted,
    Ignored(IgnoreReason),
}

/// Why an input was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Exhausted,
    Settling,
    GestureInProgress,
    NoActiveGesture,
}

/// How a released gesture finished once its animation settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Committed { event: CommitEvent, exhausted: bool },
    Cancelled,
}

/// Output of a single animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFrame {
    /// Transform to render for the top card.
    pub transform: TransformState,
    /// Set on the frame the animation settled.
    pub resolution: Option<Resolution>,
}

#[derive(Debug)]
struct PendingResolution {
    animation: Animation,
    outcome: Outcome,
}

/// Drives the swipe pipeline over a finite queue of cards.
pub struct DiscoverySession<C, S> {
    queue: CardQueue<C>,
    sampler: Option<GestureSampler>,
    pending: Option<PendingResolution>,
    mapper: TransformMapper,
    classifier: OutcomeClassifier,
    animator: CompletionAnimator,
    frame_clock: FrameClock,
    clock: SessionClock,
    sink: S,
}

impl<C: Card, S: CommitSink> DiscoverySession<C, S> {
    pub fn new(cards: Vec<C>, sink: S, config: &AppConfig) -> Self {
        let screen = ScreenSize::from(config.screen);
        let animator = CompletionAnimator::new(screen, &config.swipe, config.animation);
        let frame_clock = animator.frame_clock();

        let queue = CardQueue::new(cards);
        tracing::debug!(
            cards = queue.len(),
            width = screen.width,
            height = screen.height,
            "Discovery session started"
        );

        Self {
            queue,
            sampler: None,
            pending: None,
            mapper: TransformMapper::from_config(screen, &config.swipe),
            classifier: OutcomeClassifier::from_config(screen, &config.swipe),
            animator,
            frame_clock,
            clock: SessionClock::start(),
            sink,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.pending.is_some() {
            SessionPhase::Settling
        } else if self.queue.state() == QueueState::Exhausted {
            SessionPhase::Exhausted
        } else if self.sampler.is_some() {
            SessionPhase::Dragging
        } else {
            SessionPhase::Idle
        }
    }

    /// Finger down on the current card.
    pub fn touch_start(&mut self) -> InputDisposition {
        match self.phase() {
            SessionPhase::Idle => {
                self.sampler = Some(GestureSampler::on_touch_start());
                tracing::trace!(cursor = self.queue.cursor(), "Gesture started");
                InputDisposition::Accepted
            }
            phase => self.ignore(phase, "touch_start"),
        }
    }

    /// Finger moved to cumulative offset `(dx, dy)`.
    ///
    /// Returns the transform to render, or `None` when the move was
    /// ignored or carried a non-finite offset.
    pub fn touch_move(&mut self, dx: f64, dy: f64) -> Option<TransformState> {
        let sampler = self.sampler.as_mut()?;
        let displacement = sampler.on_touch_move(dx, dy)?;
        let transform = self.mapper.map(displacement)?;
        self.queue.set_transform(transform);
        Some(transform)
    }

    /// Finger lifted. Classifies the gesture and starts its animation.
    pub fn touch_end(&mut self) -> Option<Outcome> {
        let sampler = self.sampler.take()?;
        let displacement = sampler.on_touch_end();
        Some(self.release(displacement))
    }

    /// Pass/Join/Details button. Behaves like a drag released past the
    /// matching threshold.
    pub fn press(&mut self, action: SwipeAction) -> Option<Outcome> {
        match self.phase() {
            SessionPhase::Idle => {
                let displacement = self.classifier.synthetic_release(action);
                Some(self.release(displacement))
            }
            phase => {
                self.ignore(phase, "button");
                None
            }
        }
    }

    /// Route a recorded touch event.
    pub fn apply(&mut self, kind: &TouchKind) -> InputDisposition {
        match kind {
            TouchKind::TouchStart => self.touch_start(),
            TouchKind::TouchMove { dx, dy } => {
                let phase = self.phase();
                if phase != SessionPhase::Dragging {
                    return self.ignore(phase, "touch_move");
                }
                // A non-finite move is still recorded; it cancels on release.
                self.touch_move(*dx, *dy);
                InputDisposition::Accepted
            }
            TouchKind::TouchEnd => match self.touch_end() {
                Some(_) => InputDisposition::Accepted,
                None => {
                    let phase = self.phase();
                    self.ignore(phase, "touch_end")
                }
            },
            TouchKind::Button { action } => match self.press(*action) {
                Some(_) => InputDisposition::Accepted,
                None => InputDisposition::Ignored(reason_for(self.phase())),
            },
        }
    }

    /// Advance the pending animation by one frame.
    ///
    /// Returns `None` when nothing is animating.
    pub fn tick(&mut self) -> Option<SessionFrame> {
        let pending = self.pending.as_mut()?;
        let frame = pending.animation.step(self.frame_clock.dt_secs());
        self.frame_clock.tick();
        self.queue.set_transform(frame.transform);

        if !frame.completed {
            return Some(SessionFrame {
                transform: frame.transform,
                resolution: None,
            });
        }

        let outcome = pending.outcome;
        self.pending = None;
        let resolution = self.resolve(outcome);
        Some(SessionFrame {
            transform: self.queue.transform(),
            resolution,
        })
    }

    /// Step frames until the pending animation settles.
    pub fn settle(&mut self) -> Option<Resolution> {
        while let Some(frame) = self.tick() {
            if frame.resolution.is_some() {
                return frame.resolution;
            }
        }
        None
    }

    /// Like [`settle`](Self::settle), but paced at the configured frame
    /// rate. `on_frame` receives every rendered transform.
    pub async fn settle_realtime<F>(&mut self, mut on_frame: F) -> Option<Resolution>
    where
        F: FnMut(TransformState),
    {
        let mut interval = tokio::time::interval(self.frame_clock.interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        while self.pending.is_some() {
            interval.tick().await;
            if let Some(frame) = self.tick() {
                on_frame(frame.transform);
                if frame.resolution.is_some() {
                    return frame.resolution;
                }
            }
        }
        None
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_exhausted()
    }

    pub fn current_card(&self) -> Option<&C> {
        self.queue.current()
    }

    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    pub fn transform(&self) -> TransformState {
        self.queue.transform()
    }

    pub fn queue(&self) -> &CardQueue<C> {
        &self.queue
    }

    pub fn classifier(&self) -> &OutcomeClassifier {
        &self.classifier
    }

    /// Simulated time spent animating so far.
    pub fn animated_secs(&self) -> f64 {
        self.frame_clock.elapsed_secs()
    }

    pub fn frame_clock(&self) -> &FrameClock {
        &self.frame_clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn release(&mut self, displacement: Displacement) -> Outcome {
        let outcome = self.classifier.classify(displacement);
        let from = self.queue.transform();
        tracing::debug!(
            dx = displacement.x,
            dy = displacement.y,
            outcome = %outcome,
            "Gesture released"
        );
        self.pending = Some(PendingResolution {
            animation: self.animator.animate_to(outcome, from),
            outcome,
        });
        outcome
    }

    fn resolve(&mut self, outcome: Outcome) -> Option<Resolution> {
        match self.queue.apply(outcome) {
            QueueTransition::Advanced {
                card_id,
                position,
                outcome,
                exhausted,
            } => {
                let event = CommitEvent {
                    card_id,
                    outcome,
                    feedback: outcome.feedback().unwrap_or(FeedbackStyle::Medium),
                    position,
                    session_ms: self.clock.elapsed_ms(),
                    recorded_at: chrono::Utc::now(),
                };
                tracing::debug!(
                    card = %event.card_id,
                    outcome = %outcome,
                    label = outcome.label(),
                    "Card decided"
                );

                if let Err(e) = self.sink.record(&event) {
                    tracing::warn!(card = %event.card_id, error = %e, "Failed to record decision");
                }

                if exhausted {
                    tracing::info!(cards = self.queue.len(), "Deck exhausted");
                    if let Err(e) = self.sink.exhausted() {
                        tracing::warn!(error = %e, "Failed to signal deck exhaustion");
                    }
                }

                Some(Resolution::Committed { event, exhausted })
            }
            QueueTransition::Reset => Some(Resolution::Cancelled),
            QueueTransition::Ignored => None,
        }
    }

    fn ignore(&self, phase: SessionPhase, input: &'static str) -> InputDisposition {
        let reason = reason_for(phase);
        tracing::trace!(input, ?reason, "Input dropped");
        InputDisposition::Ignored(reason)
    }
}

fn reason_for(phase: SessionPhase) -> IgnoreReason {
    match phase {
        SessionPhase::Exhausted => IgnoreReason::Exhausted,
        SessionPhase::Settling => IgnoreReason::Settling,
        SessionPhase::Dragging => IgnoreReason::GestureInProgress,
        SessionPhase::Idle => IgnoreReason::NoActiveGesture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipedeck_common::error::{SwipedeckError, SwipedeckResult};
    use swipedeck_deck_model::card::{Activity, CardId};

    fn cards(ids: &[&str]) -> Vec<Activity> {
        ids.iter().map(|id| Activity::new(*id, *id)).collect()
    }

    fn session(ids: &[&str]) -> DiscoverySession<Activity, Vec<CommitEvent>> {
        DiscoverySession::new(cards(ids), Vec::new(), &AppConfig::default())
    }

    fn drag(s: &mut DiscoverySession<Activity, Vec<CommitEvent>>, dx: f64, dy: f64) -> Outcome {
        assert_eq!(s.touch_start(), InputDisposition::Accepted);
        s.touch_move(dx / 2.0, dy / 2.0);
        s.touch_move(dx, dy);
        s.touch_end().unwrap()
    }

    #[test]
    fn test_queue_does_not_advance_until_animation_settles() {
        let mut s = session(&["A", "B", "C"]);
        assert_eq!(drag(&mut s, 150.0, 0.0), Outcome::Right);

        assert_eq!(s.phase(), SessionPhase::Settling);
        assert_eq!(s.cursor(), 0);

        let frame = s.tick().unwrap();
        assert!(frame.resolution.is_none());
        assert_eq!(s.cursor(), 0);
        assert!(s.sink().is_empty());

        let resolution = s.settle().unwrap();
        assert!(matches!(
            resolution,
            Resolution::Committed {
                exhausted: false,
                ..
            }
        ));
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.current_card().unwrap().id, CardId::new("B"));
        assert!(s.transform().is_origin());
        assert_eq!(s.sink().len(), 1);
        assert_eq!(s.sink()[0].card_id, CardId::new("A"));
    }

    #[test]
    fn test_touch_start_dropped_while_settling() {
        let mut s = session(&["A", "B"]);
        drag(&mut s, -200.0, 0.0);
        assert_eq!(
            s.touch_start(),
            InputDisposition::Ignored(IgnoreReason::Settling)
        );
        assert_eq!(s.touch_move(10.0, 10.0), None);
        assert_eq!(s.press(SwipeAction::Join), None);
        s.settle();
        assert_eq!(s.touch_start(), InputDisposition::Accepted);
    }

    #[test]
    fn test_second_touch_start_while_dragging_is_ignored() {
        let mut s = session(&["A"]);
        s.touch_start();
        s.touch_move(40.0, 0.0);
        assert_eq!(
            s.touch_start(),
            InputDisposition::Ignored(IgnoreReason::GestureInProgress)
        );
        assert_eq!(s.transform().offset_x, 40.0);
    }

    #[test]
    fn test_cancel_springs_back_without_advancing() {
        let mut s = session(&["A"]);
        assert_eq!(drag(&mut s, 20.0, -10.0), Outcome::Cancelled);
        assert_eq!(s.settle(), Some(Resolution::Cancelled));
        assert_eq!(s.cursor(), 0);
        assert!(s.transform().is_origin());
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.sink().is_empty());
    }

    #[test]
    fn test_cancel_settles_in_configured_frame_count() {
        let config = AppConfig::default();
        let mut s = session(&["A"]);
        assert_eq!(drag(&mut s, 20.0, -10.0), Outcome::Cancelled);

        let mut frames = 0;
        loop {
            let frame = s.tick().unwrap();
            frames += 1;
            if frame.resolution.is_some() {
                assert_eq!(frame.resolution, Some(Resolution::Cancelled));
                break;
            }
        }

        let expected = s
            .frame_clock()
            .frames_for_ms(config.animation.cancel_duration_ms);
        assert_eq!(expected, 12);
        assert_eq!(frames, expected);
        assert!((s.animated_secs() - 0.2).abs() < 1e-9);
        assert!(s.tick().is_none());
    }

    #[test]
    fn test_nan_move_never_reaches_transform_and_cancels() {
        let mut s = session(&["A"]);
        s.touch_start();
        s.touch_move(30.0, 0.0);
        assert_eq!(s.touch_move(f64::NAN, 0.0), None);
        assert_eq!(s.transform().offset_x, 30.0);
        assert_eq!(s.touch_end(), Some(Outcome::Cancelled));
        s.settle();
        assert!(s.transform().is_origin());
    }

    #[test]
    fn test_button_press_commits_like_a_drag() {
        let mut s = session(&["A", "B"]);
        assert_eq!(s.press(SwipeAction::Details), Some(Outcome::Up));
        let resolution = s.settle().unwrap();
        match resolution {
            Resolution::Committed { event, .. } => {
                assert_eq!(event.outcome, Outcome::Up);
                assert_eq!(event.feedback, FeedbackStyle::Light);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_session_ignores_everything() {
        let mut s = session(&["A"]);
        drag(&mut s, 300.0, 0.0);
        let resolution = s.settle().unwrap();
        assert!(matches!(resolution, Resolution::Committed { exhausted: true, .. }));
        assert_eq!(s.phase(), SessionPhase::Exhausted);

        assert_eq!(
            s.touch_start(),
            InputDisposition::Ignored(IgnoreReason::Exhausted)
        );
        assert_eq!(s.touch_move(100.0, 0.0), None);
        assert_eq!(s.touch_end(), None);
        assert!(s.transform().is_origin());
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_empty_deck_starts_exhausted() {
        let mut s = session(&[]);
        assert_eq!(s.phase(), SessionPhase::Exhausted);
        assert_eq!(s.press(SwipeAction::Pass), None);
    }

    #[test]
    fn test_apply_routes_trace_events() {
        let mut s = session(&["A", "B"]);
        assert_eq!(
            s.apply(&TouchKind::TouchMove { dx: 1.0, dy: 1.0 }),
            InputDisposition::Ignored(IgnoreReason::NoActiveGesture)
        );
        assert_eq!(s.apply(&TouchKind::TouchStart), InputDisposition::Accepted);
        assert_eq!(
            s.apply(&TouchKind::TouchMove {
                dx: -150.0,
                dy: 0.0
            }),
            InputDisposition::Accepted
        );
        assert_eq!(s.apply(&TouchKind::TouchEnd), InputDisposition::Accepted);
        assert_eq!(
            s.apply(&TouchKind::Button {
                action: SwipeAction::Join
            }),
            InputDisposition::Ignored(IgnoreReason::Settling)
        );
    }

    struct FailingSink {
        attempts: usize,
    }

    impl CommitSink for FailingSink {
        fn record(&mut self, _event: &CommitEvent) -> SwipedeckResult<()> {
            self.attempts += 1;
            Err(SwipedeckError::decision_log("downstream unavailable"))
        }
    }

    #[test]
    fn test_sink_failure_does_not_block_advance() {
        let mut s = DiscoverySession::new(
            cards(&["A", "B"]),
            FailingSink { attempts: 0 },
            &AppConfig::default(),
        );
        s.touch_start();
        s.touch_move(200.0, 0.0);
        s.touch_end();
        assert!(matches!(s.settle(), Some(Resolution::Committed { .. })));
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.sink().attempts, 1);
    }

    #[tokio::test]
    async fn test_settle_realtime_reports_frames() {
        let mut config = AppConfig::default();
        config.animation.frame_rate_hz = 1_000;
        config.animation.cancel_duration_ms = 20;
        let mut s = DiscoverySession::new(cards(&["A"]), Vec::new(), &config);

        s.touch_start();
        s.touch_move(10.0, 0.0);
        s.touch_end();

        let mut frames = Vec::new();
        let resolution = s.settle_realtime(|t| frames.push(t)).await;
        assert_eq!(resolution, Some(Resolution::Cancelled));
        assert_eq!(frames.len(), 20);
        assert!(frames.last().unwrap().is_origin());
    }
}
