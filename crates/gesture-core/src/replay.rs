//! Replay recorded touch traces through a session.
//!
//! Time between trace events is spent stepping any pending animation at
//! the session frame rate, so a trace recorded with realistic pauses
//! resolves exactly like the live interaction did. Input that lands while
//! a card is still animating is dropped, as it would be on device.
//!
//! [`replay`] simulates that time; [`replay_realtime`] waits it out on the
//! tokio clock and renders frames as it goes.

use std::time::Duration;

use swipedeck_deck_model::card::Card;
use swipedeck_deck_model::event::TouchEvent;
use swipedeck_deck_model::geometry::TransformState;
use swipedeck_deck_model::outcome::CommitEvent;

use crate::session::{DiscoverySession, InputDisposition, Resolution};
use crate::sink::CommitSink;

/// Summary of a replayed trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Commits in the order they resolved.
    pub commits: Vec<CommitEvent>,
    /// Gestures that snapped back.
    pub cancelled: usize,
    pub accepted_inputs: usize,
    pub ignored_inputs: usize,
    /// Whether the deck ran out.
    pub exhausted: bool,
    /// Simulated animation time.
    pub animated_secs: f64,
}

impl ReplayReport {
    fn record(&mut self, resolution: Option<Resolution>) {
        match resolution {
            Some(Resolution::Committed { event, exhausted }) => {
                tracing::info!(
                    card = %event.card_id,
                    decision = event.outcome.label(),
                    "Replayed decision"
                );
                self.exhausted |= exhausted;
                self.commits.push(event);
            }
            Some(Resolution::Cancelled) => self.cancelled += 1,
            None => {}
        }
    }

    fn input<C: Card, S: CommitSink>(
        &mut self,
        session: &mut DiscoverySession<C, S>,
        event: &TouchEvent,
    ) {
        match session.apply(&event.kind) {
            InputDisposition::Accepted => self.accepted_inputs += 1,
            InputDisposition::Ignored(reason) => {
                tracing::debug!(t = event.timestamp_ms, ?reason, "Trace event dropped");
                self.ignored_inputs += 1;
            }
        }
    }

    fn finish<C: Card, S: CommitSink>(&mut self, session: &DiscoverySession<C, S>) {
        self.exhausted |= session.is_exhausted();
        self.animated_secs = session.animated_secs();
        tracing::debug!(
            commits = self.commits.len(),
            cancelled = self.cancelled,
            ignored = self.ignored_inputs,
            "Trace replayed"
        );
    }
}

/// Feed `events` through `session`, then let the final animation settle.
pub fn replay<C, S>(session: &mut DiscoverySession<C, S>, events: &[TouchEvent]) -> ReplayReport
where
    C: Card,
    S: CommitSink,
{
    let mut report = ReplayReport::default();
    // Budget is kept in ms * hz so frame boundaries stay exact.
    let hz = session.frame_clock().hz() as u64;
    let mut budget: u64 = 0;
    let mut last_ms = events.first().map(|e| e.timestamp_ms).unwrap_or(0);

    for event in events {
        let gap_ms = event.timestamp_ms.saturating_sub(last_ms);
        last_ms = event.timestamp_ms;

        if session.is_settling() {
            budget = budget.saturating_add(gap_ms.saturating_mul(hz));
            while budget >= 1_000 && session.is_settling() {
                budget -= 1_000;
                if let Some(frame) = session.tick() {
                    report.record(frame.resolution);
                }
            }
        }
        if !session.is_settling() {
            budget = 0;
        }

        report.input(session, event);
    }

    report.record(session.settle());
    report.finish(session);
    report
}

/// Like [`replay`], but paced on the tokio clock. Events are applied at
/// their recorded offsets from the start of the call and every animation
/// frame is handed to `on_frame`.
pub async fn replay_realtime<C, S, F>(
    session: &mut DiscoverySession<C, S>,
    events: &[TouchEvent],
    mut on_frame: F,
) -> ReplayReport
where
    C: Card,
    S: CommitSink,
    F: FnMut(TransformState),
{
    let mut report = ReplayReport::default();
    let frame = session.frame_clock().interval();
    let first_ms = events.first().map(|e| e.timestamp_ms).unwrap_or(0);
    let start = tokio::time::Instant::now();

    for event in events {
        let due = start + Duration::from_millis(event.timestamp_ms.saturating_sub(first_ms));
        let mut next_frame = tokio::time::Instant::now() + frame;

        while session.is_settling() && next_frame <= due {
            tokio::time::sleep_until(next_frame).await;
            next_frame += frame;
            if let Some(f) = session.tick() {
                on_frame(f.transform);
                report.record(f.resolution);
            }
        }
        tokio::time::sleep_until(due).await;

        report.input(session, event);
    }

    report.record(session.settle_realtime(&mut on_frame).await);
    report.finish(session);
    report
}
