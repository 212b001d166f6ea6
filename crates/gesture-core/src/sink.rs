//! Outbound collaborator for committed decisions.

use swipedeck_common::error::SwipedeckResult;
use swipedeck_deck_model::outcome::CommitEvent;

/// Receives one event per committed gesture (record pass, request to
/// join, open details).
///
/// A failing sink never blocks the queue: the session logs the error and
/// advances anyway.
pub trait CommitSink {
    fn record(&mut self, event: &CommitEvent) -> SwipedeckResult<()>;

    /// Called once when the last card has been evaluated.
    fn exhausted(&mut self) -> SwipedeckResult<()> {
        Ok(())
    }
}

/// Collects events in memory.
impl CommitSink for Vec<CommitEvent> {
    fn record(&mut self, event: &CommitEvent) -> SwipedeckResult<()> {
        self.push(event.clone());
        Ok(())
    }
}

impl<S: CommitSink + ?Sized> CommitSink for &mut S {
    fn record(&mut self, event: &CommitEvent) -> SwipedeckResult<()> {
        (**self).record(event)
    }

    fn exhausted(&mut self) -> SwipedeckResult<()> {
        (**self).exhausted()
    }
}

impl<S: CommitSink + ?Sized> CommitSink for Box<S> {
    fn record(&mut self, event: &CommitEvent) -> SwipedeckResult<()> {
        (**self).record(event)
    }

    fn exhausted(&mut self) -> SwipedeckResult<()> {
        (**self).exhausted()
    }
}
