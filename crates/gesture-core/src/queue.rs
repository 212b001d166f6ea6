//! Card queue controller.
//!
//! Owns the finite card list, the cursor over it, and the transform of the
//! card currently on top. The cursor only ever moves forward.

use swipedeck_deck_model::card::{Card, CardId};
use swipedeck_deck_model::geometry::TransformState;
use swipedeck_deck_model::outcome::Outcome;

/// Queue lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Browsing,
    /// Every card has been evaluated. Terminal.
    Exhausted,
}

/// Result of applying an outcome to the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueTransition {
    /// The card at `position` was decided and the cursor moved past it.
    Advanced {
        card_id: CardId,
        position: usize,
        outcome: Outcome,
        exhausted: bool,
    },
    /// Gesture cancelled; the card snapped back in place.
    Reset,
    /// The queue was already exhausted.
    Ignored,
}

/// Cursor over an ordered, finite sequence of cards.
#[derive(Debug, Clone)]
pub struct CardQueue<C> {
    cards: Vec<C>,
    cursor: usize,
    transform: TransformState,
}

impl<C: Card> CardQueue<C> {
    pub fn new(cards: Vec<C>) -> Self {
        Self {
            cards,
            cursor: 0,
            transform: TransformState::ORIGIN,
        }
    }

    pub fn state(&self) -> QueueState {
        if self.cursor >= self.cards.len() {
            QueueState::Exhausted
        } else {
            QueueState::Browsing
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == QueueState::Exhausted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards not yet decided, including the current one.
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.cursor)
    }

    /// The card on top of the stack, if any.
    pub fn current(&self) -> Option<&C> {
        self.cards.get(self.cursor)
    }

    /// The card rendered underneath the current one.
    pub fn peek_next(&self) -> Option<&C> {
        self.cards.get(self.cursor + 1)
    }

    pub fn cards(&self) -> &[C] {
        &self.cards
    }

    /// Transform of the current card.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Move the current card. Ignored once exhausted.
    pub fn set_transform(&mut self, transform: TransformState) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.transform = transform;
        true
    }

    /// Apply a resolved outcome.
    pub fn apply(&mut self, outcome: Outcome) -> QueueTransition {
        let Some(card) = self.cards.get(self.cursor) else {
            return QueueTransition::Ignored;
        };

        if !outcome.is_commit() {
            self.transform = TransformState::ORIGIN;
            return QueueTransition::Reset;
        }

        let card_id = card.card_id().clone();
        let position = self.cursor;
        self.cursor += 1;
        self.transform = TransformState::ORIGIN;

        QueueTransition::Advanced {
            card_id,
            position,
            outcome,
            exhausted: self.is_exhausted(),
        }
    }
}
