//! Swipe outcomes and the commit events they produce.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::CardId;

/// Classified result of a released gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Pass on the activity.
    Left,
    /// Ask to join the activity.
    Right,
    /// Open the activity details.
    Up,
    /// Released short of every threshold.
    Cancelled,
}

impl Outcome {
    /// Whether this outcome advances the queue.
    pub fn is_commit(self) -> bool {
        !matches!(self, Outcome::Cancelled)
    }

    /// User-facing hint label.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Left => "Pass",
            Outcome::Right => "Join",
            Outcome::Up => "Details",
            Outcome::Cancelled => "Cancelled",
        }
    }

    /// Haptic pulse that accompanies a commit.
    pub fn feedback(self) -> Option<FeedbackStyle> {
        match self {
            Outcome::Up => Some(FeedbackStyle::Light),
            Outcome::Left | Outcome::Right => Some(FeedbackStyle::Medium),
            Outcome::Cancelled => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Left => "left",
            Outcome::Right => "right",
            Outcome::Up => "up",
            Outcome::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Button actions that stand in for a full drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Pass,
    Join,
    Details,
}

impl SwipeAction {
    /// The outcome a drag would need to produce for this action.
    pub fn outcome(self) -> Outcome {
        match self {
            SwipeAction::Pass => Outcome::Left,
            SwipeAction::Join => Outcome::Right,
            SwipeAction::Details => Outcome::Up,
        }
    }
}

/// Haptic intensity emitted on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStyle {
    Light,
    Medium,
}

/// Emitted once per committed gesture, after its exit animation settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    /// The card that was current when the gesture was released.
    pub card_id: CardId,

    /// Committed outcome (never `Cancelled`).
    pub outcome: Outcome,

    /// Haptic pulse to play.
    pub feedback: FeedbackStyle,

    /// Zero-based queue position of the card.
    pub position: usize,

    /// Milliseconds since session start.
    pub session_ms: u64,

    /// Wall-clock time of the commit.
    pub recorded_at: DateTime<Utc>,
}
