//! Card identity and the activity payload shown on each card.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a card within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Anything that can sit in the discovery queue.
///
/// The queue only cares about identity; the payload is opaque to it.
pub trait Card {
    fn card_id(&self) -> &CardId;
}

/// Where an activity takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// Free-form place name, e.g. "Ocean Beach".
    Named(String),
    /// Structured location with optional coordinates.
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
}

/// An informal social activity proposed by a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: CardId,
    pub title: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,

    /// Scheduled date (ISO 8601), if fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub verified_status: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waitlist: Vec<String>,
}

impl Activity {
    /// Minimal activity with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            title: title.into(),
            description: String::new(),
            host_name: None,
            host_id: None,
            date: None,
            location: None,
            category: None,
            max_participants: None,
            current_participants: None,
            cost: None,
            photos: Vec::new(),
            tags: Vec::new(),
            verified_status: false,
            participants: Vec::new(),
            waitlist: Vec::new(),
        }
    }

    /// Open spots, if the activity has a participant cap.
    pub fn spots_left(&self) -> Option<u32> {
        self.max_participants
            .map(|max| max.saturating_sub(self.current_participants.unwrap_or(0)))
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == Some(0)
    }
}

impl Card for Activity {
    fn card_id(&self) -> &CardId {
        &self.id
    }
}
