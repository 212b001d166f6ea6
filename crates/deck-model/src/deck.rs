//! Decks: ordered, finite sequences of activity cards.
//!
//! A deck file is a single JSON document (`deck.json`). Card order in
//! the file is the order cards are presented in.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use swipedeck_common::error::{SwipedeckError, SwipedeckResult};

use crate::card::{Activity, Location};

/// Current deck schema version.
pub const DECK_SCHEMA_VERSION: &str = "1.0";

/// Top-level deck file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Schema version.
    pub version: String,

    /// Human-readable deck name.
    pub name: String,

    /// Cards in presentation order.
    pub cards: Vec<Activity>,
}

impl Deck {
    /// Create a deck, rejecting blank or duplicate card ids.
    pub fn new(name: impl Into<String>, cards: Vec<Activity>) -> SwipedeckResult<Self> {
        let deck = Self {
            version: DECK_SCHEMA_VERSION.to_string(),
            name: name.into(),
            cards,
        };
        deck.validate()?;
        Ok(deck)
    }

    /// Load a deck from a JSON file.
    pub fn load(path: &Path) -> SwipedeckResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SwipedeckError::from_io_at(e, path))?;
        let deck: Deck = serde_json::from_str(&content)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Save the deck as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SwipedeckResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check card identity invariants.
    pub fn validate(&self) -> SwipedeckResult<()> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        for (index, card) in self.cards.iter().enumerate() {
            if card.id.as_str().trim().is_empty() {
                return Err(SwipedeckError::deck(format!("card #{index} has an empty id")));
            }
            if !seen.insert(&card.id) {
                return Err(SwipedeckError::deck(format!(
                    "duplicate card id '{}' at position {index}",
                    card.id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The stock Bay Area deck shown on first launch.
    pub fn sample() -> Self {
        let mut hike = Activity::new("1", "Hike Through the Marin Headlands");
        hike.description =
            "Anybody wants to come for a hike in the Marin headlands on Friday...".to_string();
        hike.host_name = Some("Adam".to_string());
        hike.photos = vec!["https://example.com/marin.jpg".to_string()];
        hike.location = Some(Location::Named("Marin Headlands".to_string()));
        hike.category = Some("hiking".to_string());
        hike.verified_status = true;

        let mut surf = Activity::new("2", "Surfing at Ocean Beach");
        surf.description = "Morning surf session at Ocean Beach. All levels welcome!".to_string();
        surf.host_name = Some("Sarah".to_string());
        surf.photos = vec!["https://example.com/surf.jpg".to_string()];
        surf.location = Some(Location::Named("Ocean Beach".to_string()));
        surf.category = Some("surfing".to_string());
        surf.verified_status = true;

        let mut climb = Activity::new("3", "Climbing at Mission Cliffs");
        climb.description =
            "Indoor climbing session at Mission Cliffs. Beginners welcome!".to_string();
        climb.host_name = Some("Mike".to_string());
        climb.photos = vec!["https://example.com/climbing.jpg".to_string()];
        climb.location = Some(Location::Named("Mission Cliffs".to_string()));
        climb.category = Some("climbing".to_string());

        Self {
            version: DECK_SCHEMA_VERSION.to_string(),
            name: "Bay Area".to_string(),
            cards: vec![hike, surf, climb],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_is_valid() {
        let deck = Deck::sample();
        deck.validate().unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.cards[0].title, "Hike Through the Marin Headlands");
        assert!(!deck.cards[2].verified_status);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let cards = vec![Activity::new("a", "One"), Activity::new("a", "Two")];
        let err = Deck::new("dupes", cards).unwrap_err();
        assert!(err.to_string().contains("duplicate card id 'a'"));
    }

    #[test]
    fn test_blank_id_rejected() {
        let err = Deck::new("blank", vec![Activity::new("  ", "No id")]).unwrap_err();
        assert!(matches!(err, SwipedeckError::Deck { .. }));
    }

    #[test]
    fn test_empty_deck_is_allowed() {
        let deck = Deck::new("empty", Vec::new()).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("swipedeck_test_deck");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("deck.json");

        let deck = Deck::sample();
        deck.save(&path).unwrap();
        let loaded = Deck::load(&path).unwrap();
        assert_eq!(loaded, deck);

        std::fs::remove_dir_all(&dir).ok();
    }
}
