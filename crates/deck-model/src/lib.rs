//! SwipeDeck Deck Model
//!
//! Defines the core data contracts shared by the gesture pipeline:
//! - **Cards:** Activity proposals with a unique identity
//! - **Deck:** An ordered, finite queue of cards loaded from JSON
//! - **Geometry:** Displacements, screen sizes, and card transforms
//! - **Outcomes:** Classified swipe results and the commit events they emit
//! - **Traces:** Recorded touch sequences in JSONL form
//!
//! Geometry is expressed in screen points, with positive y pointing down.

pub mod card;
pub mod deck;
pub mod event;
pub mod geometry;
pub mod outcome;

pub use card::*;
pub use deck::*;
pub use event::*;
pub use geometry::*;
pub use outcome::*;
