//! SwipeDeck Common Utilities
//!
//! Shared infrastructure for all SwipeDeck crates:
//! - Error types and result aliases
//! - Frame clock utilities for stepping animations
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
