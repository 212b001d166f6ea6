//! SwipeDeck Decision Log
//!
//! Persists every committed swipe (pass, join request, details view) as an
//! append-only JSONL stream so downstream consumers can pick decisions up
//! without sharing memory with the interactive session. The first line is
//! a `# {header}` comment describing the session.

pub mod writer;

pub use writer::{read_decisions, CommitWriter, DecisionLogHeader};
