//! Append-only decision writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swipedeck_common::error::{SwipedeckError, SwipedeckResult};
use swipedeck_deck_model::outcome::CommitEvent;
use swipedeck_gesture_core::sink::CommitSink;

/// Flush after this many buffered decisions.
const FLUSH_EVERY: u64 = 32;

/// Metadata written as the first line of a decision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLogHeader {
    pub schema_version: String,
    /// Deck the session was run against.
    pub deck_name: String,
    pub card_count: usize,
    /// Wall-clock session start (RFC 3339).
    pub session_started: String,
}

impl DecisionLogHeader {
    pub fn new(deck_name: impl Into<String>, card_count: usize, session_started: &str) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            deck_name: deck_name.into(),
            card_count,
            session_started: session_started.to_string(),
        }
    }
}

/// Writes commit events to a JSONL file in append-only mode.
pub struct CommitWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
    exhausted: bool,
}

impl CommitWriter {
    /// Create a new log, writing the header as the first line.
    pub fn new(path: PathBuf, header: DecisionLogHeader) -> SwipedeckResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| SwipedeckError::decision_log(format!("Failed to write header: {e}")))?;

        tracing::debug!(path = %path.display(), deck = %header.deck_name, "Decision log opened");

        Ok(Self {
            writer,
            path,
            events_written: 0,
            exhausted: false,
        })
    }

    /// Write a single decision as a JSONL line.
    pub fn write_event(&mut self, event: &CommitEvent) -> SwipedeckResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| SwipedeckError::decision_log(format!("Failed to write decision: {e}")))?;
        self.events_written += 1;

        if self.events_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> SwipedeckResult<()> {
        self.writer
            .flush()
            .map_err(|e| SwipedeckError::decision_log(format!("Failed to flush decisions: {e}")))?;
        Ok(())
    }

    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Whether the session reported the deck as exhausted.
    pub fn saw_exhaustion(&self) -> bool {
        self.exhausted
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CommitSink for CommitWriter {
    fn record(&mut self, event: &CommitEvent) -> SwipedeckResult<()> {
        self.write_event(event)
    }

    fn exhausted(&mut self) -> SwipedeckResult<()> {
        self.exhausted = true;
        self.flush()
    }
}

impl Drop for CommitWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read a decision log back, returning its header and events.
pub fn read_decisions(
    path: &Path,
) -> SwipedeckResult<(Option<DecisionLogHeader>, Vec<CommitEvent>)> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SwipedeckError::from_io_at(e, path))?;

    let mut header = None;
    let mut events = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(comment) = line.strip_prefix('#') {
            if header.is_none() {
                header = serde_json::from_str(comment.trim()).ok();
            }
            continue;
        }
        events.push(serde_json::from_str(line)?);
    }
    Ok((header, events))
}
