//! Touch trace format.
//!
//! A trace is a JSONL file: an optional `# {header}` comment line followed
//! by one touch event per line. Move events carry the cumulative offset
//! from the touch-down point, not a per-frame delta.

use serde::{Deserialize, Serialize};
use swipedeck_common::error::{SwipedeckError, SwipedeckResult};

use crate::geometry::ScreenSize;
use crate::outcome::SwipeAction;

/// Milliseconds since the start of the trace.
pub type TimestampMs = u64;

/// A single recorded touch event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Milliseconds since trace start.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: TouchKind,
}

/// Discriminated union of touch events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TouchKind {
    /// Finger down on the visible card.
    TouchStart,

    /// Finger moved; offset is cumulative from touch-down.
    TouchMove { dx: f64, dy: f64 },

    /// Finger lifted.
    TouchEnd,

    /// Pass/Join/Details button tapped instead of dragging.
    Button { action: SwipeAction },
}

/// Metadata line written at the top of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Screen the trace was recorded on.
    pub screen_width: f64,
    pub screen_height: f64,
}

impl TraceHeader {
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            screen_width: screen.width,
            screen_height: screen.height,
        }
    }

    pub fn screen(&self) -> ScreenSize {
        ScreenSize::new(self.screen_width, self.screen_height)
    }
}

/// A parsed trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: Option<TraceHeader>,
    pub events: Vec<TouchEvent>,
}

impl TouchEvent {
    pub fn touch_start(timestamp_ms: TimestampMs) -> Self {
        Self {
            timestamp_ms,
            kind: TouchKind::TouchStart,
        }
    }

    pub fn touch_move(timestamp_ms: TimestampMs, dx: f64, dy: f64) -> Self {
        Self {
            timestamp_ms,
            kind: TouchKind::TouchMove { dx, dy },
        }
    }

    pub fn touch_end(timestamp_ms: TimestampMs) -> Self {
        Self {
            timestamp_ms,
            kind: TouchKind::TouchEnd,
        }
    }

    pub fn button(timestamp_ms: TimestampMs, action: SwipeAction) -> Self {
        Self {
            timestamp_ms,
            kind: TouchKind::Button { action },
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<TouchEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse a full trace, including its header, with line-numbered errors.
///
/// Timestamps must be non-decreasing.
pub fn parse_trace(content: &str) -> SwipedeckResult<Trace> {
    let mut header = None;
    let mut events: Vec<TouchEvent> = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            // Only the first comment line may carry the header.
            if header.is_none() && events.is_empty() {
                header = serde_json::from_str::<TraceHeader>(comment.trim()).ok();
            }
            continue;
        }

        let event: TouchEvent = serde_json::from_str(line)
            .map_err(|e| SwipedeckError::trace(line_no, e.to_string()))?;

        if let Some(prev) = events.last() {
            if event.timestamp_ms < prev.timestamp_ms {
                return Err(SwipedeckError::trace(
                    line_no,
                    format!(
                        "timestamp {} is earlier than previous {}",
                        event.timestamp_ms, prev.timestamp_ms
                    ),
                ));
            }
        }
        events.push(event);
    }

    Ok(Trace { header, events })
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[TouchEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

/// Serialize a trace with its header comment line.
pub fn serialize_trace(trace: &Trace) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = &trace.header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    output.push_str(&serialize_events(&trace.events)?);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let event = TouchEvent::touch_move(16, 150.0, -4.5);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":16"));
        assert!(json.contains("\"type\":\"touch_move\""));
        assert!(json.contains("\"dx\":150.0"));
        assert!(json.contains("\"dy\":-4.5"));
    }

    #[test]
    fn test_button_event_parses() {
        let parsed =
            parse_events(r#"{"t":5,"type":"button","action":"join"}"#).unwrap();
        assert_eq!(parsed, vec![TouchEvent::button(5, SwipeAction::Join)]);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let events = vec![
            TouchEvent::touch_start(0),
            TouchEvent::touch_move(16, 10.0, 2.0),
            TouchEvent::touch_end(32),
        ];
        let jsonl = serialize_events(&events).unwrap();
        assert_eq!(parse_events(&jsonl).unwrap(), events);
    }

    #[test]
    fn test_parse_trace_reads_header() {
        let content = "# {\"schema_version\":\"1.0\",\"screen_width\":400.0,\"screen_height\":800.0}\n\
                       {\"t\":0,\"type\":\"touch_start\"}\n\
                       {\"t\":20,\"type\":\"touch_end\"}\n";
        let trace = parse_trace(content).unwrap();
        let header = trace.header.unwrap();
        assert_eq!(header.screen(), ScreenSize::new(400.0, 800.0));
        assert_eq!(trace.events.len(), 2);
    }

    #[test]
    fn test_parse_trace_without_header() {
        let trace = parse_trace("{\"t\":0,\"type\":\"touch_start\"}\n").unwrap();
        assert!(trace.header.is_none());
        assert_eq!(trace.events.len(), 1);
    }

    #[test]
    fn test_parse_trace_reports_line_number() {
        let content = "{\"t\":0,\"type\":\"touch_start\"}\n\n{\"t\":1,\"type\":\"wiggle\"}\n";
        let err = parse_trace(content).unwrap_err();
        assert!(matches!(err, SwipedeckError::Trace { line: 3, .. }));
    }

    #[test]
    fn test_parse_trace_rejects_time_going_backwards() {
        let content = "{\"t\":10,\"type\":\"touch_start\"}\n{\"t\":5,\"type\":\"touch_end\"}\n";
        let err = parse_trace(content).unwrap_err();
        assert!(matches!(err, SwipedeckError::Trace { line: 2, .. }));
    }

    #[test]
    fn test_serialize_trace_writes_header_comment() {
        let trace = Trace {
            header: Some(TraceHeader::new(ScreenSize::new(390.0, 844.0))),
            events: vec![TouchEvent::touch_start(0)],
        };
        let content = serialize_trace(&trace).unwrap();
        assert!(content.starts_with("# {"));
        assert_eq!(parse_trace(&content).unwrap(), trace);
    }
}
