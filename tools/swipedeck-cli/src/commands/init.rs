//! Write the sample deck and a demo touch trace.

use std::path::PathBuf;

use swipedeck_common::config::AppConfig;
use swipedeck_deck_model::deck::Deck;
use swipedeck_deck_model::event::{serialize_trace, TouchEvent, Trace, TraceHeader};
use swipedeck_deck_model::geometry::ScreenSize;
use swipedeck_deck_model::outcome::SwipeAction;

pub fn run(output: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let deck_path = output.join("deck.json");
    let trace_path = output.join("gestures.jsonl");

    let deck = Deck::sample();
    deck.save(&deck_path)
        .map_err(|e| anyhow::anyhow!("Failed to write deck: {e}"))?;

    let trace = demo_trace(ScreenSize::from(config.screen));
    std::fs::write(&trace_path, serialize_trace(&trace)?)
        .map_err(|e| anyhow::anyhow!("Failed to write trace: {e}"))?;

    println!("Sample deck created:");
    println!("  Deck: {} ({} cards)", deck_path.display(), deck.len());
    println!("  Trace: {} ({} events)", trace_path.display(), trace.events.len());
    println!();
    println!("Try:");
    println!(
        "  swipedeck replay {} {}",
        deck_path.display(),
        trace_path.display()
    );

    Ok(())
}

/// A join drag, a cancelled nudge, a details drag, and a pass button,
/// scaled to the configured screen.
fn demo_trace(screen: ScreenSize) -> Trace {
    let w = screen.width;
    let h = screen.height;
    let mut events = Vec::new();

    let mut drag = |start: u64, dx: f64, dy: f64| {
        events.push(TouchEvent::touch_start(start));
        for step in 1..=4u64 {
            let f = step as f64 / 4.0;
            events.push(TouchEvent::touch_move(start + step * 16, dx * f, dy * f));
        }
        events.push(TouchEvent::touch_end(start + 80));
    };

    drag(0, w * 0.4, h * 0.01);
    drag(2_500, w * 0.05, -h * 0.01);
    drag(3_000, w * 0.1, -h * 0.25);
    events.push(TouchEvent::button(5_500, SwipeAction::Pass));

    Trace {
        header: Some(TraceHeader::new(screen)),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipedeck_deck_model::event::parse_trace;
    use swipedeck_deck_model::outcome::Outcome;
    use swipedeck_gesture_core::{replay, DiscoverySession};

    #[test]
    fn test_demo_trace_decides_every_sample_card() {
        let config = AppConfig::default();
        let trace = demo_trace(ScreenSize::from(config.screen));
        let parsed = parse_trace(&serialize_trace(&trace).unwrap()).unwrap();
        assert_eq!(parsed, trace);

        let mut session = DiscoverySession::new(Deck::sample().cards, Vec::new(), &config);
        let report = replay(&mut session, &trace.events);
        let outcomes: Vec<Outcome> = report.commits.iter().map(|c| c.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Right, Outcome::Up, Outcome::Left]);
        assert_eq!(report.cancelled, 1);
        assert!(report.exhausted);
    }
}
