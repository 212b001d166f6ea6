//! Replay a touch trace against a deck.

use std::path::PathBuf;

use swipedeck_common::clock::SessionClock;
use swipedeck_common::config::AppConfig;
use swipedeck_deck_model::card::Activity;
use swipedeck_deck_model::deck::Deck;
use swipedeck_deck_model::event::parse_trace;
use swipedeck_deck_model::outcome::CommitEvent;
use swipedeck_decision_log::{CommitWriter, DecisionLogHeader};
use swipedeck_gesture_core::{replay, replay_realtime, CommitSink, DiscoverySession, ReplayReport};

pub async fn run(
    deck_path: PathBuf,
    trace_path: PathBuf,
    log: Option<PathBuf>,
    realtime: bool,
    mut config: AppConfig,
) -> anyhow::Result<()> {
    println!("Replaying {} against {}", trace_path.display(), deck_path.display());

    let deck =
        Deck::load(&deck_path).map_err(|e| anyhow::anyhow!("Failed to load deck: {e}"))?;
    let content = std::fs::read_to_string(&trace_path)
        .map_err(|_| anyhow::anyhow!("Trace file not found: {}", trace_path.display()))?;
    let trace = parse_trace(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;

    // Traces carry the screen they were recorded on.
    if let Some(header) = &trace.header {
        config.screen.width = header.screen_width;
        config.screen.height = header.screen_height;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    println!("  Deck: {} ({} cards)", deck.name, deck.len());
    println!("  Events: {}", trace.events.len());
    println!(
        "  Screen: {}x{}",
        config.screen.width, config.screen.height
    );
    println!();

    let sink: Box<dyn CommitSink> = match &log {
        Some(path) => {
            let started = SessionClock::start();
            let header = DecisionLogHeader::new(&deck.name, deck.len(), started.epoch_wall());
            Box::new(
                CommitWriter::new(path.clone(), header)
                    .map_err(|e| anyhow::anyhow!("Failed to open decision log: {e}"))?,
            )
        }
        None => Box::new(Vec::<CommitEvent>::new()),
    };

    let cards = deck.cards.clone();
    let mut session = DiscoverySession::new(deck.cards, sink, &config);

    let report = if realtime {
        replay_realtime(&mut session, &trace.events, |t| {
            tracing::trace!(x = t.offset_x, y = t.offset_y, r = t.rotation_degrees, "Frame");
        })
        .await
    } else {
        replay(&mut session, &trace.events)
    };

    print_report(&report, &cards);

    if let Some(path) = log {
        println!();
        println!("Decisions written to: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &ReplayReport, cards: &[Activity]) {
    println!("Decisions:");
    if report.commits.is_empty() {
        println!("  none");
    }
    for commit in &report.commits {
        let title = cards
            .iter()
            .find(|c| c.id == commit.card_id)
            .map(|c| c.title.as_str())
            .unwrap_or("?");
        println!(
            "  {:<8} {} ({})",
            commit.outcome.label(),
            title,
            commit.card_id
        );
    }
    println!();
    println!("Cancelled gestures: {}", report.cancelled);
    println!(
        "Inputs: {} accepted, {} dropped",
        report.accepted_inputs, report.ignored_inputs
    );
    println!("Animated: {:.2}s", report.animated_secs);
    if report.exhausted {
        println!("No more activities.");
    } else {
        println!("Cards left: {}", cards.len().saturating_sub(report.commits.len()));
    }
}
