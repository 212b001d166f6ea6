//! Classify a single release displacement.

use swipedeck_common::config::AppConfig;
use swipedeck_deck_model::geometry::{Displacement, ScreenSize};
use swipedeck_gesture_core::{OutcomeClassifier, TransformMapper};

pub fn run(dx: f64, dy: f64, config: &AppConfig) -> anyhow::Result<()> {
    let screen = ScreenSize::from(config.screen);
    let classifier = OutcomeClassifier::from_config(screen, &config.swipe);
    let mapper = TransformMapper::from_config(screen, &config.swipe);

    let displacement = Displacement::new(dx, dy);
    let outcome = classifier.classify(displacement);

    println!("Screen: {}x{}", screen.width, screen.height);
    println!(
        "Thresholds: |dx| > {:.1}, dy < {:.1}",
        classifier.horizontal_threshold(),
        classifier.vertical_up_threshold()
    );
    match mapper.map(displacement) {
        Some(t) => println!(
            "Transform at release: offset ({:.1}, {:.1}), rotation {:.2} deg",
            t.offset_x, t.offset_y, t.rotation_degrees
        ),
        None => println!("Transform at release: invalid displacement"),
    }
    println!("Outcome: {} ({})", outcome, outcome.label());

    Ok(())
}
