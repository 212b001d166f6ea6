//! Show deck contents.

use std::path::PathBuf;

use swipedeck_deck_model::card::Location;
use swipedeck_deck_model::deck::Deck;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let deck = Deck::load(&path).map_err(|e| anyhow::anyhow!("Failed to load deck: {e}"))?;

    println!("Deck: {}", deck.name);
    println!("  Version: {}", deck.version);
    println!("  Cards: {}", deck.len());
    println!();

    for (position, card) in deck.cards.iter().enumerate() {
        let verified = if card.verified_status { " [verified]" } else { "" };
        println!("{:>3}. {} (id: {}){}", position + 1, card.title, card.id, verified);

        if let Some(host) = &card.host_name {
            println!("     Host: {host}");
        }
        if let Some(location) = &card.location {
            println!("     Where: {}", describe_location(location));
        }
        if let Some(date) = &card.date {
            println!("     When: {date}");
        }
        if let Some(category) = &card.category {
            println!("     Category: {category}");
        }
        match (card.spots_left(), card.max_participants) {
            (Some(0), _) => println!("     Spots: full"),
            (Some(left), Some(max)) => println!("     Spots: {left} of {max} open"),
            _ => {}
        }
        if let Some(cost) = card.cost {
            println!("     Cost: {cost:.2}");
        }
        if !card.tags.is_empty() {
            println!("     Tags: {}", card.tags.join(", "));
        }
    }

    Ok(())
}

fn describe_location(location: &Location) -> String {
    match location {
        Location::Named(name) => name.clone(),
        Location::Detailed {
            address: Some(address),
            ..
        } => address.clone(),
        Location::Detailed {
            latitude: Some(lat),
            longitude: Some(lon),
            ..
        } => format!("{lat:.4}, {lon:.4}"),
        Location::Detailed { .. } => "unspecified".to_string(),
    }
}
