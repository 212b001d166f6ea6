//! Show (and optionally persist) the effective configuration.

use swipedeck_common::config::{config_file_path, AppConfig};

pub fn run(write: bool, config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        println!();
        println!("Saved to: {}", config_file_path().display());
    }

    Ok(())
}
