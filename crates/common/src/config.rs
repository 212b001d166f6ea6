//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SwipedeckError, SwipedeckResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Screen dimensions the card is laid out against.
    pub screen: ScreenConfig,

    /// Gesture thresholds and transform limits.
    pub swipe: SwipeConfig,

    /// Completion animation parameters.
    pub animation: AnimationConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Screen dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

/// Swipe classification and transform tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Fraction of screen width a horizontal drag must exceed to commit.
    pub horizontal_ratio: f64,

    /// Fraction of screen height an upward drag must exceed to commit.
    pub vertical_ratio: f64,

    /// Rotation reached at half a screen width of horizontal travel.
    pub max_rotation_degrees: f64,

    /// Horizontal exits fly to `sign * width * exit_overshoot`.
    pub exit_overshoot: f64,
}

/// Completion animation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Spring stiffness for committed exits.
    pub stiffness: f64,

    /// Spring damping for committed exits.
    pub damping: f64,

    /// Spring mass for committed exits.
    pub mass: f64,

    /// Distance (points) and speed (points/s) below which a spring is settled.
    pub settle_epsilon: f64,

    /// Duration of the eased return-to-centre after a cancelled gesture.
    pub cancel_duration_ms: u64,

    /// Frame rate animations are stepped at.
    pub frame_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "swipedeck=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 800.0,
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            horizontal_ratio: 0.3,
            vertical_ratio: 0.2,
            max_rotation_degrees: 10.0,
            exit_overshoot: 1.5,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        // Matches the stock spring of the mobile animation runtime.
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            settle_epsilon: 0.5,
            cancel_duration_ms: 200,
            frame_rate_hz: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// Returns `Ok(None)` when no config file exists. A file that exists
    /// but cannot be read or validated is an error, so callers can report
    /// it once logging is up.
    pub fn try_load() -> SwipedeckResult<Option<Self>> {
        Self::try_load_at(&config_file_path())
    }

    /// Like [`try_load`](Self::try_load), for an explicit location.
    pub fn try_load_at(path: &Path) -> SwipedeckResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> SwipedeckResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SwipedeckError::from_io_at(e, path))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> SwipedeckResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> SwipedeckResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the gesture pipeline cannot work with.
    pub fn validate(&self) -> SwipedeckResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SwipedeckError::config(format!(
                    "{name} must be a positive number, got {v}"
                )))
            }
        };

        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("swipe.horizontal_ratio", self.swipe.horizontal_ratio)?;
        positive("swipe.vertical_ratio", self.swipe.vertical_ratio)?;
        positive("swipe.exit_overshoot", self.swipe.exit_overshoot)?;
        positive("animation.stiffness", self.animation.stiffness)?;
        positive("animation.mass", self.animation.mass)?;
        positive("animation.settle_epsilon", self.animation.settle_epsilon)?;

        if !self.swipe.max_rotation_degrees.is_finite() {
            return Err(SwipedeckError::config("swipe.max_rotation_degrees must be finite"));
        }
        if !self.animation.damping.is_finite() || self.animation.damping < 0.0 {
            return Err(SwipedeckError::config(
                "animation.damping must be a non-negative number",
            ));
        }
        if self.animation.frame_rate_hz == 0 {
            return Err(SwipedeckError::config("animation.frame_rate_hz must be > 0"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("swipedeck").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"screen":{"width":320.0}}"#).unwrap();
        assert_eq!(config.screen.width, 320.0);
        assert_eq!(config.screen.height, 800.0);
        assert_eq!(config.swipe, SwipeConfig::default());
    }

    #[test]
    fn test_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.screen.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SwipedeckError::Config { .. })
        ));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join("swipedeck_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.animation.cancel_duration_ms = 120;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_try_load_at_distinguishes_missing_and_malformed() {
        let dir = std::env::temp_dir().join("swipedeck_test_try_load");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        assert!(AppConfig::try_load_at(&path).unwrap().is_none());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::try_load_at(&path),
            Err(SwipedeckError::Json(_))
        ));

        std::fs::write(&path, r#"{"screen":{"width":0.0}}"#).unwrap();
        assert!(matches!(
            AppConfig::try_load_at(&path),
            Err(SwipedeckError::Config { .. })
        ));

        AppConfig::default().save_to(&path).unwrap();
        assert_eq!(
            AppConfig::try_load_at(&path).unwrap(),
            Some(AppConfig::default())
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppConfig::load_from(Path::new("/nonexistent/swipedeck.json")).unwrap_err();
        assert!(matches!(err, SwipedeckError::FileNotFound { .. }));
    }
}
