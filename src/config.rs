use crate::aggregator::MissingReading;
use crate::models::{LineStyle, Rgb};
use serde::Deserialize;
use std::path::Path;

/// Looked up in the working directory when `CONFIG_FILE` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "overlay.toml";

/// Every key is optional; the defaults are the overlay's fixed constants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub polling: PollingConfig,
    pub overlay: OverlayConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Columns between the panel and the right edge. The panel starts on the second row.
    pub margin: u16,
    /// Point size for surfaces that scale text. The terminal panel uses the terminal's font.
    pub font_size: f32,
    pub color: Rgb,
    pub idle_opacity: f32,
    /// Opacity while the pointer is over the panel.
    pub hovered_opacity: f32,
    pub click_through: bool,
    pub missing_reading: MissingReading,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: 10,
            font_size: 13.0,
            color: Rgb::WHITE,
            idle_opacity: 1.0,
            hovered_opacity: 0.3,
            click_through: true,
            missing_reading: MissingReading::Placeholder,
        }
    }
}

impl OverlayConfig {
    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            color: self.color,
            font_size: self.font_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Use exactly this interface instead of the first eligible one.
    pub interface: Option<String>,
    /// Case-insensitive substrings that make an interface ineligible.
    pub exclude: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface: None,
            exclude: vec!["loopback".into()],
        }
    }
}

impl AppConfig {
    /// `CONFIG_FILE` must exist when set; otherwise `overlay.toml` is read if present,
    /// falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("CONFIG_FILE") {
            let s = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
            return Self::load_from_str(&s);
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            let s = std::fs::read_to_string(DEFAULT_CONFIG_PATH)?;
            return Self::load_from_str(&s);
        }
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.polling.interval_ms > 0,
            "polling.interval_ms must be > 0, got {}",
            self.polling.interval_ms
        );
        anyhow::ensure!(
            self.overlay.font_size > 0.0,
            "overlay.font_size must be > 0, got {}",
            self.overlay.font_size
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.overlay.idle_opacity),
            "overlay.idle_opacity must be between 0 and 1, got {}",
            self.overlay.idle_opacity
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.overlay.hovered_opacity),
            "overlay.hovered_opacity must be between 0 and 1, got {}",
            self.overlay.hovered_opacity
        );
        if let Some(interface) = &self.network.interface {
            anyhow::ensure!(
                !interface.trim().is_empty(),
                "network.interface must be non-empty when set"
            );
        }
        anyhow::ensure!(
            self.network.exclude.iter().all(|p| !p.is_empty()),
            "network.exclude must not contain empty patterns"
        );
        Ok(())
    }
}
