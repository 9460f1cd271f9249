use serde::Deserialize;
use std::path::Path;

use crate::core::TrackedWallet;
use crate::interactions::TimeRange;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub wallets: Vec<TrackedWallet>,
    pub layout: LayoutConfig,
    pub interactions: InteractionConfig,
    pub badges: BadgeConfig,
    pub snapshot: SnapshotConfig,
}

/// Bubble chart geometry.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub padding: f64,
    pub max_bubbles: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct InteractionConfig {
    pub range: TimeRange,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BadgeConfig {
    /// One-time badge ids awarded by hand.
    pub manual_awards: Vec<String>,
    pub use_external_feed: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallets: Vec::new(),
            layout: LayoutConfig::default(),
            interactions: InteractionConfig::default(),
            badges: BadgeConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 500.0,
            min_radius: 16.0,
            max_radius: 80.0,
            padding: 4.0,
            max_bubbles: 50,
        }
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            manual_awards: Vec::new(),
            use_external_feed: true,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: "data/snapshot.json".into(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
