use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Asset, ExternalBadge, Transaction};

/// Everything the collaborators fetched for one dashboard refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Reference "now" for time-range filtering.
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub geocaches: Vec<Asset>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub geocache_transactions: Vec<Transaction>,
    /// `None` when the badge provider could not be reached.
    #[serde(default)]
    pub external_badges: Option<Vec<ExternalBadge>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::parse(&contents)?;
        tracing::info!(
            assets = snapshot.assets.len(),
            geocaches = snapshot.geocaches.len(),
            transactions = snapshot.transactions.len(),
            "Snapshot loaded from {}",
            path.as_ref().display()
        );
        Ok(snapshot)
    }

    pub fn parse(contents: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_snapshot() {
        let snap = Snapshot::parse(r#"{"generated_at":"2024-05-01T12:00:00Z"}"#).unwrap();
        assert!(snap.assets.is_empty());
        assert!(snap.external_badges.is_none());
        assert_eq!(snap.generated_at.timestamp(), 1_714_564_800);
    }

    #[test]
    fn full_asset_record() {
        let snap = Snapshot::parse(
            r#"{
                "generated_at": "2024-05-01T12:00:00Z",
                "assets": [{
                    "mint": "Mint1", "name": "MeatBag #1", "owner": "w1",
                    "attributes": [{"trait_type": "Mask", "value": "Tie-Dye"}],
                    "staked": true
                }],
                "external_badges": [{"badgeName": "Gold Mask", "traitCount": 2, "category": "trait"}]
            }"#,
        )
        .unwrap();
        assert!(snap.assets[0].staked);
        assert!(!snap.assets[0].honorary);
        assert_eq!(snap.external_badges.unwrap().len(), 1);
    }

    #[test]
    fn parse_error() {
        assert!(matches!(Snapshot::parse("{"), Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn missing_file() {
        let err = Snapshot::load("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(err.to_string().starts_with("failed to read snapshot"));
    }
}
