pub mod pnl;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::masks::{self, TraitKey};
use crate::prep::Multiplier;

/// A single `trait_type`/`value` pair from token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// A held (or burned) token as supplied by the indexer. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub mint: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub honorary: bool,
    /// Non-transferable token.
    #[serde(default)]
    pub soulbound: bool,
    #[serde(default)]
    pub staked: bool,
    #[serde(default)]
    pub listed: bool,
    #[serde(default)]
    pub burned: bool,
}

impl Asset {
    /// Case-insensitive attribute lookup by trait type.
    pub fn attribute(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type.eq_ignore_ascii_case(trait_type))
            .map(|a| a.value.as_str())
    }

    /// Mask colour, normalized. Assets without a mask resolve to the fallback key.
    pub fn trait_key(&self) -> TraitKey {
        masks::normalize_trait_key(self.attribute(masks::MASK_TRAIT_TYPE).unwrap_or_default())
    }

    /// Honorary and soulbound tokens never count toward badges.
    pub fn is_badge_eligible(&self) -> bool {
        !self.honorary && !self.soulbound
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    Buy,
    Sell,
    Transfer,
    Mint,
    // Geocache marketplace events
    List,
    Delist,
    Bid,
    Burn,
}

/// A historical transaction touching one of the collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub signature: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub amount_sol: f64,
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub marketplace: Option<String>,
}

impl Transaction {
    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Whether either side of the transaction is a tracked wallet.
    pub fn touches(&self, tracked: &HashSet<String>) -> bool {
        tracked.contains(&self.from) || tracked.contains(&self.to)
    }
}

/// A wallet the user follows on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedWallet {
    pub address: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub multiplier: Multiplier,
}

impl TrackedWallet {
    /// Composite key used for per-wallet breakdowns, e.g. `Main (7xKX…gAsU)`.
    pub fn display_label(&self) -> String {
        let addr = &self.address;
        let short = if addr.chars().count() > 8 {
            let head: String = addr.chars().take(4).collect();
            let tail: String = addr.chars().skip(addr.chars().count() - 4).collect();
            format!("{head}…{tail}")
        } else {
            addr.clone()
        };
        if self.label.is_empty() {
            short
        } else {
            format!("{} ({short})", self.label)
        }
    }
}

/// Collect the tracked wallet addresses into a lookup set.
pub fn tracked_set(wallets: &[TrackedWallet]) -> HashSet<String> {
    wallets.iter().map(|w| w.address.clone()).collect()
}

/// Category reported by the external badge provider. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalCategory {
    Trait,
    Achievement,
    Event,
    Collection,
    #[serde(other)]
    Unknown,
}

/// A badge as reported by the external provider for one wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBadge {
    pub badge_name: String,
    #[serde(default)]
    pub trait_count: u32,
    #[serde(default = "unknown_category")]
    pub category: ExternalCategory,
}

fn unknown_category() -> ExternalCategory {
    ExternalCategory::Unknown
}

/// `part` as a percentage of `total`; zero when `total` is zero.
pub fn percent_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    part / total * 100.0
}
