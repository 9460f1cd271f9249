use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::pnl::{PnlRules, trade_pnl};
use crate::core::{Asset, Transaction, percent_of};

pub const TIER_TRAIT_TYPE: &str = "Tier";
pub const SERIES_TRAIT_TYPE: &str = "Series";
const UNKNOWN_SERIES: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeocacheTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Unknown,
}

impl GeocacheTier {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "common" => GeocacheTier::Common,
            "uncommon" => GeocacheTier::Uncommon,
            "rare" => GeocacheTier::Rare,
            "epic" => GeocacheTier::Epic,
            "legendary" => GeocacheTier::Legendary,
            _ => GeocacheTier::Unknown,
        }
    }

    pub fn of(asset: &Asset) -> Self {
        asset.attribute(TIER_TRAIT_TYPE).map(Self::parse).unwrap_or(GeocacheTier::Unknown)
    }
}

/// Series label of a geocache, `Unknown` when the attribute is missing.
pub fn series_of(asset: &Asset) -> String {
    asset
        .attribute(SERIES_TRAIT_TYPE)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SERIES)
        .to_string()
}

/// Held vs. burned ("opened") geocaches and trading P&L.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocacheStats {
    pub total_held: usize,
    pub total_burned: usize,
    pub held_by_tier: BTreeMap<GeocacheTier, usize>,
    pub burned_by_tier: BTreeMap<GeocacheTier, usize>,
    pub held_by_series: BTreeMap<String, usize>,
    pub burned_by_series: BTreeMap<String, usize>,
    pub total_spent_sol: f64,
    pub total_earned_sol: f64,
    pub net_pnl_sol: f64,
    pub trade_count: usize,
}

impl GeocacheStats {
    /// Share of all seen geocaches that have been opened.
    pub fn burn_rate_pct(&self) -> f64 {
        percent_of(self.total_burned as f64, (self.total_held + self.total_burned) as f64)
    }
}

pub fn geocache_stats(
    assets: &[Asset],
    txs: &[Transaction],
    tracked: &HashSet<String>,
) -> GeocacheStats {
    let mut stats = GeocacheStats::default();

    for asset in assets {
        let tier = GeocacheTier::of(asset);
        let series = series_of(asset);
        if asset.burned {
            stats.total_burned += 1;
            *stats.burned_by_tier.entry(tier).or_default() += 1;
            *stats.burned_by_series.entry(series).or_default() += 1;
        } else {
            stats.total_held += 1;
            *stats.held_by_tier.entry(tier).or_default() += 1;
            *stats.held_by_series.entry(series).or_default() += 1;
        }
    }

    let pnl = trade_pnl(txs, tracked, PnlRules::GEOCACHE);
    stats.total_spent_sol = pnl.spent_sol;
    stats.total_earned_sol = pnl.earned_sol;
    stats.net_pnl_sol = pnl.net_sol;
    stats.trade_count = pnl.trade_count();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attribute, TxType};

    fn cache(mint: &str, tier: &str, series: &str, burned: bool) -> Asset {
        Asset {
            mint: mint.to_string(),
            name: format!("GeoCache {mint}"),
            owner: "me".to_string(),
            attributes: vec![Attribute::new("Tier", tier), Attribute::new("Series", series)],
            honorary: false,
            soulbound: false,
            staked: false,
            listed: false,
            burned,
        }
    }

    fn tx(sig: &str, tx_type: TxType, from: &str, to: &str, amount: f64) -> Transaction {
        Transaction {
            signature: sig.to_string(),
            tx_type,
            from: from.to_string(),
            to: to.to_string(),
            amount_sol: amount,
            timestamp: 1_700_000_000,
            marketplace: None,
        }
    }

    #[test]
    fn held_burned_and_pnl() {
        let assets = vec![
            cache("1", "Common", "Series 1", false),
            cache("2", "Common", "Series 2", false),
            cache("3", "Rare", "Series 1", false),
            cache("4", "Rare", "Series 1", true),
        ];
        let txs = vec![
            tx("b", TxType::Buy, "seller", "me", 0.5),
            tx("s", TxType::Sell, "me", "buyer", 1.0),
            tx("l", TxType::List, "me", "market", 3.0),
            tx("x", TxType::Burn, "me", "incinerator", 0.0),
        ];
        let tracked = HashSet::from(["me".to_string()]);
        let stats = geocache_stats(&assets, &txs, &tracked);

        assert_eq!(stats.total_held, 3);
        assert_eq!(stats.total_burned, 1);
        assert_eq!(stats.held_by_tier[&GeocacheTier::Common], 2);
        assert_eq!(stats.held_by_tier[&GeocacheTier::Rare], 1);
        assert_eq!(stats.burned_by_tier[&GeocacheTier::Rare], 1);
        assert_eq!(stats.held_by_series["Series 1"], 2);
        assert_eq!(stats.burned_by_series["Series 1"], 1);
        assert!((stats.total_spent_sol - 0.5).abs() < 1e-9);
        assert!((stats.total_earned_sol - 1.0).abs() < 1e-9);
        assert!((stats.net_pnl_sol - 0.5).abs() < 1e-9);
        assert_eq!(stats.trade_count, 2);
        assert!((stats.burn_rate_pct() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs() {
        let stats = geocache_stats(&[], &[], &HashSet::new());
        assert_eq!(stats, GeocacheStats::default());
        assert_eq!(stats.burn_rate_pct(), 0.0);
    }

    #[test]
    fn missing_attributes() {
        let mut bare = cache("1", "", "", false);
        bare.attributes.clear();
        assert_eq!(GeocacheTier::of(&bare), GeocacheTier::Unknown);
        assert_eq!(series_of(&bare), "Unknown");
        assert_eq!(GeocacheTier::parse(" EPIC "), GeocacheTier::Epic);
    }
}
