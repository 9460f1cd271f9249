use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Asset, TrackedWallet, percent_of};
use crate::masks::TraitKey;

/// Staking boost applied to a wallet's daily yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Multiplier {
    #[default]
    Base,
    Boosted,
    Max,
}

impl Multiplier {
    /// Multiplier in whole percent. Yield maths stays in integers so the floor is exact.
    pub fn percent(self) -> u64 {
        match self {
            Multiplier::Base => 100,
            Multiplier::Boosted => 110,
            Multiplier::Max => 120,
        }
    }

    pub fn factor(self) -> f64 {
        self.percent() as f64 / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("multiplier must be one of 1.0, 1.1 or 1.2, got {0}")]
pub struct InvalidMultiplier(pub f64);

impl TryFrom<f64> for Multiplier {
    type Error = InvalidMultiplier;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        [Multiplier::Base, Multiplier::Boosted, Multiplier::Max]
            .into_iter()
            .find(|m| (m.factor() - value).abs() < 1e-9)
            .ok_or(InvalidMultiplier(value))
    }
}

impl From<Multiplier> for f64 {
    fn from(m: Multiplier) -> f64 {
        m.factor()
    }
}

/// Daily yield of one asset: `floor(base_yield * multiplier)`.
pub fn daily_yield(key: TraitKey, multiplier: Multiplier) -> u64 {
    key.base_yield() * multiplier.percent() / 100
}

/// Calendar projections of a daily total. No compounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Projections {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
    pub yearly: u64,
}

impl Projections {
    pub fn from_daily(daily: u64) -> Self {
        Self {
            daily,
            weekly: daily * 7,
            monthly: daily * 30,
            yearly: daily * 365,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraitTotal {
    pub count: usize,
    pub daily_total: u64,
}

/// Prep points for one wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalletPrep {
    pub total_daily: u64,
    pub by_trait: BTreeMap<TraitKey, TraitTotal>,
    pub projections: Projections,
}

/// One wallet's entry in the cross-wallet breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletShare {
    #[serde(flatten)]
    pub prep: WalletPrep,
    pub share_pct: f64,
}

/// Prep points summed across every tracked wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedPrep {
    pub total_daily: u64,
    pub by_trait: BTreeMap<TraitKey, TraitTotal>,
    pub projections: Projections,
    pub by_wallet: BTreeMap<String, WalletShare>,
}

/// Sum the daily yield of a wallet's assets. Burned assets yield nothing.
///
/// `multiplier` must be one of the [`Multiplier`] variants; callers parse it
/// at the boundary.
pub fn wallet_total(assets: &[Asset], multiplier: Multiplier) -> WalletPrep {
    let mut prep = WalletPrep::default();

    for asset in assets.iter().filter(|a| !a.burned) {
        let key = asset.trait_key();
        let daily = daily_yield(key, multiplier);
        let entry = prep.by_trait.entry(key).or_default();
        entry.count += 1;
        entry.daily_total += daily;
        prep.total_daily += daily;
    }

    prep.projections = Projections::from_daily(prep.total_daily);
    prep
}

/// Merge per-wallet results. Keys are the composite wallet labels; a repeated
/// label keeps its first entry so shares still sum to 100.
pub fn aggregate_across_wallets(per_wallet: &[(String, WalletPrep)]) -> AggregatedPrep {
    let mut agg = AggregatedPrep::default();

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(per_wallet.len());
    for (label, prep) in per_wallet {
        if !seen.insert(label.as_str()) {
            warn!(wallet = %label, "duplicate wallet label, keeping the first entry");
            continue;
        }
        unique.push((label, prep));
    }

    for (_, prep) in &unique {
        agg.total_daily += prep.total_daily;
        for (key, total) in &prep.by_trait {
            let entry = agg.by_trait.entry(*key).or_default();
            entry.count += total.count;
            entry.daily_total += total.daily_total;
        }
    }

    for (label, prep) in unique {
        agg.by_wallet.insert(
            label.clone(),
            WalletShare {
                prep: prep.clone(),
                share_pct: percent_of(prep.total_daily as f64, agg.total_daily as f64),
            },
        );
    }

    agg.projections = Projections::from_daily(agg.total_daily);
    agg
}

/// Group assets by owner and total each tracked wallet with its own multiplier.
///
/// A wallet address listed more than once is counted once, with its first
/// configured label and multiplier.
pub fn prep_for_wallets(wallets: &[TrackedWallet], assets: &[Asset]) -> AggregatedPrep {
    let mut by_owner: HashMap<&str, Vec<Asset>> = HashMap::new();
    for asset in assets {
        by_owner.entry(asset.owner.as_str()).or_default().push(asset.clone());
    }

    let mut seen = HashSet::new();
    let mut per_wallet: Vec<(String, WalletPrep)> = Vec::with_capacity(wallets.len());
    for w in wallets {
        if !seen.insert(w.address.as_str()) {
            warn!(address = %w.address, "wallet configured twice, ignoring repeat");
            continue;
        }
        let owned = by_owner.get(w.address.as_str()).map(Vec::as_slice).unwrap_or(&[]);
        per_wallet.push((w.display_label(), wallet_total(owned, w.multiplier)));
    }

    aggregate_across_wallets(&per_wallet)
}
