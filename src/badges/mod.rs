pub mod catalog;
pub mod tiers;

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::core::{Asset, ExternalBadge};
use crate::geocache::GeocacheTier;
use crate::masks::{RarityTier, TraitKey};
use catalog::{BadgeCategory, BadgeDefinition, CACHE_CRACKER, DIAMOND_HANDED, HOLDING_RULES};

pub use tiers::{LoserboardStats, Tier, loserboard_stats, total_score};

/// A catalog badge with how many times it was earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedBadge {
    pub badge: &'static BadgeDefinition,
    pub count: u32,
}

impl EarnedBadge {
    pub fn points(&self) -> u64 {
        self.badge.points * u64::from(self.count)
    }
}

/// Aggregate view of eligible, unburned bags used by the one-time rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingStats {
    pub eligible: usize,
    pub staked: usize,
    pub by_trait: HashMap<TraitKey, usize>,
}

impl HoldingStats {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let mut stats = HoldingStats::default();
        for asset in eligible_held(assets) {
            stats.eligible += 1;
            if asset.staked {
                stats.staked += 1;
            }
            *stats.by_trait.entry(asset.trait_key()).or_default() += 1;
        }
        stats
    }

    pub fn max_same_trait(&self) -> usize {
        self.by_trait.values().copied().max().unwrap_or(0)
    }

    /// Holds at least one bag of every key in the given rarity.
    pub fn has_every(&self, rarity: RarityTier) -> bool {
        TraitKey::ALL
            .iter()
            .filter(|k| k.rarity() == rarity)
            .all(|k| self.by_trait.get(k).is_some_and(|n| *n > 0))
    }

    /// Bags whose rarity is `rarity` or better.
    pub fn count_at_least(&self, rarity: RarityTier) -> usize {
        self.by_trait
            .iter()
            .filter(|(k, _)| k.rarity() >= rarity)
            .map(|(_, n)| *n)
            .sum()
    }
}

type Tally = HashMap<&'static str, u32>;

/// Honorary and soulbound tokens are excluded from every badge count.
fn eligible_held(assets: &[Asset]) -> impl Iterator<Item = &Asset> {
    assets.iter().filter(|a| a.is_badge_eligible() && !a.burned)
}

fn merge_max(into: &mut Tally, from: Tally) {
    for (id, count) in from {
        let entry = into.entry(id).or_insert(0);
        *entry = (*entry).max(count);
    }
}

/// Catalog-ordered badges with a non-zero count.
fn into_earned(tally: Tally) -> Vec<EarnedBadge> {
    let mut earned: Vec<EarnedBadge> = tally
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|(id, count)| catalog::find(id).map(|badge| EarnedBadge { badge, count }))
        .collect();
    earned.sort_by_key(|e| catalog::position(e.badge.id));
    earned
}

/// Stackable badges backed by on-chain holdings: one mask badge per bag and
/// one Diamond Handed per staked bag.
pub fn stackable_from_holdings(assets: &[Asset]) -> Tally {
    let mut tally = Tally::new();
    for asset in eligible_held(assets) {
        *tally.entry(catalog::trait_badge(asset.trait_key())).or_default() += 1;
        if asset.staked {
            *tally.entry(DIAMOND_HANDED).or_default() += 1;
        }
    }
    tally
}

/// Badges for opened (burned) geocaches. Always derived from chain state.
pub fn geocache_family(geocaches: &[Asset]) -> Tally {
    let mut tally = Tally::new();
    for cache in geocaches.iter().filter(|a| a.is_badge_eligible() && a.burned) {
        *tally.entry(CACHE_CRACKER).or_default() += 1;
        if let Some(id) = catalog::cache_opened_badge(GeocacheTier::of(cache)) {
            tally.insert(id, 1);
        }
    }
    tally
}

/// Badges computed from holdings alone, used when no external feed is available.
///
/// `manual_awards` may only name community badges. Everything else is earned
/// from chain state and is ignored here.
pub fn earned_from_holdings(
    assets: &[Asset],
    geocaches: &[Asset],
    manual_awards: &[String],
) -> Vec<EarnedBadge> {
    let mut tally = stackable_from_holdings(assets);

    let stats = HoldingStats::from_assets(assets);
    for rule in HOLDING_RULES.iter().filter(|r| (r.qualifies)(&stats)) {
        tally.insert(rule.badge_id, 1);
    }

    tally.extend(geocache_family(geocaches));

    for id in manual_awards {
        match catalog::find(id) {
            Some(badge) if badge.category == BadgeCategory::Community => {
                tally.insert(badge.id, 1);
            }
            Some(_) => debug!(badge = %id, "manual award names an on-chain badge, skipping"),
            None => debug!(badge = %id, "manual award names an unknown badge, skipping"),
        }
    }

    into_earned(tally)
}

/// Badges from the external provider, reconciled with chain state.
///
/// Stackability comes from the local catalog, never from the provider's
/// category: a stackable badge takes the reported trait count, anything else
/// counts once. On-chain stackable counts act as a floor (max per badge, and
/// badges the feed missed are added). Geocache badges always come from burn
/// state since the provider cannot see that collection.
pub fn earned_from_external(
    external: &[ExternalBadge],
    assets: &[Asset],
    geocaches: &[Asset],
) -> Vec<EarnedBadge> {
    let mut tally = Tally::new();

    for ext in external {
        let Some(badge) = catalog::find_by_name(&ext.badge_name) else {
            debug!(name = %ext.badge_name, "external badge not in catalog, skipping");
            continue;
        };
        if badge.category == BadgeCategory::Geocache {
            continue;
        }
        let count = if badge.stackable { ext.trait_count } else { 1 };
        if count == 0 {
            continue;
        }
        let entry = tally.entry(badge.id).or_insert(0);
        *entry = (*entry).max(count);
    }

    merge_max(&mut tally, stackable_from_holdings(assets));
    tally.extend(geocache_family(geocaches));

    into_earned(tally)
}
