use serde::Serialize;

use super::HoldingStats;
use crate::geocache::GeocacheTier;
use crate::masks::{RarityTier, TraitKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Mask,
    Holding,
    Loyalty,
    Geocache,
    Community,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u64,
    /// Stackable badges score `points × count`; the rest score once.
    pub stackable: bool,
    pub category: BadgeCategory,
}

const fn stackable(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    points: u64,
    category: BadgeCategory,
) -> BadgeDefinition {
    BadgeDefinition { id, name, description, points, stackable: true, category }
}

const fn one_time(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    points: u64,
    category: BadgeCategory,
) -> BadgeDefinition {
    BadgeDefinition { id, name, description, points, stackable: false, category }
}

pub const DIAMOND_HANDED: &str = "diamond-handed";
pub const CACHE_CRACKER: &str = "cache-cracker";

use BadgeCategory::*;

#[rustfmt::skip]
pub static CATALOG: &[BadgeDefinition] = &[
    // Mask badges, one per qualifying bag
    stackable("common-meat", "Common Meat", "Hold a common-mask MeatBag", 400, Mask),
    stackable("uncommon-meat", "Uncommon Meat", "Hold an uncommon-mask MeatBag", 800, Mask),
    stackable("camo-mask", "Camo Mask", "Hold a Camo MeatBag", 1500, Mask),
    stackable("tie-dye-mask", "Tie Dye Mask", "Hold a Tie Dye MeatBag", 1750, Mask),
    stackable("zebra-mask", "Zebra Mask", "Hold a Zebra MeatBag", 2000, Mask),
    stackable("leopard-mask", "Leopard Mask", "Hold a Leopard MeatBag", 2250, Mask),
    stackable("silver-mask", "Silver Mask", "Hold a Silver MeatBag", 3500, Mask),
    stackable("gold-mask", "Gold Mask", "Hold a Gold MeatBag", 4000, Mask),
    stackable("diamond-mask", "Diamond Mask", "Hold a Diamond MeatBag", 5000, Mask),
    stackable("rainbow-mask", "Rainbow Mask", "Hold a Rainbow MeatBag", 7500, Mask),
    stackable("unmasked", "Unmasked", "Hold a MeatBag with no mask", 10000, Mask),
    stackable(DIAMOND_HANDED, "Diamond Handed", "Keep a MeatBag staked", 1000, Loyalty),
    stackable(CACHE_CRACKER, "Cache Cracker", "Open a GeoCache", 500, Geocache),
    // Holding milestones
    one_time("first-bag", "First Bag", "Hold your first MeatBag", 40, Holding),
    one_time("ten-pack", "Ten Pack", "Hold 10 MeatBags", 2500, Holding),
    one_time("quarter-pounder", "Quarter Pounder", "Hold 25 MeatBags", 6000, Holding),
    one_time("meat-locker", "Meat Locker", "Hold 50 MeatBags", 15000, Holding),
    one_time("matching-set", "Matching Set", "Hold 5 MeatBags with the same mask", 3000, Holding),
    one_time("full-spectrum", "Full Spectrum", "Hold every common mask colour", 5000, Holding),
    one_time("rare-breed", "Rare Breed", "Hold a legendary or mythic mask", 2000, Holding),
    // GeoCache openings, one per tier
    one_time("common-cache-opened", "Common Cache Opened", "Open a common GeoCache", 250, Geocache),
    one_time("uncommon-cache-opened", "Uncommon Cache Opened", "Open an uncommon GeoCache", 500, Geocache),
    one_time("rare-cache-opened", "Rare Cache Opened", "Open a rare GeoCache", 1000, Geocache),
    one_time("epic-cache-opened", "Epic Cache Opened", "Open an epic GeoCache", 2000, Geocache),
    one_time("legendary-cache-opened", "Legendary Cache Opened", "Open a legendary GeoCache", 4000, Geocache),
    // Awarded by hand
    one_time("og-minter", "OG Minter", "Minted during the original drop", 5000, Community),
    one_time("community-helper", "Community Helper", "Recognised for helping the community", 1500, Community),
    one_time("raid-leader", "Raid Leader", "Led a community raid", 2500, Community),
];

pub fn find(id: &str) -> Option<&'static BadgeDefinition> {
    CATALOG.iter().find(|b| b.id == id)
}

/// Match an external provider's badge name against display names.
pub fn find_by_name(name: &str) -> Option<&'static BadgeDefinition> {
    let name = name.trim();
    CATALOG.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Position of a badge in the catalog, used to order results.
pub fn position(id: &str) -> Option<usize> {
    CATALOG.iter().position(|b| b.id == id)
}

/// Stackable badge earned per bag with the given mask.
pub fn trait_badge(key: TraitKey) -> &'static str {
    match key {
        TraitKey::Camo => "camo-mask",
        TraitKey::TieDye => "tie-dye-mask",
        TraitKey::Zebra => "zebra-mask",
        TraitKey::Leopard => "leopard-mask",
        TraitKey::Silver => "silver-mask",
        TraitKey::Gold => "gold-mask",
        TraitKey::Diamond => "diamond-mask",
        TraitKey::Rainbow => "rainbow-mask",
        TraitKey::Unmasked => "unmasked",
        other => match other.rarity() {
            RarityTier::Uncommon => "uncommon-meat",
            _ => "common-meat",
        },
    }
}

/// One-time badge for opening a cache of the given tier.
pub fn cache_opened_badge(tier: GeocacheTier) -> Option<&'static str> {
    match tier {
        GeocacheTier::Common => Some("common-cache-opened"),
        GeocacheTier::Uncommon => Some("uncommon-cache-opened"),
        GeocacheTier::Rare => Some("rare-cache-opened"),
        GeocacheTier::Epic => Some("epic-cache-opened"),
        GeocacheTier::Legendary => Some("legendary-cache-opened"),
        GeocacheTier::Unknown => None,
    }
}

/// A one-time badge unlocked by aggregate holdings.
pub struct HoldingRule {
    pub badge_id: &'static str,
    pub qualifies: fn(&HoldingStats) -> bool,
}

pub static HOLDING_RULES: &[HoldingRule] = &[
    HoldingRule { badge_id: "first-bag", qualifies: |s| s.eligible >= 1 },
    HoldingRule { badge_id: "ten-pack", qualifies: |s| s.eligible >= 10 },
    HoldingRule { badge_id: "quarter-pounder", qualifies: |s| s.eligible >= 25 },
    HoldingRule { badge_id: "meat-locker", qualifies: |s| s.eligible >= 50 },
    HoldingRule { badge_id: "matching-set", qualifies: |s| s.max_same_trait() >= 5 },
    HoldingRule { badge_id: "full-spectrum", qualifies: |s| s.has_every(RarityTier::Common) },
    HoldingRule {
        badge_id: "rare-breed",
        qualifies: |s| s.count_at_least(RarityTier::Legendary) >= 1,
    },
];
