use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata attribute carrying the mask colour.
pub const MASK_TRAIT_TYPE: &str = "Mask";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Mythic,
}

/// Mask colours of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitKey {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Pink,
    White,
    Black,
    Brown,
    Grey,
    Teal,
    Camo,
    #[serde(rename = "Tie Dye")]
    TieDye,
    Zebra,
    Leopard,
    Silver,
    Gold,
    Diamond,
    Rainbow,
    /// No mask at all. Rarer than any colour, so it sits in the top tier.
    Unmasked,
}

/// Static per-trait data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitInfo {
    pub base_yield: u64,
    pub display_color: &'static str,
    pub rarity: RarityTier,
}

impl TraitKey {
    pub const ALL: [TraitKey; 21] = [
        TraitKey::Red,
        TraitKey::Blue,
        TraitKey::Green,
        TraitKey::Yellow,
        TraitKey::Orange,
        TraitKey::Purple,
        TraitKey::Pink,
        TraitKey::White,
        TraitKey::Black,
        TraitKey::Brown,
        TraitKey::Grey,
        TraitKey::Teal,
        TraitKey::Camo,
        TraitKey::TieDye,
        TraitKey::Zebra,
        TraitKey::Leopard,
        TraitKey::Silver,
        TraitKey::Gold,
        TraitKey::Diamond,
        TraitKey::Rainbow,
        TraitKey::Unmasked,
    ];

    /// Key used when the mask attribute is missing or unrecognised.
    pub const FALLBACK: TraitKey = TraitKey::Unmasked;

    pub fn name(self) -> &'static str {
        match self {
            TraitKey::Red => "Red",
            TraitKey::Blue => "Blue",
            TraitKey::Green => "Green",
            TraitKey::Yellow => "Yellow",
            TraitKey::Orange => "Orange",
            TraitKey::Purple => "Purple",
            TraitKey::Pink => "Pink",
            TraitKey::White => "White",
            TraitKey::Black => "Black",
            TraitKey::Brown => "Brown",
            TraitKey::Grey => "Grey",
            TraitKey::Teal => "Teal",
            TraitKey::Camo => "Camo",
            TraitKey::TieDye => "Tie Dye",
            TraitKey::Zebra => "Zebra",
            TraitKey::Leopard => "Leopard",
            TraitKey::Silver => "Silver",
            TraitKey::Gold => "Gold",
            TraitKey::Diamond => "Diamond",
            TraitKey::Rainbow => "Rainbow",
            TraitKey::Unmasked => "Unmasked",
        }
    }

    #[rustfmt::skip]
    pub fn info(self) -> &'static TraitInfo {
        use RarityTier::*;
        match self {
            TraitKey::Red => &TraitInfo { base_yield: 1000, display_color: "#e63946", rarity: Common },
            TraitKey::Blue => &TraitInfo { base_yield: 1025, display_color: "#457b9d", rarity: Common },
            TraitKey::Green => &TraitInfo { base_yield: 1050, display_color: "#2a9d8f", rarity: Common },
            TraitKey::Yellow => &TraitInfo { base_yield: 1075, display_color: "#f4d35e", rarity: Common },
            TraitKey::Orange => &TraitInfo { base_yield: 1100, display_color: "#f4a261", rarity: Common },
            TraitKey::Purple => &TraitInfo { base_yield: 1125, display_color: "#7b2cbf", rarity: Common },
            TraitKey::Pink => &TraitInfo { base_yield: 1150, display_color: "#ff8fab", rarity: Common },
            TraitKey::White => &TraitInfo { base_yield: 1175, display_color: "#f1faee", rarity: Common },
            TraitKey::Black => &TraitInfo { base_yield: 1500, display_color: "#1b1b1b", rarity: Uncommon },
            TraitKey::Brown => &TraitInfo { base_yield: 1550, display_color: "#7f5539", rarity: Uncommon },
            TraitKey::Grey => &TraitInfo { base_yield: 1600, display_color: "#8d99ae", rarity: Uncommon },
            TraitKey::Teal => &TraitInfo { base_yield: 1650, display_color: "#0fa3b1", rarity: Uncommon },
            TraitKey::Camo => &TraitInfo { base_yield: 2500, display_color: "#606c38", rarity: Rare },
            TraitKey::TieDye => &TraitInfo { base_yield: 2750, display_color: "#ff6ec7", rarity: Rare },
            TraitKey::Zebra => &TraitInfo { base_yield: 3000, display_color: "#dee2e6", rarity: Rare },
            TraitKey::Leopard => &TraitInfo { base_yield: 3250, display_color: "#dda15e", rarity: Rare },
            TraitKey::Silver => &TraitInfo { base_yield: 3800, display_color: "#c0c0c0", rarity: Legendary },
            TraitKey::Gold => &TraitInfo { base_yield: 4200, display_color: "#ffd700", rarity: Legendary },
            TraitKey::Diamond => &TraitInfo { base_yield: 5000, display_color: "#b9f2ff", rarity: Legendary },
            TraitKey::Rainbow => &TraitInfo { base_yield: 6500, display_color: "#ff00ff", rarity: Mythic },
            TraitKey::Unmasked => &TraitInfo { base_yield: 8000, display_color: "#ffb4a2", rarity: Mythic },
        }
    }

    pub fn base_yield(self) -> u64 {
        self.info().base_yield
    }

    pub fn rarity(self) -> RarityTier {
        self.info().rarity
    }
}

impl fmt::Display for TraitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a raw mask attribute value onto a [`TraitKey`].
///
/// Matching is case-insensitive, treats `-` and `_` as spaces and ignores
/// repeated whitespace. A few patterned masks are matched by substring since
/// their metadata values carry extra words ("Tie-Dye Swirl", "Desert Camo").
pub fn normalize_trait_key(raw: &str) -> TraitKey {
    let cleaned = raw
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        return TraitKey::FALLBACK;
    }

    if let Some(key) = TraitKey::ALL
        .iter()
        .find(|k| k.name().eq_ignore_ascii_case(&cleaned))
    {
        return *key;
    }

    if cleaned == "gray" {
        return TraitKey::Grey;
    }

    const PATTERNS: [(&str, TraitKey); 6] = [
        ("tie dye", TraitKey::TieDye),
        ("tiedye", TraitKey::TieDye),
        ("camo", TraitKey::Camo),
        ("rainbow", TraitKey::Rainbow),
        ("leopard", TraitKey::Leopard),
        ("zebra", TraitKey::Zebra),
    ];
    PATTERNS
        .iter()
        .find(|(pattern, _)| cleaned.contains(pattern))
        .map(|(_, key)| *key)
        .unwrap_or(TraitKey::FALLBACK)
}
