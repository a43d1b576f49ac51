//! Rarity tiers and the weighted rarity roller.
//!
//! Rarity decides how many upgrades a weapon or creature may carry:
//! Common 1, Uncommon 2, Rare 4, Legendary 5.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rng::RollRng;

/// Quality tier of a rolled weapon or creature
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    /// Upper bound on how many upgrades a reroll may apply
    pub fn max_rolls(&self) -> usize {
        match self {
            Self::Common => 1,
            Self::Uncommon => 2,
            Self::Rare => 4,
            Self::Legendary => 5,
        }
    }

    /// Next rarity up, saturating at Legendary
    pub fn next(&self) -> Self {
        match self {
            Self::Common => Self::Uncommon,
            Self::Uncommon => Self::Rare,
            Self::Rare | Self::Legendary => Self::Legendary,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Legendary => "Legendary",
        }
    }

    /// Hex colour used by rich-text reports
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::Common => "#C8C8C8",
            Self::Uncommon => "#4CD964",
            Self::Rare => "#3D8BFF",
            Self::Legendary => "#FFB020",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Common => 0,
            Self::Uncommon => 1,
            Self::Rare => 2,
            Self::Legendary => 3,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Relative odds for each rarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: f32,
    pub uncommon: f32,
    pub rare: f32,
    pub legendary: f32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 60.0,
            uncommon: 25.0,
            rare: 12.0,
            legendary: 3.0,
        }
    }
}

impl RarityWeights {
    pub fn total(&self) -> f32 {
        self.as_array().iter().map(|w| w.max(0.0)).sum()
    }

    /// Weights in fixed Common..Legendary order
    pub fn as_array(&self) -> [f32; 4] {
        [self.common, self.uncommon, self.rare, self.legendary]
    }
}

/// Cumulative-weight draw over the four rarities.
///
/// Negative weights count as zero. A non-positive total yields Common.
pub fn roll_rarity(weights: &RarityWeights, rng: &mut RollRng) -> Rarity {
    let total = weights.total();
    if total <= 0.0 {
        return Rarity::Common;
    }

    let mut r = rng.next_f32() * total;
    let mut last_live = Rarity::Common;
    for (rarity, weight) in Rarity::ALL.iter().zip(weights.as_array()) {
        let weight = weight.max(0.0);
        if weight <= 0.0 {
            continue;
        }
        last_live = *rarity;
        r -= weight;
        if r < 0.0 {
            return *rarity;
        }
    }

    // float residue when r lands on the total
    last_live
}
