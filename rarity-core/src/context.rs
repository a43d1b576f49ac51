//! Per-roll view over everything an upgrade needs.

use crate::modules::{Capabilities, UpgradeTarget};
use crate::ranges::{FloatRange, IntRange, UpgradeRanges};
use crate::rarity::Rarity;
use crate::rng::RollRng;
use crate::tiers::{TierSet, TierStat, TierSystem};

/// Built fresh for every roll and dropped right after; never stored.
pub struct WeaponContext<'a> {
    pub rng: &'a mut RollRng,
    pub rarity: Rarity,
    pub tiers: &'a TierSet,
    pub tier_system: &'a TierSystem,
    pub ranges: &'a UpgradeRanges,
    pub target: &'a mut dyn UpgradeTarget,
    capabilities: Capabilities,
}

impl<'a> WeaponContext<'a> {
    pub fn new(
        rng: &'a mut RollRng,
        rarity: Rarity,
        tiers: &'a TierSet,
        tier_system: &'a TierSystem,
        ranges: &'a UpgradeRanges,
        target: &'a mut dyn UpgradeTarget,
    ) -> Self {
        let capabilities = target.capabilities();
        Self {
            rng,
            rarity,
            tiers,
            tier_system,
            ranges,
            target,
            capabilities,
        }
    }

    /// Modules present on the target when the context was built
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn tier(&self, stat: TierStat) -> u8 {
        self.tiers.get(stat)
    }

    /// Sample an additive range scaled by the stat's tier
    pub fn roll_additive(&mut self, range: FloatRange, stat: TierStat) -> (f32, u8) {
        let tier = self.tier(stat);
        let scaled = self.tier_system.scale(range, tier);
        (self.rng.range_f32(scaled.min, scaled.max), tier)
    }

    /// Sample a multiplier-like range (scaled on its excess over 1.0)
    pub fn roll_multiplier(&mut self, range: FloatRange, stat: TierStat) -> (f32, u8) {
        let tier = self.tier(stat);
        let scaled = self.tier_system.scale_multiplier_like(range, tier);
        (self.rng.range_f32(scaled.min, scaled.max), tier)
    }

    /// Sample an integer range, inclusive on both ends
    pub fn roll_int(&mut self, range: IntRange, stat: TierStat, floor: Option<i32>) -> (i32, u8) {
        let tier = self.tier(stat);
        let scaled = self.tier_system.scale_int(range, tier, floor);
        (self.rng.range(scaled.min, scaled.max + 1), tier)
    }
}
