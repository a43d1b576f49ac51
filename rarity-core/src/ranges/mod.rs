//! Authored base ranges for every stat family.
//!
//! These are the unscaled numbers; the tier multiplier is applied on top at roll
//! time. "Multiplier-like" ranges (e.g. x1.10-x1.30) are scaled on their excess over
//! 1.0, additive ranges are scaled directly.

use serde::{Deserialize, Serialize};

/// Closed float range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Closed integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Base range table. Missing fields in a config file fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeRanges {
    // Damage
    pub damage_percent_mult: FloatRange,
    pub damage_flat_add: IntRange,
    pub attack_interval_mult: FloatRange,

    // Crit
    pub crit_chance_add: FloatRange,
    pub crit_multiplier_add: FloatRange,

    // Knife
    pub knife_lifesteal_add: FloatRange,
    pub knife_radius_mult: FloatRange,
    pub knife_splash_add: FloatRange,
    pub knife_max_targets_add: IntRange,

    // Shooter
    pub shooter_lifetime_add: FloatRange,
    pub shooter_force_mult: FloatRange,
    pub shooter_projectiles_add: IntRange,
    pub shooter_spread_mult: FloatRange,

    // Health / defense
    pub hp_flat_add: FloatRange,
    pub hp_percent_mult: FloatRange,
    pub regen_add: FloatRange,
    pub armor_add: FloatRange,
    pub evasion_add: FloatRange,
    pub armor_percent_mult: FloatRange,
    pub evasion_percent_mult: FloatRange,
    pub resist_add: FloatRange,
}

impl Default for UpgradeRanges {
    fn default() -> Self {
        Self {
            damage_percent_mult: FloatRange::new(1.10, 1.30),
            damage_flat_add: IntRange::new(1, 5),
            // below 1.0: shorter interval = faster attacks
            attack_interval_mult: FloatRange::new(0.85, 0.95),

            crit_chance_add: FloatRange::new(0.02, 0.06),
            crit_multiplier_add: FloatRange::new(0.10, 0.50),

            knife_lifesteal_add: FloatRange::new(0.02, 0.08),
            knife_radius_mult: FloatRange::new(1.05, 1.25),
            knife_splash_add: FloatRange::new(0.10, 0.50),
            knife_max_targets_add: IntRange::new(1, 2),

            shooter_lifetime_add: FloatRange::new(0.10, 0.40),
            shooter_force_mult: FloatRange::new(1.05, 1.25),
            shooter_projectiles_add: IntRange::new(1, 2),
            shooter_spread_mult: FloatRange::new(0.75, 0.90),

            hp_flat_add: FloatRange::new(15.0, 60.0),
            hp_percent_mult: FloatRange::new(1.05, 1.20),
            regen_add: FloatRange::new(0.20, 1.00),
            armor_add: FloatRange::new(2.0, 8.0),
            evasion_add: FloatRange::new(0.01, 0.04),
            armor_percent_mult: FloatRange::new(1.05, 1.15),
            evasion_percent_mult: FloatRange::new(1.05, 1.15),
            resist_add: FloatRange::new(0.03, 0.10),
        }
    }
}

impl UpgradeRanges {
    /// Every float range with its field name, for validation and reports
    pub fn float_ranges(&self) -> Vec<(&'static str, FloatRange)> {
        vec![
            ("damage_percent_mult", self.damage_percent_mult),
            ("attack_interval_mult", self.attack_interval_mult),
            ("crit_chance_add", self.crit_chance_add),
            ("crit_multiplier_add", self.crit_multiplier_add),
            ("knife_lifesteal_add", self.knife_lifesteal_add),
            ("knife_radius_mult", self.knife_radius_mult),
            ("knife_splash_add", self.knife_splash_add),
            ("shooter_lifetime_add", self.shooter_lifetime_add),
            ("shooter_force_mult", self.shooter_force_mult),
            ("shooter_spread_mult", self.shooter_spread_mult),
            ("hp_flat_add", self.hp_flat_add),
            ("hp_percent_mult", self.hp_percent_mult),
            ("regen_add", self.regen_add),
            ("armor_add", self.armor_add),
            ("evasion_add", self.evasion_add),
            ("armor_percent_mult", self.armor_percent_mult),
            ("evasion_percent_mult", self.evasion_percent_mult),
            ("resist_add", self.resist_add),
        ]
    }

    pub fn int_ranges(&self) -> Vec<(&'static str, IntRange)> {
        vec![
            ("damage_flat_add", self.damage_flat_add),
            ("knife_max_targets_add", self.knife_max_targets_add),
            ("shooter_projectiles_add", self.shooter_projectiles_add),
        ]
    }
}
