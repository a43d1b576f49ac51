//! Centralized tuning constants for the rarity/upgrade engine.
//!
//! Authored ranges live in `ranges`, per-kind weights in `weights`. Only values
//! shared between several modules belong here.

// =====================================================
// Tiers
// =====================================================

/// Best tier (strongest roll)
pub const TIER_BEST: u8 = 1;

/// Worst tier (weakest roll)
pub const TIER_WORST: u8 = 5;

/// Default linear curve: multiplier at the worst tier
pub const DEFAULT_MIN_MULT: f32 = 0.5;

/// Default linear curve: multiplier at the best tier
pub const DEFAULT_MAX_MULT: f32 = 2.0;

// =====================================================
// Stat clamps
// =====================================================

/// Ceiling for elemental resists (95%)
pub const RESIST_CAP: f64 = 0.95;

/// Ceiling for evasion (95%)
pub const EVASION_CAP: f64 = 0.95;

/// Ceiling for probability-like stats (crit chance, lifesteal)
pub const CHANCE_CAP: f64 = 1.0;

/// Crit multiplier can never drop below a plain hit
pub const MIN_CRIT_MULTIPLIER: f64 = 1.0;

/// Fastest allowed attack interval in seconds
pub const MIN_ATTACK_INTERVAL: f64 = 0.05;

/// Max health floor so undo never kills a target outright
pub const MIN_MAX_HEALTH: f64 = 1.0;

// =====================================================
// Dual-mode upgrades
// =====================================================

/// Probability that the crit upgrade rolls chance instead of multiplier
pub const CRIT_CHANCE_ODDS: f32 = 0.6;

/// Probability that the shooter range upgrade rolls lifetime instead of force
pub const SHOOTER_LIFETIME_ODDS: f32 = 0.5;

// =====================================================
// Weights
// =====================================================

/// Weight used for kinds missing from a weight table
pub const DEFAULT_UPGRADE_WEIGHT: f32 = 1.0;
