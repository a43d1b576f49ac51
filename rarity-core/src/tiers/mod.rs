//! Per-stat quality tiers and the tier multiplier curve.
//!
//! Tier 1 is the strongest roll, tier 5 the weakest. A tier maps to a scalar through
//! the curve evaluated at `x = (5 - tier) / 4`, so x = 1 at the best tier and 0 at
//! the worst. Every authored range is scaled by that scalar before sampling.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_MULT, DEFAULT_MIN_MULT, TIER_BEST, TIER_WORST};
use crate::ranges::{FloatRange, IntRange};
use crate::rng::RollRng;

/// Stat families that carry their own tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierStat {
    DamagePercent,
    DamageFlat,
    AttackSpeed,
    CritChance,
    CritMultiplier,
    HpFlat,
    HpPercent,
    Regen,
    Armor,
    Evasion,
    Resist,
    KnifeRadius,
    KnifeSplash,
    KnifeLifesteal,
    KnifeMaxTargets,
    ShooterLifetime,
    ShooterForce,
    ShooterProjectiles,
    ShooterAccuracy,
}

impl TierStat {
    pub const COUNT: usize = 19;

    pub const ALL: [TierStat; TierStat::COUNT] = [
        TierStat::DamagePercent,
        TierStat::DamageFlat,
        TierStat::AttackSpeed,
        TierStat::CritChance,
        TierStat::CritMultiplier,
        TierStat::HpFlat,
        TierStat::HpPercent,
        TierStat::Regen,
        TierStat::Armor,
        TierStat::Evasion,
        TierStat::Resist,
        TierStat::KnifeRadius,
        TierStat::KnifeSplash,
        TierStat::KnifeLifesteal,
        TierStat::KnifeMaxTargets,
        TierStat::ShooterLifetime,
        TierStat::ShooterForce,
        TierStat::ShooterProjectiles,
        TierStat::ShooterAccuracy,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// One tier per stat family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSet {
    tiers: [u8; TierStat::COUNT],
}

impl Default for TierSet {
    fn default() -> Self {
        Self::uniform(3)
    }
}

impl TierSet {
    /// Every stat at the same tier (clamped to 1..=5)
    pub fn uniform(tier: u8) -> Self {
        Self {
            tiers: [clamp_tier(tier); TierStat::COUNT],
        }
    }

    /// Independent uniform tier in `[1, 5]` for every stat
    pub fn roll_all(rng: &mut RollRng) -> Self {
        let mut set = Self::default();
        for stat in TierStat::ALL {
            set.set(stat, rng.range(TIER_BEST as i32, TIER_WORST as i32 + 1) as u8);
        }
        set
    }

    pub fn get(&self, stat: TierStat) -> u8 {
        self.tiers[stat.slot()]
    }

    pub fn set(&mut self, stat: TierStat, tier: u8) {
        self.tiers[stat.slot()] = clamp_tier(tier);
    }

    /// Builder-style override, handy for fixing one stat in tests
    pub fn with(mut self, stat: TierStat, tier: u8) -> Self {
        self.set(stat, tier);
        self
    }

    pub fn mean(&self) -> f32 {
        self.tiers.iter().map(|t| *t as f32).sum::<f32>() / TierStat::COUNT as f32
    }
}

fn clamp_tier(tier: u8) -> u8 {
    tier.clamp(TIER_BEST, TIER_WORST)
}

/// Roman numeral shown in notes ("Tier III")
pub fn tier_numeral(tier: u8) -> &'static str {
    match clamp_tier(tier) {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        _ => "V",
    }
}

/// Keyframe of an authored curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub x: f32,
    pub value: f32,
}

/// Tier-to-multiplier mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TierCurve {
    /// `lerp(min_mult, max_mult, x)`
    Linear { min_mult: f32, max_mult: f32 },
    /// Piecewise-linear keyframes over x in `[0, 1]`, sorted by x
    Authored { keys: Vec<CurveKey> },
}

impl Default for TierCurve {
    fn default() -> Self {
        Self::Linear {
            min_mult: DEFAULT_MIN_MULT,
            max_mult: DEFAULT_MAX_MULT,
        }
    }
}

impl TierCurve {
    pub fn evaluate(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Linear { min_mult, max_mult } => min_mult + (max_mult - min_mult) * x,
            Self::Authored { keys } => evaluate_keys(keys, x),
        }
    }
}

fn evaluate_keys(keys: &[CurveKey], x: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 1.0;
    };
    if x <= first.x {
        return first.value;
    }
    if x >= last.x {
        return last.value;
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if x <= b.x {
            let span = b.x - a.x;
            if span <= f32::EPSILON {
                return b.value;
            }
            let t = (x - a.x) / span;
            return a.value + (b.value - a.value) * t;
        }
    }
    last.value
}

/// Tier math: multiplier lookup and range scaling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierSystem {
    pub curve: TierCurve,
}

impl TierSystem {
    pub fn new(curve: TierCurve) -> Self {
        Self { curve }
    }

    pub fn roll_all(&self, rng: &mut RollRng) -> TierSet {
        TierSet::roll_all(rng)
    }

    /// Scalar for a tier; out-of-range tiers are clamped first
    pub fn mult(&self, tier: u8) -> f32 {
        let tier = clamp_tier(tier);
        let x = (TIER_WORST - tier) as f32 / (TIER_WORST - TIER_BEST) as f32;
        self.curve.evaluate(x)
    }

    /// Additive range: both ends times the multiplier
    pub fn scale(&self, range: FloatRange, tier: u8) -> FloatRange {
        let m = self.mult(tier);
        FloatRange::new(range.min * m, range.max * m)
    }

    /// Multiplier-like range: only the excess over 1.0 is scaled
    pub fn scale_multiplier_like(&self, range: FloatRange, tier: u8) -> FloatRange {
        let m = self.mult(tier);
        FloatRange::new(1.0 + (range.min - 1.0) * m, 1.0 + (range.max - 1.0) * m)
    }

    /// Integer range: round each end, fix inversion, then apply the floor
    pub fn scale_int(&self, range: IntRange, tier: u8, floor: Option<i32>) -> IntRange {
        let m = self.mult(tier);
        let mut lo = (range.min as f32 * m).round() as i32;
        let mut hi = (range.max as f32 * m).round() as i32;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        if let Some(floor) = floor {
            lo = lo.max(floor);
            hi = hi.max(floor);
        }
        IntRange::new(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_linear_endpoints() {
        let tiers = TierSystem::default();
        assert!(approx(tiers.mult(1), DEFAULT_MAX_MULT));
        assert!(approx(tiers.mult(5), DEFAULT_MIN_MULT));
        assert!(approx(tiers.mult(3), 1.25));
    }

    #[test]
    fn test_mult_clamps_tier() {
        let tiers = TierSystem::default();
        assert!(approx(tiers.mult(0), tiers.mult(1)));
        assert!(approx(tiers.mult(9), tiers.mult(5)));
    }

    #[test]
    fn test_mult_monotonic() {
        let tiers = TierSystem::default();
        for t in 1..5 {
            assert!(tiers.mult(t) > tiers.mult(t + 1));
        }
    }

    #[test]
    fn test_scale_hp_flat_tier_three() {
        let tiers = TierSystem::default();
        let scaled = tiers.scale(FloatRange::new(15.0, 60.0), 3);
        assert!(approx(scaled.min, 18.75));
        assert!(approx(scaled.max, 75.0));
    }

    #[test]
    fn test_scale_multiplier_like_keeps_anchor() {
        let tiers = TierSystem::default();
        let weak = tiers.scale_multiplier_like(FloatRange::new(1.2, 1.2), 5);
        assert!(approx(weak.min, 1.1));
        let strong = tiers.scale_multiplier_like(FloatRange::new(1.2, 1.2), 1);
        assert!(approx(strong.min, 1.4));
        // reductive ranges shrink toward 1.0 as well
        let interval = tiers.scale_multiplier_like(FloatRange::new(0.9, 0.9), 5);
        assert!(approx(interval.min, 0.95));
    }

    #[test]
    fn test_scale_int_rounds_and_floors() {
        let tiers = TierSystem::default();
        let r = tiers.scale_int(IntRange::new(1, 2), 5, Some(1));
        // 0.5 -> 1 (round half away from zero), 1.0 -> 1
        assert_eq!(r, IntRange::new(1, 1));
        let r = tiers.scale_int(IntRange::new(1, 5), 1, None);
        assert_eq!(r, IntRange::new(2, 10));
        let r = tiers.scale_int(IntRange::new(-3, -1), 5, Some(0));
        assert_eq!(r, IntRange::new(0, 0));
    }

    #[test]
    fn test_scale_int_fixes_inversion() {
        let tiers = TierSystem::new(TierCurve::Linear {
            min_mult: -1.0,
            max_mult: -1.0,
        });
        let r = tiers.scale_int(IntRange::new(1, 4), 3, None);
        assert_eq!(r, IntRange::new(-4, -1));
    }

    #[test]
    fn test_authored_curve() {
        let curve = TierCurve::Authored {
            keys: vec![
                CurveKey { x: 0.0, value: 0.8 },
                CurveKey { x: 0.5, value: 1.0 },
                CurveKey { x: 1.0, value: 3.0 },
            ],
        };
        let tiers = TierSystem::new(curve);
        assert!(approx(tiers.mult(5), 0.8));
        assert!(approx(tiers.mult(3), 1.0));
        assert!(approx(tiers.mult(2), 2.0));
        assert!(approx(tiers.mult(1), 3.0));
    }

    #[test]
    fn test_empty_authored_curve_is_identity() {
        let tiers = TierSystem::new(TierCurve::Authored { keys: vec![] });
        assert!(approx(tiers.mult(2), 1.0));
    }

    #[test]
    fn test_roll_all_in_bounds() {
        let mut rng = RollRng::new(99);
        for _ in 0..50 {
            let set = TierSet::roll_all(&mut rng);
            for stat in TierStat::ALL {
                assert!((1..=5).contains(&set.get(stat)));
            }
        }
    }

    #[test]
    fn test_tier_set_with_clamps() {
        let set = TierSet::uniform(2).with(TierStat::HpFlat, 12);
        assert_eq!(set.get(TierStat::HpFlat), 5);
        assert_eq!(set.get(TierStat::Armor), 2);
    }

    #[test]
    fn test_numerals() {
        assert_eq!(tier_numeral(1), "I");
        assert_eq!(tier_numeral(3), "III");
        assert_eq!(tier_numeral(5), "V");
    }
}
