//! Edge case & boundary tests
//!
//! - Targets with no modules, or modules missing mid-life
//! - Stats pinned at their clamps
//! - Undo after the stat was moved outside the controller
//! - Degenerate configs (empty curves, zero weights, inverted ranges)

use rarity_core::modules::{Element, HealthModule, TextSink, UpgradeTarget};
use rarity_core::rarity::{roll_rarity, RarityWeights};
use rarity_core::stats::StatKey;
use rarity_core::targets::{BareTarget, Creature, KnifeWeapon};
use rarity_core::tiers::{CurveKey, TierCurve, TierSystem};
use rarity_core::undo::{apply_delta, revert};
use rarity_core::{Rarity, RarityConfig, RollRng, UpgradeError, WeaponRarityController};

// ============================================================
// Helpers
// ============================================================

/// Creature whose health module can be detached at runtime
#[derive(Default)]
struct Detachable {
    health: Option<rarity_core::modules::HealthStats>,
}

impl UpgradeTarget for Detachable {
    fn health(&mut self) -> Option<&mut dyn HealthModule> {
        self.health.as_mut().map(|h| h as &mut dyn HealthModule)
    }
}

// ============================================================
// 1. Missing modules
// ============================================================

#[test]
fn test_bare_target_every_operation_is_safe() {
    let mut controller = WeaponRarityController::new(BareTarget, 5).with_rarity(Rarity::Legendary);
    controller.reroll_stats();
    assert!(controller.ledger().is_empty());
    assert!(!controller.add_random_upgrade());
    assert!(!controller.remove_random_upgrade());
    assert!(!controller.reroll_stat_at(0, true));
    assert!(!controller.reroll_stat_into_another_at(0));
    controller.randomize_random_tier();
    assert_eq!(controller.upgrade_rarity_keep_stats(), Rarity::Legendary);
}

#[test]
fn test_read_missing_module_errors() {
    let mut bare = BareTarget;
    let err = StatKey::Damage.read(&mut bare).unwrap_err();
    assert!(matches!(err, UpgradeError::MissingModule { .. }));
    assert!(apply_delta(&mut bare, StatKey::Armor, 1.0).is_err());
}

#[test]
fn test_module_detached_before_reroll() {
    let mut controller = WeaponRarityController::new(
        Detachable {
            health: Some(Default::default()),
        },
        17,
    )
    .with_rarity(Rarity::Rare);
    controller.reroll_stats();
    assert!(!controller.ledger().is_empty());

    controller.target_mut().health = None;
    // undo fails quietly, the ledger is still cleared and nothing new applies
    controller.reroll_stats();
    assert!(controller.ledger().is_empty());
    assert!(controller.report().unwrap().contains("no applicable upgrades"));
}

// ============================================================
// 2. Clamps
// ============================================================

#[test]
fn test_saturated_resist_records_noop() {
    let mut creature = Creature::default();
    creature.health.set_resist(Element::Cold, 0.95);
    let undo = apply_delta(&mut creature, StatKey::Resist(Element::Cold), 0.08).unwrap();
    assert!(undo.is_noop());
    revert(&mut creature, &undo).unwrap();
    assert!((creature.health.cold_resist - 0.95).abs() < 1e-6);
}

#[test]
fn test_undo_after_external_change_reclamps() {
    let mut knife = KnifeWeapon::default();
    let undo = apply_delta(&mut knife, StatKey::CritChance, 0.04).unwrap();
    // crit chance knocked down by something else
    knife.crit.chance = 0.01;
    let restored = revert(&mut knife, &undo).unwrap();
    assert_eq!(restored, 0.0);
    assert_eq!(knife.crit.chance, 0.0);
}

#[test]
fn test_attack_interval_floor() {
    let mut knife = KnifeWeapon::default();
    knife.attack_speed.interval = 0.06;
    let undo = apply_delta(&mut knife, StatKey::AttackInterval, -1.0).unwrap();
    assert!((knife.attack_speed.interval - 0.05).abs() < 1e-6);
    assert!((undo.delta + 0.01).abs() < 1e-5);
}

#[test]
fn test_integer_stats_never_below_one() {
    let mut knife = KnifeWeapon::default();
    apply_delta(&mut knife, StatKey::KnifeMaxTargets, -10.0).unwrap();
    assert_eq!(knife.knife.max_targets, 1);
    apply_delta(&mut knife, StatKey::Damage, 0.4).unwrap();
    assert_eq!(knife.damage.damage, 10);
}

// ============================================================
// 3. Degenerate tables
// ============================================================

#[test]
fn test_zero_rarity_weights_fall_back_to_common() {
    let weights = RarityWeights {
        common: 0.0,
        uncommon: 0.0,
        rare: 0.0,
        legendary: 0.0,
    };
    let mut rng = RollRng::new(1);
    for _ in 0..20 {
        assert_eq!(roll_rarity(&weights, &mut rng), Rarity::Common);
    }
}

#[test]
fn test_negative_rarity_weight_ignored() {
    let weights = RarityWeights {
        common: -10.0,
        uncommon: 0.0,
        rare: 1.0,
        legendary: 0.0,
    };
    let mut rng = RollRng::new(2);
    for _ in 0..50 {
        assert_eq!(roll_rarity(&weights, &mut rng), Rarity::Rare);
    }
}

#[test]
fn test_flat_authored_curve() {
    let system = TierSystem::new(TierCurve::Authored {
        keys: vec![CurveKey { x: 0.0, value: 1.0 }, CurveKey { x: 1.0, value: 1.0 }],
    });
    for tier in 0..=9 {
        assert_eq!(system.mult(tier), 1.0);
    }
}

#[test]
fn test_out_of_range_tier_clamped() {
    let system = TierSystem::default();
    assert_eq!(system.mult(0), system.mult(1));
    assert_eq!(system.mult(200), system.mult(5));
}

#[test]
fn test_malformed_config_text() {
    assert!(RarityConfig::from_ron_str("(seed: \"nope\")").is_err());
    assert!(RarityConfig::from_json_str("{ not json").is_err());
    assert!(RarityConfig::from_json_str(r#"{ "ranges": { "armor_add": { "min": 8, "max": 2 } } }"#).is_err());
}

#[test]
fn test_empty_sink_text_after_clear() {
    let mut controller = WeaponRarityController::new(KnifeWeapon::default(), 9);
    controller.reroll_stats();
    assert!(!controller.target().label.text().is_empty());
    controller.clear();
    assert!(controller.ledger().is_empty());
    assert_eq!(controller.target().label.text(), "");
    assert_eq!(controller.target().damage, KnifeWeapon::default().damage);
}
