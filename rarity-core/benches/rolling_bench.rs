use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rarity_core::balance::{simulate, SimConfig, SimTarget};
use rarity_core::targets::{Creature, KnifeWeapon};
use rarity_core::weights::UpgradeWeightProvider;
use rarity_core::{Rarity, RarityConfig, WeaponRarityController};

fn bench_reroll(c: &mut Criterion) {
    let mut knife =
        WeaponRarityController::new(KnifeWeapon::default(), 42).with_rarity(Rarity::Legendary);
    c.bench_function("reroll_stats_knife_legendary", |b| {
        b.iter(|| {
            knife.reroll_stats();
            black_box(knife.ledger().len());
        })
    });

    let mut creature = WeaponRarityController::new(Creature::labelled(), 42)
        .with_rarity(Rarity::Legendary)
        .with_weights(UpgradeWeightProvider::default());
    c.bench_function("reroll_stats_creature_weighted", |b| {
        b.iter(|| {
            creature.reroll_stats();
            black_box(creature.ledger().len());
        })
    });
}

fn bench_slot_ops(c: &mut Criterion) {
    let mut knife =
        WeaponRarityController::new(KnifeWeapon::default(), 7).with_rarity(Rarity::Rare);
    knife.reroll_stats();
    c.bench_function("add_remove_cycle", |b| {
        b.iter(|| {
            knife.add_random_upgrade();
            knife.remove_random_upgrade();
        })
    });

    c.bench_function("randomize_random_tier", |b| {
        b.iter(|| knife.randomize_random_tier())
    });
}

fn bench_simulation(c: &mut Criterion) {
    let config = RarityConfig::default();
    let sim = SimConfig {
        run_count: 1_000,
        base_seed: black_box(42),
        target: SimTarget::Knife,
        roll_rarity: true,
    };
    c.bench_function("simulate_1k_knives", |b| {
        b.iter(|| simulate(&config, &sim))
    });
}

criterion_group!(benches, bench_reroll, bench_slot_ops, bench_simulation);
criterion_main!(benches);
