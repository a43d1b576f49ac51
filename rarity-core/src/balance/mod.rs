//! Monte-Carlo roll distribution
//!
//! Rolls many independent controllers in parallel and aggregates what came out:
//! rarity histogram, ledger length per rarity, how often each upgrade kind was
//! picked, and the mean tier. Used to sanity-check weight tables before shipping.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::RarityConfig;
use crate::controller::WeaponRarityController;
use crate::logging::TimingSpan;
use crate::modules::UpgradeTarget;
use crate::rarity::Rarity;
use crate::rng::derive_seed;
use crate::targets::{Creature, KnifeWeapon, ShooterWeapon};
use crate::upgrades::UpgradeKind;

/// Which reference target each simulated controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SimTarget {
    Knife,
    Shooter,
    Creature,
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub run_count: u64,
    pub base_seed: u64,
    pub target: SimTarget,
    /// Draw rarity from the configured weights; otherwise use the config's rarity
    pub roll_rarity: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            run_count: 10_000,
            base_seed: 42,
            target: SimTarget::Knife,
            roll_rarity: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollDistributionReport {
    pub total_runs: u64,
    pub rarity_counts: BTreeMap<Rarity, u64>,
    pub avg_ledger_len: BTreeMap<Rarity, f64>,
    pub kind_picks: BTreeMap<UpgradeKind, u64>,
    pub mean_tier: f64,
}

impl RollDistributionReport {
    pub fn total_picks(&self) -> u64 {
        self.kind_picks.values().sum()
    }

    /// Largest share of all picks taken by a single kind
    pub fn max_kind_share(&self) -> f64 {
        let total = self.total_picks();
        if total == 0 {
            return 0.0;
        }
        let max = self.kind_picks.values().copied().max().unwrap_or(0);
        max as f64 / total as f64
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

struct RunOutcome {
    rarity: Rarity,
    kinds: Vec<UpgradeKind>,
    mean_tier: f32,
}

fn run_one<T: UpgradeTarget>(target: T, config: &RarityConfig, sim: &SimConfig, seed: u64) -> RunOutcome {
    let mut run_config = config.clone();
    run_config.seed = seed;
    let mut controller = WeaponRarityController::from_config(target, &run_config);
    if sim.roll_rarity {
        controller.roll_rarity();
    } else {
        controller.reroll_stats();
    }
    RunOutcome {
        rarity: controller.rarity(),
        kinds: controller.ledger().kinds(),
        mean_tier: controller.tiers().mean(),
    }
}

/// Run the simulation with rayon; every run is seeded from `base_seed` and its index
pub fn simulate(config: &RarityConfig, sim: &SimConfig) -> RollDistributionReport {
    let _span = TimingSpan::new("balance_simulate");

    let outcomes: Vec<RunOutcome> = (0..sim.run_count)
        .into_par_iter()
        .map(|i| {
            let seed = derive_seed(sim.base_seed, &format!("run-{i}"));
            match sim.target {
                SimTarget::Knife => run_one(KnifeWeapon::default(), config, sim, seed),
                SimTarget::Shooter => run_one(ShooterWeapon::default(), config, sim, seed),
                SimTarget::Creature => run_one(Creature::default(), config, sim, seed),
            }
        })
        .collect();

    let report = aggregate(&outcomes);
    tracing::info!(
        runs = report.total_runs,
        picks = report.total_picks(),
        max_kind_share = report.max_kind_share(),
        "balance simulation finished"
    );
    report
}

fn aggregate(outcomes: &[RunOutcome]) -> RollDistributionReport {
    if outcomes.is_empty() {
        return RollDistributionReport::default();
    }

    let mut rarity_counts: BTreeMap<Rarity, u64> = BTreeMap::new();
    let mut ledger_totals: BTreeMap<Rarity, u64> = BTreeMap::new();
    let mut kind_picks: BTreeMap<UpgradeKind, u64> = BTreeMap::new();
    let mut tier_sum = 0.0f64;

    for outcome in outcomes {
        *rarity_counts.entry(outcome.rarity).or_default() += 1;
        *ledger_totals.entry(outcome.rarity).or_default() += outcome.kinds.len() as u64;
        for kind in &outcome.kinds {
            *kind_picks.entry(*kind).or_default() += 1;
        }
        tier_sum += outcome.mean_tier as f64;
    }

    let avg_ledger_len = rarity_counts
        .iter()
        .map(|(rarity, count)| {
            let total = ledger_totals.get(rarity).copied().unwrap_or(0);
            (*rarity, total as f64 / *count as f64)
        })
        .collect();

    RollDistributionReport {
        total_runs: outcomes.len() as u64,
        rarity_counts,
        avg_ledger_len,
        kind_picks,
        mean_tier: tier_sum / outcomes.len() as f64,
    }
}
