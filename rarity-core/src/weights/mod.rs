//! Relative upgrade weights and without-replacement sampling.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::DEFAULT_UPGRADE_WEIGHT;
use crate::rng::RollRng;
use crate::upgrades::{Candidate, UpgradeKind};

/// Per-kind weight table; kinds not listed use `default_weight`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeWeightProvider {
    pub default_weight: f32,
    pub weights: BTreeMap<UpgradeKind, f32>,
}

impl Default for UpgradeWeightProvider {
    fn default() -> Self {
        let weights = [
            (UpgradeKind::DamagePercent, 1.2),
            (UpgradeKind::DamageFlat, 1.0),
            (UpgradeKind::AttackSpeed, 0.8),
            (UpgradeKind::Crit, 1.0),
            (UpgradeKind::KnifeMaxTargets, 0.5),
            (UpgradeKind::ShooterProjectiles, 0.5),
            (UpgradeKind::HealthFlat, 1.2),
            (UpgradeKind::ArmorPercent, 0.6),
            (UpgradeKind::EvasionPercent, 0.6),
        ]
        .into_iter()
        .collect();
        Self {
            default_weight: DEFAULT_UPGRADE_WEIGHT,
            weights,
        }
    }
}

impl UpgradeWeightProvider {
    /// Same weight for every kind
    pub fn uniform() -> Self {
        Self {
            default_weight: DEFAULT_UPGRADE_WEIGHT,
            weights: BTreeMap::new(),
        }
    }

    pub fn with_weight(mut self, kind: UpgradeKind, weight: f32) -> Self {
        self.weights.insert(kind, weight);
        self
    }

    pub fn weight_of(&self, kind: UpgradeKind) -> f32 {
        self.weights.get(&kind).copied().unwrap_or(self.default_weight)
    }

    /// Draw up to `k` candidates, weighted, without replacement.
    ///
    /// Non-positive weights are dropped first. Returns empty when nothing with a
    /// positive weight remains.
    pub fn pick_weighted(
        &self,
        candidates: Vec<Candidate>,
        k: usize,
        rng: &mut RollRng,
    ) -> Vec<Candidate> {
        let mut pool: Vec<(Candidate, f32)> = candidates
            .into_iter()
            .map(|c| {
                let w = self.weight_of(c.kind);
                (c, w)
            })
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .collect();

        let mut total: f32 = pool.iter().map(|(_, w)| w).sum();
        if pool.is_empty() || total <= 0.0 {
            return Vec::new();
        }

        let picks = k.min(pool.len());
        let mut chosen = Vec::with_capacity(picks);
        for _ in 0..picks {
            if pool.is_empty() {
                break;
            }
            let mut r = rng.next_f32() * total;
            // fall back to the last entry if float residue keeps r above zero
            let mut index = pool.len() - 1;
            for (i, (_, w)) in pool.iter().enumerate() {
                r -= w;
                if r <= 0.0 {
                    index = i;
                    break;
                }
            }
            let (candidate, weight) = pool.remove(index);
            total -= weight;
            chosen.push(candidate);
            if total <= 0.0 && !pool.is_empty() {
                // recompute to shed accumulated float error
                total = pool.iter().map(|(_, w)| w).sum();
            }
        }
        chosen
    }
}

/// Unweighted fallback: shuffle, then take the first `k`
pub fn shuffle_take(mut candidates: Vec<Candidate>, k: usize, rng: &mut RollRng) -> Vec<Candidate> {
    candidates.shuffle(rng);
    candidates.truncate(k);
    candidates
}

/// Weighted pick when a provider is configured, shuffle-take otherwise
pub fn select(
    provider: Option<&UpgradeWeightProvider>,
    candidates: Vec<Candidate>,
    k: usize,
    rng: &mut RollRng,
) -> Vec<Candidate> {
    match provider {
        Some(provider) => provider.pick_weighted(candidates, k, rng),
        None => shuffle_take(candidates, k, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Capabilities;
    use crate::upgrades::build_candidates;
    use std::collections::HashSet;

    fn all_candidates() -> Vec<Candidate> {
        let caps = Capabilities {
            damage: true,
            crit: true,
            attack_speed: true,
            knife: true,
            shooter: true,
            health: true,
            text_sink: true,
        };
        build_candidates(&caps, &[])
    }

    #[test]
    fn test_weight_lookup_default() {
        let provider = UpgradeWeightProvider::uniform().with_weight(UpgradeKind::Armor, 3.0);
        assert_eq!(provider.weight_of(UpgradeKind::Armor), 3.0);
        assert_eq!(provider.weight_of(UpgradeKind::Regen), DEFAULT_UPGRADE_WEIGHT);
    }

    #[test]
    fn test_pick_no_duplicates() {
        let provider = UpgradeWeightProvider::default();
        let mut rng = RollRng::new(10);
        for _ in 0..50 {
            let picked = provider.pick_weighted(all_candidates(), 5, &mut rng);
            assert_eq!(picked.len(), 5);
            let kinds: HashSet<_> = picked.iter().map(|c| c.kind).collect();
            assert_eq!(kinds.len(), 5);
        }
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let mut provider = UpgradeWeightProvider::uniform();
        for kind in UpgradeKind::ALL {
            if kind != UpgradeKind::Regen && kind != UpgradeKind::Armor {
                provider.weights.insert(kind, 0.0);
            }
        }
        let mut rng = RollRng::new(44);
        for _ in 0..30 {
            let picked = provider.pick_weighted(all_candidates(), 5, &mut rng);
            assert_eq!(picked.len(), 2);
            assert!(picked
                .iter()
                .all(|c| c.kind == UpgradeKind::Regen || c.kind == UpgradeKind::Armor));
        }
    }

    #[test]
    fn test_all_zero_returns_empty() {
        let provider = UpgradeWeightProvider {
            default_weight: 0.0,
            weights: BTreeMap::new(),
        };
        let mut rng = RollRng::new(1);
        assert!(provider.pick_weighted(all_candidates(), 3, &mut rng).is_empty());
    }

    #[test]
    fn test_k_capped_at_pool() {
        let provider = UpgradeWeightProvider::uniform();
        let caps = Capabilities {
            damage: true,
            ..Default::default()
        };
        let mut rng = RollRng::new(2);
        let picked = provider.pick_weighted(build_candidates(&caps, &[]), 10, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_heavy_weight_dominates() {
        let provider = UpgradeWeightProvider::uniform().with_weight(UpgradeKind::Crit, 1000.0);
        let mut rng = RollRng::new(8);
        let mut crit_first = 0;
        for _ in 0..200 {
            let picked = provider.pick_weighted(all_candidates(), 1, &mut rng);
            if picked[0].kind == UpgradeKind::Crit {
                crit_first += 1;
            }
        }
        assert!(crit_first > 180, "crit picked first {crit_first}/200");
    }

    #[test]
    fn test_shuffle_take_no_duplicates() {
        let mut rng = RollRng::new(3);
        let picked = shuffle_take(all_candidates(), 4, &mut rng);
        let kinds: HashSet<_> = picked.iter().map(|c| c.kind).collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn test_select_falls_back_without_provider() {
        let mut rng = RollRng::new(6);
        let picked = select(None, all_candidates(), 3, &mut rng);
        assert_eq!(picked.len(), 3);
    }
}
