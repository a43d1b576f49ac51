use super::{note, signed, signed_percent, Upgrade, UpgradeKind};
use crate::constants::CRIT_CHANCE_ODDS;
use crate::context::WeaponContext;
use crate::stats::{StatKey, UpgradeError};
use crate::tiers::TierStat;
use crate::undo::{apply_delta, UndoAction};

/// Dual-mode: crit chance (60%) or crit multiplier (40%), decided per roll
#[derive(Debug, Clone, Copy, Default)]
pub struct CritUpgrade;

impl Upgrade for CritUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::Crit
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        if ctx.rng.chance(CRIT_CHANCE_ODDS) {
            let range = ctx.ranges.crit_chance_add;
            let (amount, tier) = ctx.roll_additive(range, TierStat::CritChance);
            let undo = apply_delta(ctx.target, StatKey::CritChance, amount as f64)?;
            notes.push(note(signed_percent(undo.delta), "Crit Chance", tier));
            Ok(undo)
        } else {
            let range = ctx.ranges.crit_multiplier_add;
            let (amount, tier) = ctx.roll_additive(range, TierStat::CritMultiplier);
            let undo = apply_delta(ctx.target, StatKey::CritMultiplier, amount as f64)?;
            notes.push(note(
                format!("{}x", signed(undo.delta, 2)),
                "Crit Multiplier",
                tier,
            ));
            Ok(undo)
        }
    }
}
