use super::{landed_fraction, note, signed, signed_percent, Upgrade, UpgradeKind};
use crate::context::WeaponContext;
use crate::stats::{StatKey, UpgradeError};
use crate::tiers::TierStat;
use crate::undo::{apply_delta, UndoAction};

#[derive(Debug, Clone, Copy, Default)]
pub struct KnifeLifestealUpgrade;

impl Upgrade for KnifeLifestealUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::KnifeLifesteal
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.knife_lifesteal_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::KnifeLifesteal);
        let undo = apply_delta(ctx.target, StatKey::KnifeLifesteal, amount as f64)?;
        notes.push(note(signed_percent(undo.delta), "Lifesteal", tier));
        Ok(undo)
    }
}

/// Range% applied as a flat radius delta
#[derive(Debug, Clone, Copy, Default)]
pub struct KnifeRadiusUpgrade;

impl Upgrade for KnifeRadiusUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::KnifeRadius
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.knife_radius_mult;
        let (mult, tier) = ctx.roll_multiplier(range, TierStat::KnifeRadius);
        let current = StatKey::KnifeRadius.read(ctx.target)?;
        let undo = apply_delta(
            ctx.target,
            StatKey::KnifeRadius,
            current * (mult as f64 - 1.0),
        )?;
        let fraction = landed_fraction(undo.delta, current);
        notes.push(note(signed_percent(fraction), "Knife Radius", tier));
        Ok(undo)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KnifeSplashUpgrade;

impl Upgrade for KnifeSplashUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::KnifeSplash
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.knife_splash_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::KnifeSplash);
        let undo = apply_delta(ctx.target, StatKey::KnifeSplash, amount as f64)?;
        notes.push(note(signed(undo.delta, 2), "Splash Radius", tier));
        Ok(undo)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KnifeMaxTargetsUpgrade;

impl Upgrade for KnifeMaxTargetsUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::KnifeMaxTargets
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.knife_max_targets_add;
        let (amount, tier) = ctx.roll_int(range, TierStat::KnifeMaxTargets, Some(1));
        let undo = apply_delta(ctx.target, StatKey::KnifeMaxTargets, amount as f64)?;
        notes.push(note(signed(undo.delta, 0), "Max Targets", tier));
        Ok(undo)
    }
}
