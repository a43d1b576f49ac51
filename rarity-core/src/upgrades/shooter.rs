use super::{landed_fraction, note, signed, signed_percent, Upgrade, UpgradeKind};
use crate::constants::SHOOTER_LIFETIME_ODDS;
use crate::context::WeaponContext;
use crate::stats::{StatKey, UpgradeError};
use crate::tiers::TierStat;
use crate::undo::{apply_delta, UndoAction};

/// Dual-mode: bullet lifetime or shoot force, 50/50 per roll
#[derive(Debug, Clone, Copy, Default)]
pub struct ShooterRangeUpgrade;

impl Upgrade for ShooterRangeUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::ShooterRange
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        if ctx.rng.chance(SHOOTER_LIFETIME_ODDS) {
            let range = ctx.ranges.shooter_lifetime_add;
            let (amount, tier) = ctx.roll_additive(range, TierStat::ShooterLifetime);
            let undo = apply_delta(ctx.target, StatKey::ShooterLifetime, amount as f64)?;
            notes.push(note(
                format!("{}s", signed(undo.delta, 2)),
                "Bullet Lifetime",
                tier,
            ));
            Ok(undo)
        } else {
            let range = ctx.ranges.shooter_force_mult;
            let (mult, tier) = ctx.roll_multiplier(range, TierStat::ShooterForce);
            let current = StatKey::ShooterForce.read(ctx.target)?;
            let undo = apply_delta(
                ctx.target,
                StatKey::ShooterForce,
                current * (mult as f64 - 1.0),
            )?;
            let fraction = landed_fraction(undo.delta, current);
            notes.push(note(signed_percent(fraction), "Shoot Force", tier));
            Ok(undo)
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShooterProjectilesUpgrade;

impl Upgrade for ShooterProjectilesUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::ShooterProjectiles
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.shooter_projectiles_add;
        let (amount, tier) = ctx.roll_int(range, TierStat::ShooterProjectiles, Some(1));
        let undo = apply_delta(ctx.target, StatKey::ShooterProjectiles, amount as f64)?;
        notes.push(note(signed(undo.delta, 0), "Projectiles", tier));
        Ok(undo)
    }
}

/// Tightens the spread cone by a rolled fraction
#[derive(Debug, Clone, Copy, Default)]
pub struct ShooterAccuracyUpgrade;

impl Upgrade for ShooterAccuracyUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::ShooterAccuracy
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.shooter_spread_mult;
        let (factor, tier) = ctx.roll_multiplier(range, TierStat::ShooterAccuracy);
        let current = StatKey::ShooterSpread.read(ctx.target)?;
        let undo = apply_delta(
            ctx.target,
            StatKey::ShooterSpread,
            current * (factor as f64 - 1.0),
        )?;
        let fraction = landed_fraction(undo.delta, current);
        notes.push(note(signed_percent(fraction), "Spread", tier));
        Ok(undo)
    }
}
