use super::{landed_fraction, note, signed, signed_percent, Upgrade, UpgradeKind};
use crate::context::WeaponContext;
use crate::modules::Element;
use crate::stats::{StatKey, UpgradeError};
use crate::tiers::TierStat;
use crate::undo::{apply_delta, UndoAction};

/// Flat max health, rolled as a whole number
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthFlatUpgrade;

impl Upgrade for HealthFlatUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::HealthFlat
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.hp_flat_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::HpFlat);
        let undo = apply_delta(ctx.target, StatKey::MaxHealth, amount.round() as f64)?;
        notes.push(note(signed(undo.delta, 0), "Max Health", tier));
        Ok(undo)
    }
}

/// HP% applied as a flat delta against max health at apply time
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthPercentUpgrade;

impl Upgrade for HealthPercentUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::HealthPercent
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.hp_percent_mult;
        percent_as_flat(ctx, notes, range, TierStat::HpPercent, StatKey::MaxHealth)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegenUpgrade;

impl Upgrade for RegenUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::Regen
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.regen_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::Regen);
        let undo = apply_delta(ctx.target, StatKey::Regen, amount as f64)?;
        notes.push(note(format!("{}/s", signed(undo.delta, 2)), "Regen", tier));
        Ok(undo)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArmorUpgrade;

impl Upgrade for ArmorUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::Armor
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.armor_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::Armor);
        let undo = apply_delta(ctx.target, StatKey::Armor, amount as f64)?;
        notes.push(note(signed(undo.delta, 1), "Armor", tier));
        Ok(undo)
    }
}

/// Flat evasion, clamped to the evasion cap
#[derive(Debug, Clone, Copy, Default)]
pub struct EvasionUpgrade;

impl Upgrade for EvasionUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::Evasion
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.evasion_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::Evasion);
        let undo = apply_delta(ctx.target, StatKey::Evasion, amount as f64)?;
        notes.push(note(signed_percent(undo.delta), "Evasion", tier));
        Ok(undo)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArmorPercentUpgrade;

impl Upgrade for ArmorPercentUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::ArmorPercent
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.armor_percent_mult;
        percent_as_flat(ctx, notes, range, TierStat::Armor, StatKey::Armor)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EvasionPercentUpgrade;

impl Upgrade for EvasionPercentUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::EvasionPercent
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.evasion_percent_mult;
        percent_as_flat(ctx, notes, range, TierStat::Evasion, StatKey::Evasion)
    }
}

/// One elemental resist; all four share the resist tier
#[derive(Debug, Clone, Copy)]
pub struct ResistUpgrade {
    pub element: Element,
}

impl ResistUpgrade {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl Upgrade for ResistUpgrade {
    fn kind(&self) -> UpgradeKind {
        match self.element {
            Element::Fire => UpgradeKind::FireResist,
            Element::Cold => UpgradeKind::ColdResist,
            Element::Lightning => UpgradeKind::LightningResist,
            Element::Poison => UpgradeKind::PoisonResist,
        }
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let stat = StatKey::Resist(self.element);
        let range = ctx.ranges.resist_add;
        let (amount, tier) = ctx.roll_additive(range, TierStat::Resist);
        let undo = apply_delta(ctx.target, stat, amount as f64)?;
        notes.push(note(signed_percent(undo.delta), &stat.label(), tier));
        Ok(undo)
    }
}

fn percent_as_flat(
    ctx: &mut WeaponContext<'_>,
    notes: &mut Vec<String>,
    range: crate::ranges::FloatRange,
    tier_stat: TierStat,
    stat: StatKey,
) -> Result<UndoAction, UpgradeError> {
    let (mult, tier) = ctx.roll_multiplier(range, tier_stat);
    let current = stat.read(ctx.target)?;
    let undo = apply_delta(ctx.target, stat, current * (mult as f64 - 1.0))?;
    let fraction = landed_fraction(undo.delta, current);
    notes.push(note(signed_percent(fraction), &stat.label(), tier));
    Ok(undo)
}
