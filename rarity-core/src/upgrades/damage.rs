use super::{landed_fraction, note, signed, signed_percent, Upgrade, UpgradeKind};
use crate::context::WeaponContext;
use crate::stats::{StatKey, UpgradeError};
use crate::tiers::TierStat;
use crate::undo::{apply_delta, UndoAction};

/// Damage% converted to a flat delta against the damage at apply time
#[derive(Debug, Clone, Copy, Default)]
pub struct DamagePercentUpgrade;

impl Upgrade for DamagePercentUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::DamagePercent
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.damage_percent_mult;
        let (mult, tier) = ctx.roll_multiplier(range, TierStat::DamagePercent);
        let current = StatKey::Damage.read(ctx.target)?;
        let bonus = mult as f64 - 1.0;
        let mut requested = (current * bonus).round();
        // a positive roll on a small weapon still lands at least one point
        if bonus > 0.0 && current > 0.0 && requested < 1.0 {
            requested = 1.0;
        }
        let undo = apply_delta(ctx.target, StatKey::Damage, requested)?;
        notes.push(note(
            format!("{} ({})", signed_percent(bonus), signed(undo.delta, 0)),
            "Damage",
            tier,
        ));
        Ok(undo)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DamageFlatUpgrade;

impl Upgrade for DamageFlatUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::DamageFlat
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.damage_flat_add;
        let (amount, tier) = ctx.roll_int(range, TierStat::DamageFlat, Some(1));
        let undo = apply_delta(ctx.target, StatKey::Damage, amount as f64)?;
        notes.push(note(signed(undo.delta, 0), "Damage", tier));
        Ok(undo)
    }
}

/// Shortens the attack interval by a rolled fraction
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackSpeedUpgrade;

impl Upgrade for AttackSpeedUpgrade {
    fn kind(&self) -> UpgradeKind {
        UpgradeKind::AttackSpeed
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError> {
        let range = ctx.ranges.attack_interval_mult;
        let (factor, tier) = ctx.roll_multiplier(range, TierStat::AttackSpeed);
        let current = StatKey::AttackInterval.read(ctx.target)?;
        let undo = apply_delta(
            ctx.target,
            StatKey::AttackInterval,
            current * (factor as f64 - 1.0),
        )?;
        let fraction = landed_fraction(undo.delta, current);
        notes.push(note(signed_percent(fraction), "Attack Interval", tier));
        Ok(undo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::UpgradeRanges;
    use crate::rng::RollRng;
    use crate::targets::KnifeWeapon;
    use crate::tiers::{TierSet, TierSystem};
    use crate::undo::revert;

    fn run(upgrade: &dyn Upgrade, knife: &mut KnifeWeapon, seed: u64) -> (UndoAction, String) {
        let mut rng = RollRng::new(seed);
        let tiers = TierSet::uniform(1);
        let system = TierSystem::default();
        let ranges = UpgradeRanges::default();
        let mut ctx = WeaponContext::new(
            &mut rng,
            Default::default(),
            &tiers,
            &system,
            &ranges,
            knife,
        );
        let mut notes = Vec::new();
        let undo = upgrade.apply(&mut ctx, &mut notes).unwrap();
        (undo, notes.pop().unwrap())
    }

    #[test]
    fn test_damage_percent_flat_delta() {
        let mut knife = KnifeWeapon::default();
        knife.damage.damage = 100;
        let (undo, line) = run(&DamagePercentUpgrade, &mut knife, 4);
        // tier I doubles the excess: x1.20..x1.60
        assert!((20..=60).contains(&(knife.damage.damage - 100)));
        assert!(line.ends_with("Damage (Tier I)"), "{line}");
        revert(&mut knife, &undo).unwrap();
        assert_eq!(knife.damage.damage, 100);
    }

    #[test]
    fn test_damage_percent_min_one_point() {
        let mut knife = KnifeWeapon::default();
        knife.damage.damage = 1;
        let (undo, _) = run(&DamagePercentUpgrade, &mut knife, 8);
        assert_eq!(undo.delta, 1.0);
    }

    #[test]
    fn test_damage_flat_tier_one() {
        let mut knife = KnifeWeapon::default();
        let (undo, line) = run(&DamageFlatUpgrade, &mut knife, 15);
        assert!((2.0..=10.0).contains(&undo.delta));
        assert_eq!(line, format!("+{} Damage (Tier I)", undo.delta as i32));
    }

    #[test]
    fn test_attack_speed_shortens_interval() {
        let mut knife = KnifeWeapon::default();
        let (undo, line) = run(&AttackSpeedUpgrade, &mut knife, 16);
        assert!(knife.attack_speed.interval < 1.0);
        assert!(undo.delta < 0.0);
        assert!(line.starts_with('-'), "{line}");
        revert(&mut knife, &undo).unwrap();
        assert!((knife.attack_speed.interval - 1.0).abs() < 1e-6);
    }
}
