//! Upgrade variants, one per stat family.
//!
//! Every variant follows the same contract: read its tier, scale its authored range,
//! sample, move exactly one stat through `undo::apply_delta`, push one note line and
//! hand back the `UndoAction`.

mod crit;
mod damage;
mod health;
mod knife;
mod shooter;

pub use crit::CritUpgrade;
pub use damage::{AttackSpeedUpgrade, DamageFlatUpgrade, DamagePercentUpgrade};
pub use health::{
    ArmorPercentUpgrade, ArmorUpgrade, EvasionPercentUpgrade, EvasionUpgrade,
    HealthFlatUpgrade, HealthPercentUpgrade, RegenUpgrade, ResistUpgrade,
};
pub use knife::{KnifeLifestealUpgrade, KnifeMaxTargetsUpgrade, KnifeRadiusUpgrade, KnifeSplashUpgrade};
pub use shooter::{ShooterAccuracyUpgrade, ShooterProjectilesUpgrade, ShooterRangeUpgrade};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::WeaponContext;
use crate::modules::{Capabilities, Element, ModuleKind};
use crate::stats::UpgradeError;
use crate::tiers::tier_numeral;
use crate::undo::UndoAction;

/// Type tag of an upgrade; the ledger stores these, not the upgrade objects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum UpgradeKind {
    DamagePercent,
    DamageFlat,
    AttackSpeed,
    Crit,
    KnifeLifesteal,
    KnifeRadius,
    KnifeSplash,
    KnifeMaxTargets,
    ShooterRange,
    ShooterProjectiles,
    ShooterAccuracy,
    HealthFlat,
    HealthPercent,
    Regen,
    Armor,
    Evasion,
    ArmorPercent,
    EvasionPercent,
    FireResist,
    ColdResist,
    LightningResist,
    PoisonResist,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 22] = [
        UpgradeKind::DamagePercent,
        UpgradeKind::DamageFlat,
        UpgradeKind::AttackSpeed,
        UpgradeKind::Crit,
        UpgradeKind::KnifeLifesteal,
        UpgradeKind::KnifeRadius,
        UpgradeKind::KnifeSplash,
        UpgradeKind::KnifeMaxTargets,
        UpgradeKind::ShooterRange,
        UpgradeKind::ShooterProjectiles,
        UpgradeKind::ShooterAccuracy,
        UpgradeKind::HealthFlat,
        UpgradeKind::HealthPercent,
        UpgradeKind::Regen,
        UpgradeKind::Armor,
        UpgradeKind::Evasion,
        UpgradeKind::ArmorPercent,
        UpgradeKind::EvasionPercent,
        UpgradeKind::FireResist,
        UpgradeKind::ColdResist,
        UpgradeKind::LightningResist,
        UpgradeKind::PoisonResist,
    ];

    /// Module the target must carry for this kind to be a candidate
    pub fn required_module(&self) -> ModuleKind {
        match self {
            Self::DamagePercent | Self::DamageFlat => ModuleKind::Damage,
            Self::AttackSpeed => ModuleKind::AttackSpeed,
            Self::Crit => ModuleKind::Crit,
            Self::KnifeLifesteal | Self::KnifeRadius | Self::KnifeSplash | Self::KnifeMaxTargets => {
                ModuleKind::Knife
            }
            Self::ShooterRange | Self::ShooterProjectiles | Self::ShooterAccuracy => {
                ModuleKind::Shooter
            }
            _ => ModuleKind::Health,
        }
    }

    pub fn instantiate(&self) -> Box<dyn Upgrade> {
        match self {
            Self::DamagePercent => Box::new(DamagePercentUpgrade),
            Self::DamageFlat => Box::new(DamageFlatUpgrade),
            Self::AttackSpeed => Box::new(AttackSpeedUpgrade),
            Self::Crit => Box::new(CritUpgrade),
            Self::KnifeLifesteal => Box::new(KnifeLifestealUpgrade),
            Self::KnifeRadius => Box::new(KnifeRadiusUpgrade),
            Self::KnifeSplash => Box::new(KnifeSplashUpgrade),
            Self::KnifeMaxTargets => Box::new(KnifeMaxTargetsUpgrade),
            Self::ShooterRange => Box::new(ShooterRangeUpgrade),
            Self::ShooterProjectiles => Box::new(ShooterProjectilesUpgrade),
            Self::ShooterAccuracy => Box::new(ShooterAccuracyUpgrade),
            Self::HealthFlat => Box::new(HealthFlatUpgrade),
            Self::HealthPercent => Box::new(HealthPercentUpgrade),
            Self::Regen => Box::new(RegenUpgrade),
            Self::Armor => Box::new(ArmorUpgrade),
            Self::Evasion => Box::new(EvasionUpgrade),
            Self::ArmorPercent => Box::new(ArmorPercentUpgrade),
            Self::EvasionPercent => Box::new(EvasionPercentUpgrade),
            Self::FireResist => Box::new(ResistUpgrade::new(Element::Fire)),
            Self::ColdResist => Box::new(ResistUpgrade::new(Element::Cold)),
            Self::LightningResist => Box::new(ResistUpgrade::new(Element::Lightning)),
            Self::PoisonResist => Box::new(ResistUpgrade::new(Element::Poison)),
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One stat family's roll-and-apply logic
pub trait Upgrade: fmt::Debug {
    fn kind(&self) -> UpgradeKind;

    /// True iff every module this upgrade touches is present
    fn is_applicable(&self, capabilities: &Capabilities) -> bool {
        capabilities.has(self.kind().required_module())
    }

    fn apply(
        &self,
        ctx: &mut WeaponContext<'_>,
        notes: &mut Vec<String>,
    ) -> Result<UndoAction, UpgradeError>;
}

/// An upgrade eligible for selection this roll
#[derive(Debug)]
pub struct Candidate {
    pub kind: UpgradeKind,
    pub upgrade: Box<dyn Upgrade>,
}

/// One candidate per kind whose modules are present, skipping `exclude`.
/// Order follows `UpgradeKind::ALL`.
pub fn build_candidates(capabilities: &Capabilities, exclude: &[UpgradeKind]) -> Vec<Candidate> {
    UpgradeKind::ALL
        .iter()
        .filter(|kind| !exclude.contains(*kind))
        .map(|kind| kind.instantiate())
        .filter(|upgrade| upgrade.is_applicable(capabilities))
        .map(|upgrade| Candidate {
            kind: upgrade.kind(),
            upgrade,
        })
        .collect()
}

// =====================================================
// Note formatting
// =====================================================

pub(crate) fn note(value: String, label: &str, tier: u8) -> String {
    format!("{value} {label} (Tier {})", tier_numeral(tier))
}

/// "+3", "-0.12"
pub(crate) fn signed(value: f64, decimals: usize) -> String {
    trim_zero(format!("{:+.*}", decimals, value))
}

/// Fraction rendered as a signed percentage: 0.035 -> "+3.5%"
pub(crate) fn signed_percent(fraction: f64) -> String {
    format!("{}%", signed(fraction * 100.0, 1))
}

/// Landed delta relative to the value it was applied on; zero for a zero base
pub(crate) fn landed_fraction(delta: f64, base: f64) -> f64 {
    if base > 0.0 {
        delta / base
    } else {
        0.0
    }
}

fn trim_zero(text: String) -> String {
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}
