//! Addressable stats: a key per mutable number on any capability module.
//!
//! Upgrades and the reversal engine both go through `StatKey` so that every write
//! passes the same bounds and integer quantisation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CHANCE_CAP, EVASION_CAP, MIN_ATTACK_INTERVAL, MIN_CRIT_MULTIPLIER, MIN_MAX_HEALTH, RESIST_CAP,
};
use crate::modules::{Element, ModuleKind, UpgradeTarget};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpgradeError {
    #[error("target has no {module:?} module for {stat:?}")]
    MissingModule { stat: StatKey, module: ModuleKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Damage,
    CritChance,
    CritMultiplier,
    AttackInterval,
    KnifeLifesteal,
    KnifeRadius,
    KnifeSplash,
    KnifeMaxTargets,
    ShooterLifetime,
    ShooterForce,
    ShooterProjectiles,
    ShooterSpread,
    MaxHealth,
    Regen,
    Armor,
    Evasion,
    Resist(Element),
}

/// Inclusive clamp window; `None` means unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl StatBounds {
    pub const fn floor(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }

    pub fn contains(&self, value: f64) -> bool {
        self.clamp(value) == value
    }

    /// Stretch whichever side `value` falls outside of so that it becomes reachable.
    pub fn widened_to(&self, value: f64) -> Self {
        Self {
            min: self.min.map(|min| min.min(value)),
            max: self.max.map(|max| max.max(value)),
        }
    }
}

impl StatKey {
    pub fn module(&self) -> ModuleKind {
        match self {
            Self::Damage => ModuleKind::Damage,
            Self::CritChance | Self::CritMultiplier => ModuleKind::Crit,
            Self::AttackInterval => ModuleKind::AttackSpeed,
            Self::KnifeLifesteal | Self::KnifeRadius | Self::KnifeSplash | Self::KnifeMaxTargets => {
                ModuleKind::Knife
            }
            Self::ShooterLifetime
            | Self::ShooterForce
            | Self::ShooterProjectiles
            | Self::ShooterSpread => ModuleKind::Shooter,
            Self::MaxHealth | Self::Regen | Self::Armor | Self::Evasion | Self::Resist(_) => {
                ModuleKind::Health
            }
        }
    }

    pub fn bounds(&self) -> StatBounds {
        match self {
            Self::CritChance | Self::KnifeLifesteal => StatBounds::between(0.0, CHANCE_CAP),
            Self::CritMultiplier => StatBounds::floor(MIN_CRIT_MULTIPLIER),
            Self::AttackInterval => StatBounds::floor(MIN_ATTACK_INTERVAL),
            Self::KnifeMaxTargets | Self::ShooterProjectiles => StatBounds::floor(1.0),
            Self::MaxHealth => StatBounds::floor(MIN_MAX_HEALTH),
            Self::Evasion => StatBounds::between(0.0, EVASION_CAP),
            Self::Resist(_) => StatBounds::between(0.0, RESIST_CAP),
            Self::Damage
            | Self::KnifeRadius
            | Self::KnifeSplash
            | Self::ShooterLifetime
            | Self::ShooterForce
            | Self::ShooterSpread
            | Self::Regen
            | Self::Armor => StatBounds::floor(0.0),
        }
    }

    /// Stored as a whole number on its module
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Damage | Self::KnifeMaxTargets | Self::ShooterProjectiles
        )
    }

    pub fn label(&self) -> String {
        match self {
            Self::Damage => "Damage".into(),
            Self::CritChance => "Crit Chance".into(),
            Self::CritMultiplier => "Crit Multiplier".into(),
            Self::AttackInterval => "Attack Interval".into(),
            Self::KnifeLifesteal => "Lifesteal".into(),
            Self::KnifeRadius => "Knife Radius".into(),
            Self::KnifeSplash => "Splash Radius".into(),
            Self::KnifeMaxTargets => "Max Targets".into(),
            Self::ShooterLifetime => "Bullet Lifetime".into(),
            Self::ShooterForce => "Shoot Force".into(),
            Self::ShooterProjectiles => "Projectiles".into(),
            Self::ShooterSpread => "Spread".into(),
            Self::MaxHealth => "Max Health".into(),
            Self::Regen => "Regen".into(),
            Self::Armor => "Armor".into(),
            Self::Evasion => "Evasion".into(),
            Self::Resist(element) => format!("{} Resist", element.display_name()),
        }
    }

    /// Round integer stats; leave float stats alone
    pub fn quantize(&self, value: f64) -> f64 {
        if self.is_integer() {
            value.round()
        } else {
            value
        }
    }

    fn missing(&self) -> UpgradeError {
        UpgradeError::MissingModule {
            stat: *self,
            module: self.module(),
        }
    }

    pub fn read(&self, target: &mut dyn UpgradeTarget) -> Result<f64, UpgradeError> {
        let value = match self {
            Self::Damage => target.damage().map(|m| m.damage() as f64),
            Self::CritChance => target.crit().map(|m| m.crit_chance() as f64),
            Self::CritMultiplier => target.crit().map(|m| m.crit_multiplier() as f64),
            Self::AttackInterval => target.attack_speed().map(|m| m.interval() as f64),
            Self::KnifeLifesteal => target.knife().map(|m| m.lifesteal() as f64),
            Self::KnifeRadius => target.knife().map(|m| m.radius() as f64),
            Self::KnifeSplash => target.knife().map(|m| m.splash_radius() as f64),
            Self::KnifeMaxTargets => target.knife().map(|m| m.max_targets() as f64),
            Self::ShooterLifetime => target.shooter().map(|m| m.bullet_lifetime() as f64),
            Self::ShooterForce => target.shooter().map(|m| m.shoot_force() as f64),
            Self::ShooterProjectiles => target.shooter().map(|m| m.projectile_count() as f64),
            Self::ShooterSpread => target.shooter().map(|m| m.spread_angle() as f64),
            Self::MaxHealth => target.health().map(|m| m.max_health() as f64),
            Self::Regen => target.health().map(|m| m.regen() as f64),
            Self::Armor => target.health().map(|m| m.armor() as f64),
            Self::Evasion => target.health().map(|m| m.evasion() as f64),
            Self::Resist(element) => target.health().map(|m| m.resist(*element) as f64),
        };
        value.ok_or_else(|| self.missing())
    }

    pub fn write(&self, target: &mut dyn UpgradeTarget, value: f64) -> Result<(), UpgradeError> {
        let as_f32 = value as f32;
        let as_count = value.round().max(0.0) as u32;
        let written = match self {
            Self::Damage => target
                .damage()
                .map(|m| m.set_damage(value.round() as i32)),
            Self::CritChance => target.crit().map(|m| m.set_crit_chance(as_f32)),
            Self::CritMultiplier => target.crit().map(|m| m.set_crit_multiplier(as_f32)),
            Self::AttackInterval => target.attack_speed().map(|m| m.set_interval(as_f32)),
            Self::KnifeLifesteal => target.knife().map(|m| m.set_lifesteal(as_f32)),
            Self::KnifeRadius => target.knife().map(|m| m.set_radius(as_f32)),
            Self::KnifeSplash => target.knife().map(|m| m.set_splash_radius(as_f32)),
            Self::KnifeMaxTargets => target.knife().map(|m| m.set_max_targets(as_count)),
            Self::ShooterLifetime => target.shooter().map(|m| m.set_bullet_lifetime(as_f32)),
            Self::ShooterForce => target.shooter().map(|m| m.set_shoot_force(as_f32)),
            Self::ShooterProjectiles => {
                target.shooter().map(|m| m.set_projectile_count(as_count))
            }
            Self::ShooterSpread => target.shooter().map(|m| m.set_spread_angle(as_f32)),
            Self::MaxHealth => target.health().map(|m| m.set_max_health(as_f32)),
            Self::Regen => target.health().map(|m| m.set_regen(as_f32)),
            Self::Armor => target.health().map(|m| m.set_armor(as_f32)),
            Self::Evasion => target.health().map(|m| m.set_evasion(as_f32)),
            Self::Resist(element) => target.health().map(|m| m.set_resist(*element, as_f32)),
        };
        written.ok_or_else(|| self.missing())
    }
}
