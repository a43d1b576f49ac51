//! Capability modules a target exposes to the upgrade engine.
//!
//! Each module is a narrow trait. A target implements `UpgradeTarget` and hands out
//! whichever modules it actually has; presence of a module is what makes an upgrade
//! applicable. The engine never sees the concrete target type.

pub mod stock;

use serde::{Deserialize, Serialize};

pub use stock::{
    AttackSpeedStats, CritStats, DamageStats, HealthStats, KnifeStats, ShooterStats, TextBuffer,
};

/// Integer damage per hit
pub trait DamageModule {
    fn damage(&self) -> i32;
    fn set_damage(&mut self, value: i32);
}

pub trait CritModule {
    /// 0..1
    fn crit_chance(&self) -> f32;
    fn set_crit_chance(&mut self, value: f32);
    /// >= 1
    fn crit_multiplier(&self) -> f32;
    fn set_crit_multiplier(&mut self, value: f32);
}

pub trait AttackSpeedModule {
    /// Seconds between attacks
    fn interval(&self) -> f32;
    fn set_interval(&mut self, value: f32);
    /// Reset and restart the attack timer. Must be a no-op outside active play.
    fn restart_cadence(&mut self);
}

pub trait KnifeModule {
    fn lifesteal(&self) -> f32;
    fn set_lifesteal(&mut self, value: f32);
    fn radius(&self) -> f32;
    fn set_radius(&mut self, value: f32);
    fn splash_radius(&self) -> f32;
    fn set_splash_radius(&mut self, value: f32);
    fn max_targets(&self) -> u32;
    fn set_max_targets(&mut self, value: u32);
}

pub trait ShooterModule {
    fn bullet_lifetime(&self) -> f32;
    fn set_bullet_lifetime(&mut self, value: f32);
    fn shoot_force(&self) -> f32;
    fn set_shoot_force(&mut self, value: f32);
    fn projectile_count(&self) -> u32;
    fn set_projectile_count(&mut self, value: u32);
    /// Spread cone in degrees
    fn spread_angle(&self) -> f32;
    fn set_spread_angle(&mut self, value: f32);
}

/// Elemental damage families resisted by a health module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Cold,
    Lightning,
    Poison,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::Fire,
        Element::Cold,
        Element::Lightning,
        Element::Poison,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Cold => "Cold",
            Self::Lightning => "Lightning",
            Self::Poison => "Poison",
        }
    }
}

pub trait HealthModule {
    fn max_health(&self) -> f32;
    fn set_max_health(&mut self, value: f32);
    /// Health per second
    fn regen(&self) -> f32;
    fn set_regen(&mut self, value: f32);
    fn armor(&self) -> f32;
    fn set_armor(&mut self, value: f32);
    /// 0..1
    fn evasion(&self) -> f32;
    fn set_evasion(&mut self, value: f32);
    /// 0..1
    fn resist(&self, element: Element) -> f32;
    fn set_resist(&mut self, element: Element, value: f32);
}

/// Opaque formatted text the controller writes its report into
pub trait TextSink {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
}

/// Module families, used to describe what a target carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Damage,
    Crit,
    AttackSpeed,
    Knife,
    Shooter,
    Health,
    TextSink,
}

/// Snapshot of which modules a target currently exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub damage: bool,
    pub crit: bool,
    pub attack_speed: bool,
    pub knife: bool,
    pub shooter: bool,
    pub health: bool,
    pub text_sink: bool,
}

impl Capabilities {
    pub fn has(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::Damage => self.damage,
            ModuleKind::Crit => self.crit,
            ModuleKind::AttackSpeed => self.attack_speed,
            ModuleKind::Knife => self.knife,
            ModuleKind::Shooter => self.shooter,
            ModuleKind::Health => self.health,
            ModuleKind::TextSink => self.text_sink,
        }
    }
}

/// A stat-bearing object (weapon, creature) the engine can upgrade.
///
/// Every accessor defaults to `None`; implementors override the ones they carry.
pub trait UpgradeTarget {
    fn damage(&mut self) -> Option<&mut dyn DamageModule> {
        None
    }
    fn crit(&mut self) -> Option<&mut dyn CritModule> {
        None
    }
    fn attack_speed(&mut self) -> Option<&mut dyn AttackSpeedModule> {
        None
    }
    fn knife(&mut self) -> Option<&mut dyn KnifeModule> {
        None
    }
    fn shooter(&mut self) -> Option<&mut dyn ShooterModule> {
        None
    }
    fn health(&mut self) -> Option<&mut dyn HealthModule> {
        None
    }
    fn text_sink(&mut self) -> Option<&mut dyn TextSink> {
        None
    }

    fn capabilities(&mut self) -> Capabilities {
        Capabilities {
            damage: self.damage().is_some(),
            crit: self.crit().is_some(),
            attack_speed: self.attack_speed().is_some(),
            knife: self.knife().is_some(),
            shooter: self.shooter().is_some(),
            health: self.health().is_some(),
            text_sink: self.text_sink().is_some(),
        }
    }
}
