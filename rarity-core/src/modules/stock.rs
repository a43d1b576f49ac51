//! Plain-data implementations of the capability traits.

use serde::{Deserialize, Serialize};

use super::{
    AttackSpeedModule, CritModule, DamageModule, Element, HealthModule, KnifeModule,
    ShooterModule, TextSink,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageStats {
    pub damage: i32,
}

impl Default for DamageStats {
    fn default() -> Self {
        Self { damage: 10 }
    }
}

impl DamageModule for DamageStats {
    fn damage(&self) -> i32 {
        self.damage
    }
    fn set_damage(&mut self, value: i32) {
        self.damage = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritStats {
    pub chance: f32,
    pub multiplier: f32,
}

impl Default for CritStats {
    fn default() -> Self {
        Self {
            chance: 0.05,
            multiplier: 1.5,
        }
    }
}

impl CritModule for CritStats {
    fn crit_chance(&self) -> f32 {
        self.chance
    }
    fn set_crit_chance(&mut self, value: f32) {
        self.chance = value;
    }
    fn crit_multiplier(&self) -> f32 {
        self.multiplier
    }
    fn set_crit_multiplier(&mut self, value: f32) {
        self.multiplier = value;
    }
}

/// Attack interval plus the cadence timer it drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSpeedStats {
    pub interval: f32,
    /// Seconds until the next attack fires
    pub timer: f32,
    /// Restarts only take effect while the game is running
    pub in_play: bool,
    pub restarts: u32,
}

impl Default for AttackSpeedStats {
    fn default() -> Self {
        Self {
            interval: 1.0,
            timer: 1.0,
            in_play: true,
            restarts: 0,
        }
    }
}

impl AttackSpeedModule for AttackSpeedStats {
    fn interval(&self) -> f32 {
        self.interval
    }
    fn set_interval(&mut self, value: f32) {
        self.interval = value;
    }
    fn restart_cadence(&mut self) {
        if !self.in_play {
            return;
        }
        self.timer = self.interval;
        self.restarts += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnifeStats {
    pub lifesteal: f32,
    pub radius: f32,
    pub splash_radius: f32,
    pub max_targets: u32,
}

impl Default for KnifeStats {
    fn default() -> Self {
        Self {
            lifesteal: 0.0,
            radius: 1.5,
            splash_radius: 0.0,
            max_targets: 1,
        }
    }
}

impl KnifeModule for KnifeStats {
    fn lifesteal(&self) -> f32 {
        self.lifesteal
    }
    fn set_lifesteal(&mut self, value: f32) {
        self.lifesteal = value;
    }
    fn radius(&self) -> f32 {
        self.radius
    }
    fn set_radius(&mut self, value: f32) {
        self.radius = value;
    }
    fn splash_radius(&self) -> f32 {
        self.splash_radius
    }
    fn set_splash_radius(&mut self, value: f32) {
        self.splash_radius = value;
    }
    fn max_targets(&self) -> u32 {
        self.max_targets
    }
    fn set_max_targets(&mut self, value: u32) {
        self.max_targets = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterStats {
    pub bullet_lifetime: f32,
    pub shoot_force: f32,
    pub projectile_count: u32,
    pub spread_angle: f32,
}

impl Default for ShooterStats {
    fn default() -> Self {
        Self {
            bullet_lifetime: 1.2,
            shoot_force: 12.0,
            projectile_count: 1,
            spread_angle: 8.0,
        }
    }
}

impl ShooterModule for ShooterStats {
    fn bullet_lifetime(&self) -> f32 {
        self.bullet_lifetime
    }
    fn set_bullet_lifetime(&mut self, value: f32) {
        self.bullet_lifetime = value;
    }
    fn shoot_force(&self) -> f32 {
        self.shoot_force
    }
    fn set_shoot_force(&mut self, value: f32) {
        self.shoot_force = value;
    }
    fn projectile_count(&self) -> u32 {
        self.projectile_count
    }
    fn set_projectile_count(&mut self, value: u32) {
        self.projectile_count = value;
    }
    fn spread_angle(&self) -> f32 {
        self.spread_angle
    }
    fn set_spread_angle(&mut self, value: f32) {
        self.spread_angle = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    pub max_health: f32,
    pub regen: f32,
    pub armor: f32,
    pub evasion: f32,
    pub fire_resist: f32,
    pub cold_resist: f32,
    pub lightning_resist: f32,
    pub poison_resist: f32,
}

impl Default for HealthStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            regen: 0.0,
            armor: 0.0,
            evasion: 0.0,
            fire_resist: 0.0,
            cold_resist: 0.0,
            lightning_resist: 0.0,
            poison_resist: 0.0,
        }
    }
}

impl HealthModule for HealthStats {
    fn max_health(&self) -> f32 {
        self.max_health
    }
    fn set_max_health(&mut self, value: f32) {
        self.max_health = value;
    }
    fn regen(&self) -> f32 {
        self.regen
    }
    fn set_regen(&mut self, value: f32) {
        self.regen = value;
    }
    fn armor(&self) -> f32 {
        self.armor
    }
    fn set_armor(&mut self, value: f32) {
        self.armor = value;
    }
    fn evasion(&self) -> f32 {
        self.evasion
    }
    fn set_evasion(&mut self, value: f32) {
        self.evasion = value;
    }
    fn resist(&self, element: Element) -> f32 {
        match element {
            Element::Fire => self.fire_resist,
            Element::Cold => self.cold_resist,
            Element::Lightning => self.lightning_resist,
            Element::Poison => self.poison_resist,
        }
    }
    fn set_resist(&mut self, element: Element, value: f32) {
        match element {
            Element::Fire => self.fire_resist = value,
            Element::Cold => self.cold_resist = value,
            Element::Lightning => self.lightning_resist = value,
            Element::Poison => self.poison_resist = value,
        }
    }
}

/// In-memory text sink (stands in for an on-screen label)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBuffer {
    pub text: String,
}

impl TextBuffer {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSink for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }
    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
