//! Ready-made targets composed from the stock modules.

use serde::{Deserialize, Serialize};

use crate::modules::{
    AttackSpeedModule, AttackSpeedStats, CritModule, CritStats, DamageModule, DamageStats,
    HealthModule, HealthStats, KnifeModule, KnifeStats, ShooterModule, ShooterStats, TextBuffer,
    TextSink, UpgradeTarget,
};

/// Melee knife: damage, crit, attack speed, knife stats and a tooltip label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnifeWeapon {
    pub damage: DamageStats,
    pub crit: CritStats,
    pub attack_speed: AttackSpeedStats,
    pub knife: KnifeStats,
    pub label: TextBuffer,
}

impl UpgradeTarget for KnifeWeapon {
    fn damage(&mut self) -> Option<&mut dyn DamageModule> {
        Some(&mut self.damage)
    }
    fn crit(&mut self) -> Option<&mut dyn CritModule> {
        Some(&mut self.crit)
    }
    fn attack_speed(&mut self) -> Option<&mut dyn AttackSpeedModule> {
        Some(&mut self.attack_speed)
    }
    fn knife(&mut self) -> Option<&mut dyn KnifeModule> {
        Some(&mut self.knife)
    }
    fn text_sink(&mut self) -> Option<&mut dyn TextSink> {
        Some(&mut self.label)
    }
}

/// Ranged shooter: damage, crit, attack speed, shooter stats and a label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShooterWeapon {
    pub damage: DamageStats,
    pub crit: CritStats,
    pub attack_speed: AttackSpeedStats,
    pub shooter: ShooterStats,
    pub label: TextBuffer,
}

impl UpgradeTarget for ShooterWeapon {
    fn damage(&mut self) -> Option<&mut dyn DamageModule> {
        Some(&mut self.damage)
    }
    fn crit(&mut self) -> Option<&mut dyn CritModule> {
        Some(&mut self.crit)
    }
    fn attack_speed(&mut self) -> Option<&mut dyn AttackSpeedModule> {
        Some(&mut self.attack_speed)
    }
    fn shooter(&mut self) -> Option<&mut dyn ShooterModule> {
        Some(&mut self.shooter)
    }
    fn text_sink(&mut self) -> Option<&mut dyn TextSink> {
        Some(&mut self.label)
    }
}

/// Creature with only a health pool; the label is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub health: HealthStats,
    pub label: Option<TextBuffer>,
}

impl Creature {
    pub fn labelled() -> Self {
        Self {
            health: HealthStats::default(),
            label: Some(TextBuffer::default()),
        }
    }
}

impl UpgradeTarget for Creature {
    fn health(&mut self) -> Option<&mut dyn HealthModule> {
        Some(&mut self.health)
    }
    fn text_sink(&mut self) -> Option<&mut dyn TextSink> {
        self.label.as_mut().map(|l| l as &mut dyn TextSink)
    }
}

/// Target with no modules at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BareTarget;

impl UpgradeTarget for BareTarget {}
