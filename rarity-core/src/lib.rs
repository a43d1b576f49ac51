//! Roguelite Rarity Core
//!
//! Rolls rarity-gated stat upgrades onto weapons and creatures:
//! - Rarity roller and per-rarity upgrade caps
//! - Tier system (1 best, 5 worst) scaling the authored ranges
//! - Capability modules the engine mutates through trait objects
//! - Upgrade variants with plain-data undo actions
//! - Weighted sampling without replacement
//! - Controller state machine (reroll / add / remove / upgrade rarity)
//! - RON/JSON configuration and a Monte-Carlo balance run

pub mod balance;
pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod logging;
pub mod modules;
pub mod ranges;
pub mod rarity;
pub mod rng;
pub mod stats;
pub mod targets;
pub mod tiers;
pub mod undo;
pub mod upgrades;
pub mod weights;

pub use config::{ConfigError, RarityConfig};
pub use controller::{AppliedUpgrade, ReportStyle, UndoLedger, WeaponRarityController};
pub use modules::UpgradeTarget;
pub use rarity::Rarity;
pub use rng::RollRng;
pub use stats::UpgradeError;
pub use upgrades::UpgradeKind;
