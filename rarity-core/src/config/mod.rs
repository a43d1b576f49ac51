//! Rarity configuration: tables loaded from RON or JSON.
//!
//! Every section is optional in the file; anything missing falls back to the
//! built-in defaults. `validate` runs after parsing so a bad file never reaches a
//! controller.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::controller::ReportStyle;
use crate::ranges::UpgradeRanges;
use crate::rarity::{Rarity, RarityWeights};
use crate::tiers::TierCurve;
use crate::weights::UpgradeWeightProvider;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported config extension: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityConfig {
    /// 0 seeds from entropy
    pub seed: u64,
    pub rarity: Rarity,
    pub rarity_weights: RarityWeights,
    pub curve: TierCurve,
    pub ranges: UpgradeRanges,
    /// `None` selects upgrades uniformly
    pub weights: Option<UpgradeWeightProvider>,
    pub report_style: ReportStyle,
}

impl Default for RarityConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rarity: Rarity::Common,
            rarity_weights: RarityWeights::default(),
            curve: TierCurve::default(),
            ranges: UpgradeRanges::default(),
            weights: None,
            report_style: ReportStyle::Plain,
        }
    }
}

impl RarityConfig {
    /// Load and validate; `.ron` parses as RON, `.json` as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ron" => Self::from_ron_str(&text),
            "json" => Self::from_json_str(&text),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (rarity, weight) in Rarity::ALL.iter().zip(self.rarity_weights.as_array()) {
            check_weight(&format!("rarity weight {rarity}"), weight)?;
        }

        if let Some(provider) = &self.weights {
            check_weight("default upgrade weight", provider.default_weight)?;
            for (kind, weight) in &provider.weights {
                check_weight(&format!("upgrade weight {kind}"), *weight)?;
            }
        }

        match &self.curve {
            TierCurve::Linear { min_mult, max_mult } => {
                let ok = [*min_mult, *max_mult]
                    .iter()
                    .all(|m| m.is_finite() && *m > 0.0);
                if !ok {
                    return Err(ConfigError::Invalid(format!(
                        "linear curve needs positive multipliers, got ({min_mult}, {max_mult})"
                    )));
                }
            }
            TierCurve::Authored { keys } => {
                if keys.is_empty() {
                    return Err(ConfigError::Invalid("authored curve has no keys".into()));
                }
                if keys.windows(2).any(|pair| pair[1].x < pair[0].x) {
                    return Err(ConfigError::Invalid("curve keys must be sorted by x".into()));
                }
            }
        }

        for (name, range) in self.ranges.float_ranges() {
            if !range.min.is_finite() || !range.max.is_finite() || range.is_inverted() {
                return Err(ConfigError::Invalid(format!(
                    "range {name} is inverted or non-finite: ({}, {})",
                    range.min, range.max
                )));
            }
        }
        for (name, range) in self.ranges.int_ranges() {
            if range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "range {name} is inverted: ({}, {})",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

fn check_weight(what: &str, weight: f32) -> Result<(), ConfigError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{what} must be finite and >= 0, got {weight}")))
    }
}
