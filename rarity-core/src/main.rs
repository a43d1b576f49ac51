use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rarity_core::balance::{simulate, SimConfig, SimTarget};
use rarity_core::logging::{init_tracing, LogLevel, TracingConfig};
use rarity_core::modules::TextSink;
use rarity_core::targets::{Creature, KnifeWeapon, ShooterWeapon};
use rarity_core::{RarityConfig, WeaponRarityController};

#[derive(Parser, Debug)]
#[command(name = "rarity-demo")]
#[command(about = "Roll a rarity and its upgrades onto a reference target")]
#[command(version)]
struct Args {
    /// Rarity config file (.ron or .json); built-in defaults when omitted
    config: Option<PathBuf>,

    /// Reference target to roll onto
    #[arg(short, long, value_enum, default_value = "knife")]
    target: SimTarget,

    /// Default log level (RUST_LOG wins when set)
    #[arg(long = "log", value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Run a Monte-Carlo balance pass of this many rolls and print the JSON report
    #[arg(long, value_name = "RUNS")]
    simulate: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&TracingConfig::default().with_level(args.log_level));

    let config = match &args.config {
        Some(path) => RarityConfig::load(path)
            .with_context(|| format!("failed to load rarity config from {}", path.display()))?,
        None => RarityConfig::default(),
    };
    info!(seed = config.seed, rarity = %config.rarity, "config ready");

    if let Some(runs) = args.simulate {
        let sim = SimConfig {
            run_count: runs,
            target: args.target,
            ..SimConfig::default()
        };
        println!("{}", simulate(&config, &sim).to_json());
        return Ok(());
    }

    let text = match args.target {
        SimTarget::Knife => roll(KnifeWeapon::default(), &config)?,
        SimTarget::Shooter => roll(ShooterWeapon::default(), &config)?,
        SimTarget::Creature => roll(Creature::labelled(), &config)?,
    };
    println!("{text}");
    Ok(())
}

fn roll<T>(target: T, config: &RarityConfig) -> Result<String>
where
    T: rarity_core::UpgradeTarget + HasLabel,
{
    let mut controller = WeaponRarityController::from_config(target, config);
    let rarity = controller.roll_rarity();
    info!(%rarity, upgrades = controller.ledger().len(), "rolled");
    controller
        .target()
        .label_text()
        .map(str::to_string)
        .context("target has no text sink")
}

/// Read-only view of a reference target's label
trait HasLabel {
    fn label_text(&self) -> Option<&str>;
}

impl HasLabel for KnifeWeapon {
    fn label_text(&self) -> Option<&str> {
        Some(self.label.text())
    }
}

impl HasLabel for ShooterWeapon {
    fn label_text(&self) -> Option<&str> {
        Some(self.label.text())
    }
}

impl HasLabel for Creature {
    fn label_text(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["rarity-demo"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.target, SimTarget::Knife);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(args.simulate.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "rarity-demo",
            "config/rarity.ron",
            "--target",
            "creature",
            "--log",
            "warning",
            "--simulate",
            "500",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("config/rarity.ron")));
        assert_eq!(args.target, SimTarget::Creature);
        assert_eq!(args.log_level, LogLevel::Warn);
        assert_eq!(args.simulate, Some(500));
    }

    #[test]
    fn test_unknown_target_rejected() {
        assert!(Args::try_parse_from(["rarity-demo", "--target", "bow"]).is_err());
        assert!(Args::try_parse_from(["rarity-demo", "--simulate", "many"]).is_err());
    }
}
