//! Structured logging via `tracing`.
//!
//! Library code only emits events. The demo binary installs a subscriber through
//! `init_tracing`; calling it again once one is installed does nothing.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("rarity_core::controller".to_string(), LogLevel::Info),
                ("rarity_core::balance".to_string(), LogLevel::Info),
                ("rarity_core::config".to_string(), LogLevel::Warn),
            ],
            show_thread_ids: false,
            show_targets: true,
            show_file_line: false,
        }
    }
}

impl TracingConfig {
    /// Same filters with a different default level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Default level plus per-module overrides, ignoring the environment.
    /// An override that does not parse as a directive is skipped.
    pub fn configured_filter(&self) -> EnvFilter {
        let base = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(self.default_level).into())
            .parse_lossy("");
        self.module_filters
            .iter()
            .fold(base, |filter, (module, level)| {
                match format!("{module}={}", level.as_str()).parse::<Directive>() {
                    Ok(directive) => filter.add_directive(directive),
                    Err(_) => filter,
                }
            })
    }

    /// `RUST_LOG` when it is set and valid, the configured filter otherwise
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.configured_filter())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Install a compact fmt subscriber as the global default.
///
/// Returns false when a global subscriber is already set: test binaries call this
/// once per test, and an application embedding the crate may own logging itself.
pub fn init_tracing(config: &TracingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_target(config.show_targets)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file_line)
        .with_line_number(config.show_file_line)
        .with_env_filter(config.env_filter())
        .compact()
        .try_init()
        .is_ok()
}

/// Span guard for timing a bulk operation; closes on drop
pub struct TimingSpan {
    _span: tracing::span::EnteredSpan,
}

impl TimingSpan {
    pub fn new(name: &str) -> Self {
        let span = tracing::info_span!("operation", name = name);
        Self {
            _span: span.entered(),
        }
    }
}
