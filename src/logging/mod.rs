//! Structured logging via `tracing`.
//!
//! - One default level plus per-target overrides (`hatchery_core::shop`, ...)
//! - `RUST_LOG` wins over the configured directives
//! - Install once per process; later calls report the first outcome

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Target used by [`crate::services::TracingNotifier`]
pub const NOTIFY_TARGET: &str = "hatchery_core::notify";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub level: LogLevel,
    /// Per-target overrides, e.g. `"hatchery_core::breeding": "debug"`
    pub targets: BTreeMap<String, LogLevel>,
    pub with_target: bool,
    pub with_source_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let targets = [
            ("hatchery_core::breeding", LogLevel::Info),
            ("hatchery_core::shop", LogLevel::Info),
            (NOTIFY_TARGET, LogLevel::Warn),
        ]
        .into_iter()
        .map(|(target, level)| (target.to_string(), level))
        .collect();
        Self {
            level: LogLevel::Info,
            targets,
            with_target: true,
            with_source_location: false,
        }
    }
}

impl TracingConfig {
    /// `EnvFilter` directive string: `info,hatchery_core::shop=debug,...`
    pub fn directives(&self) -> String {
        std::iter::once(self.level.to_string())
            .chain(
                self.targets
                    .iter()
                    .map(|(target, level)| format!("{target}={level}")),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn with_target_level(mut self, target: &str, level: LogLevel) -> Self {
        self.targets.insert(target.to_string(), level);
        self
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global fmt subscriber.
///
/// Returns false when another subscriber was already in place (an embedding
/// game, or a test harness). Only the first call has any effect.
pub fn init_tracing(config: &TracingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directives()));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .compact()
            .try_init()
            .is_ok()
    })
}

pub fn init_tracing_default() -> bool {
    init_tracing(&TracingConfig::default())
}
