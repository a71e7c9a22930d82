//! Logging setup.
//!
//! Module-level filters come from the config file; `RUST_LOG`, when set,
//! wins over it. Output goes to stderr so stdout carries only results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for modules without an explicit entry.
    #[serde(default = "default_log_level")]
    pub default_level: String,

    /// Per-module levels, e.g. `"u_dispatch::client" = "debug"`.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: default_log_level(),
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive string, e.g. `info,u_dispatch::client=debug`.
    pub fn directives(&self) -> String {
        std::iter::once(self.default_level.clone())
            .chain(self.modules.iter().map(|(module, level)| format!("{module}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the filter. Precedence: `RUST_LOG` > config > default level.
    pub fn build_env_filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            return EnvFilter::from_default_env();
        }
        EnvFilter::try_new(self.directives()).unwrap_or_else(|_| {
            eprintln!("invalid log filter {:?}, using {:?}", self.directives(), self.default_level);
            EnvFilter::new(&self.default_level)
        })
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.build_env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_default() {
        assert_eq!(LoggingConfig::default().directives(), "info");
    }

    #[test]
    fn test_directives_with_modules() {
        let mut config = LoggingConfig {
            default_level: "warn".into(),
            ..Default::default()
        };
        config.modules.insert("u_dispatch::session".into(), "info".into());
        config.modules.insert("u_dispatch::client".into(), "debug".into());
        // BTreeMap keeps module order stable.
        assert_eq!(
            config.directives(),
            "warn,u_dispatch::client=debug,u_dispatch::session=info"
        );
    }
}
