//! Orchestrator configuration (`.relay/config.toml`).
//!
//! Everything has a working default; the file exists for operators who need
//! a different runtime binary or deadline (and for tests, which shorten the
//! deadline). Like the registry, configuration must never become a failure
//! point: an unreadable or invalid file is logged and the defaults are used.
//!
//! ```toml
//! deadline_ms = 5000
//! native_runner = "node"
//! typed_runners = ["tsx", "ts-node"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::faillog::FailureLog;

/// Wall-clock budget for one hook invocation.
pub const DEFAULT_DEADLINE_MS: u64 = 5000;

/// Config file name inside the orchestrator directory.
pub const CONFIG_FILE: &str = "config.toml";

fn default_deadline_ms() -> u64 {
    DEFAULT_DEADLINE_MS
}

fn default_native_runner() -> String {
    "node".to_string()
}

fn default_typed_runners() -> Vec<String> {
    vec!["tsx".to_string(), "ts-node".to_string()]
}

/// Execution parameters for the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Per-invocation deadline in milliseconds
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,

    /// Runtime binary for native-script hooks
    #[serde(default = "default_native_runner")]
    pub native_runner: String,

    /// Interpreter candidates for typed-script hooks, tried in order
    #[serde(default = "default_typed_runners")]
    pub typed_runners: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            deadline_ms: default_deadline_ms(),
            native_runner: default_native_runner(),
            typed_runners: default_typed_runners(),
        }
    }
}

impl RelayConfig {
    /// Parse a TOML config string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config.toml")
    }

    /// Load from `<relay_dir>/config.toml`. A missing file is the normal
    /// case and yields the defaults silently; an unreadable or invalid file
    /// yields the defaults with one failure record.
    pub fn load_or_default(relay_dir: &Path, log: &FailureLog) -> Self {
        let path = relay_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        let loaded = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Self::parse(&content));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                log.record("config", "Failed to load config.toml", &format!("{e:#}"));
                Self::default()
            }
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Validate and return warnings. Nothing here is fatal.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.deadline_ms == 0 {
            warnings.push("deadline_ms is 0; every hook will time out immediately".to_string());
        }
        if self.native_runner.trim().is_empty() {
            warnings.push("native_runner is empty; native-script hooks cannot run".to_string());
        }
        if self.typed_runners.is_empty() {
            warnings.push(
                "typed_runners is empty; typed-script hooks will always fail over".to_string(),
            );
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.deadline_ms, 5000);
        assert_eq!(config.native_runner, "node");
        assert_eq!(config.typed_runners, vec!["tsx", "ts-node"]);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_partial_file_fills_defaults() {
        let config = RelayConfig::parse("deadline_ms = 250\n").unwrap();
        assert_eq!(config.deadline_ms, 250);
        assert_eq!(config.native_runner, "node");
    }

    #[test]
    fn test_parse_full_file() {
        let config = RelayConfig::parse(
            r#"
deadline_ms = 1000
native_runner = "deno"
typed_runners = ["deno"]
"#,
        )
        .unwrap();
        assert_eq!(config.deadline(), Duration::from_millis(1000));
        assert_eq!(config.native_runner, "deno");
        assert_eq!(config.typed_runners, vec!["deno"]);
    }

    #[test]
    fn test_load_missing_file_is_silent_default() {
        let dir = tempdir().unwrap();
        let log = FailureLog::new(dir.path().join("failures.log"));

        let config = RelayConfig::load_or_default(dir.path(), &log);
        assert_eq!(config.deadline_ms, DEFAULT_DEADLINE_MS);
        assert!(!log.path().exists(), "missing config must not be logged");
    }

    #[test]
    fn test_load_invalid_file_logs_and_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "deadline_ms = \"soon\"").unwrap();
        let log = FailureLog::new(dir.path().join("failures.log"));

        let config = RelayConfig::load_or_default(dir.path(), &log);
        assert_eq!(config.deadline_ms, DEFAULT_DEADLINE_MS);

        let logged = std::fs::read_to_string(log.path()).unwrap();
        assert!(logged.contains("config: Failed to load config.toml"));
    }

    #[test]
    fn test_validate_warnings() {
        let config = RelayConfig {
            deadline_ms: 0,
            native_runner: " ".to_string(),
            typed_runners: vec![],
        };
        let warnings = config.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("deadline_ms"));
    }
}
