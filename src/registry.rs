//! Hook registry loading.
//!
//! The registry is a JSON artifact mapping event names to ordered hook
//! locator lists:
//!
//! ```json
//! {
//!   "hooks": {
//!     "sessionStart": ["./hooks/load-memory.js", "./hooks/persist.ts"],
//!     "postToolUse": ["./hooks/lint.ts"]
//!   }
//! }
//! ```
//!
//! It is loaded fresh on every dispatch and is read-only from the
//! orchestrator's side. Absence, unreadability, or corruption (including a
//! torn read under a concurrent external edit) all degrade to an empty
//! registry with one failure record, never a fatal error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::errors::HookFailure;
use crate::faillog::FailureLog;
use crate::types::HookLocator;

/// Registry file name inside the orchestrator directory.
pub const REGISTRY_FILE: &str = "hooks.json";

/// Event name → ordered hook locators. Ordering is registration order and
/// is execution order; duplicate locators are allowed and each runs
/// independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    // No serde default: the top-level "hooks" key is required, and a
    // document without it is treated as corrupt.
    pub hooks: HashMap<String, Vec<HookLocator>>,
}

impl Registry {
    /// Parse a registry document.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse hook registry")
    }

    /// Load the registry from disk, degrading to empty on any failure.
    pub fn load(path: &Path, log: &FailureLog) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Self::parse(&content));
        match loaded {
            Ok(registry) => registry,
            Err(e) => {
                let failure = HookFailure::Registry {
                    detail: format!("{e:#}"),
                };
                warn!(path = %path.display(), "{failure}");
                log.record("registry", "Failed to load hook registry", &format!("{e:#}"));
                Self::default()
            }
        }
    }

    /// The ordered chain registered for an event; empty for unknown events.
    pub fn hooks_for(&self, event: &str) -> &[HookLocator] {
        self.hooks.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of registered hooks across all events.
    pub fn hook_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }
}
