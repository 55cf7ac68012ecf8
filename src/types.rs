//! Core types for the hook orchestrator.
//!
//! This module defines the data model shared by every component:
//! - `HookAction`: the flow-control signal a hook can emit
//! - `HookOutcome`: the normalized result of one hook invocation
//! - `HookLocator`: a path-like identifier naming a hook and its dialect
//! - `Payload`: the opaque host-supplied value handed to every hook

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The opaque payload a host passes into a dispatch.
///
/// The orchestrator serializes it for the hook's environment channel and
/// never inspects its fields.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The action a hook can instruct the host to take.
///
/// `Stop` is the only value the orchestrator interprets for flow control;
/// `InjectContext` and `Modify` are passed through opaquely to the host
/// alongside their `context` / `modifications` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum HookAction {
    /// Continue with normal execution (the safe default)
    #[default]
    Continue,
    /// Terminate the chain; remaining hooks are never invoked
    Stop,
    /// Hand additional context to the host
    InjectContext,
    /// Hand a modification request to the host
    Modify,
}

impl HookAction {
    /// Returns the action name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookAction::Continue => "continue",
            HookAction::Stop => "stop",
            HookAction::InjectContext => "inject_context",
            HookAction::Modify => "modify",
        }
    }
}

impl std::fmt::Display for HookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized result of one hook invocation.
///
/// Every invocation produces exactly one outcome, crash, timeout, and
/// missing-file cases included. An outcome carrying `error` does not by
/// itself halt the chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookOutcome {
    /// Flow-control signal; defaults to `continue` when absent on the wire
    #[serde(default)]
    pub action: HookAction,
    /// Human-readable message accompanying the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Diagnostic string; presence is logged but never aborts the chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Context value for `inject_context` actions, passed through opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    /// Modification value for `modify` actions, passed through opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<serde_json::Value>,
}

impl HookOutcome {
    /// The implicit outcome: continue, nothing to report.
    pub fn continue_chain() -> Self {
        Self::default()
    }

    /// A continue outcome carrying a diagnostic error.
    pub fn continue_with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether this outcome terminates the chain.
    pub fn is_stop(&self) -> bool {
        self.action == HookAction::Stop
    }
}

/// A path-like identifier naming an executable hook.
///
/// The trailing extension is the hook's type tag, from which the execution
/// dialect is inferred. Locators are immutable once read from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookLocator(String);

impl HookLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing type tag (file extension), if any.
    pub fn type_tag(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }

    /// Resolve the backing file path against a project directory.
    /// Absolute locators are used as-is.
    pub fn resolve(&self, project_dir: &Path) -> PathBuf {
        let path = Path::new(&self.0);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        }
    }
}

impl std::fmt::Display for HookLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HookLocator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
