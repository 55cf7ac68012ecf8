//! Typed failure taxonomy for the orchestrator.
//!
//! Every failure kind here is fully absorbed at the launcher or chain
//! boundary: it becomes a continue-with-error `HookOutcome` (or, for the
//! registry, an empty registry) and never propagates to the caller as an
//! error. The `Display` text of each variant is the exact `error` string
//! hooks' consumers see in outcomes.
//!
//! Protocol parse failures have no variant on purpose: absent or
//! unparsable hook output is a silent continue, not a failure.

use thiserror::Error;

use crate::types::HookOutcome;

/// One hook invocation's failure mode, or a registry load failure.
#[derive(Debug, Error)]
pub enum HookFailure {
    /// The locator's backing file does not exist; nothing was spawned.
    #[error("File not found")]
    NotFound,

    /// The locator's type tag maps to no execution strategy.
    #[error("Unsupported file type")]
    UnsupportedDialect,

    /// No candidate interpreter binary for the typed dialect exists.
    #[error("No TypeScript runner available")]
    RunnerUnavailable,

    /// The deadline expired; the child was forcibly terminated.
    #[error("Hook timeout")]
    Timeout,

    /// The hook ran and exited non-zero.
    #[error("{}", .stderr.as_deref().unwrap_or("Hook failed"))]
    Runtime {
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// Spawning the child or collecting its streams failed.
    #[error("{message}")]
    Launch { message: String },

    /// The registry artifact could not be read or parsed.
    #[error("Failed to load hook registry: {detail}")]
    Registry { detail: String },
}

impl HookFailure {
    /// Whether this failure warrants a `FailureRecord`.
    ///
    /// Unsupported dialects are a static classification, not an
    /// operational anomaly.
    pub fn should_log(&self) -> bool {
        !matches!(self, HookFailure::UnsupportedDialect)
    }

    /// Absorb the failure into the outcome handed back to the host.
    pub fn into_outcome(self) -> HookOutcome {
        HookOutcome::continue_with_error(self.to_string())
    }
}
