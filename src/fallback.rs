//! Runner fallback chain for typed-script hooks.
//!
//! Typed scripts need a transpiling interpreter, and which one is installed
//! varies by machine. The chain tries each candidate in order and advances
//! only when a candidate's binary does not exist; once a candidate has
//! actually spawned, its result is final; fallback covers interpreter
//! availability, never hook correctness.

use std::io::ErrorKind;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::errors::HookFailure;

/// Ordered interpreter candidates.
#[derive(Debug, Clone)]
pub struct RunnerChain {
    candidates: Vec<String>,
}

impl RunnerChain {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Spawn the hook under the first available candidate.
    ///
    /// `configure` builds the full command for a given candidate binary.
    /// Returns `RunnerUnavailable` when every candidate is absent; any
    /// other spawn error is a launch failure and ends the chain.
    pub fn spawn_first<F>(&self, mut configure: F) -> Result<Child, HookFailure>
    where
        F: FnMut(&str) -> Command,
    {
        for candidate in &self.candidates {
            match configure(candidate).spawn() {
                Ok(child) => return Ok(child),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(runner = %candidate, "runner binary absent, trying next candidate");
                    continue;
                }
                Err(e) => {
                    return Err(HookFailure::Launch {
                        message: format!("Failed to spawn {candidate}: {e}"),
                    });
                }
            }
        }
        Err(HookFailure::RunnerUnavailable)
    }
}
