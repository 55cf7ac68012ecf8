//! Chain execution: the orchestrator's dispatch state machine.
//!
//! One dispatch runs the hooks registered for an event strictly in
//! registration order, one at a time: hook N+1 never starts before hook
//! N's outcome (timeout resolution included) is final, so registration
//! order is a real side-effect order downstream hooks may rely on. An
//! explicit `stop` outcome skips the rest of the chain; outcomes that
//! merely carry an `error` do not.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::RelayConfig;
use crate::faillog::{FAILURE_LOG_FILE, FailureLog};
use crate::launcher::HookLauncher;
use crate::registry::{REGISTRY_FILE, Registry};
use crate::types::{HookAction, HookLocator, HookOutcome, Payload};

/// Directory holding the registry, config, and logs for a project.
pub const RELAY_DIR: &str = ".relay";

/// The dispatch state machine's states. A finished `ChainResult` is always
/// `Completed` or `Stopped`; `Pending` and `Running` are the in-flight
/// states, visible in trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Pending,
    Running(usize),
    Completed,
    Stopped(usize),
}

/// One executed hook and its normalized outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookExecution {
    pub hook: HookLocator,
    pub outcome: HookOutcome,
}

/// Aggregate result of one event dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResult {
    pub event: String,
    /// Effective action: `stop` if a hook stopped the chain, else `continue`
    pub action: HookAction,
    /// Every outcome produced, in execution order
    pub outcomes: Vec<HookExecution>,
}

impl ChainResult {
    pub fn stopped(&self) -> bool {
        self.action == HookAction::Stop
    }

    /// Final state of the chain's execution.
    pub fn state(&self) -> ChainState {
        if self.stopped() {
            ChainState::Stopped(self.outcomes.len().saturating_sub(1))
        } else {
            ChainState::Completed
        }
    }
}

/// Dispatches events through their registered hook chains.
///
/// This is the single execution core: the CLI and any embedding host both
/// call [`dispatch`](ChainExecutor::dispatch), and test drivers call
/// [`run_chain`](ChainExecutor::run_chain) with an explicit locator list.
pub struct ChainExecutor {
    project_dir: PathBuf,
    faillog: FailureLog,
    launcher: HookLauncher,
}

impl ChainExecutor {
    /// Build an executor for a project directory, loading configuration
    /// from `.relay/config.toml` (defaults when absent).
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        let relay_dir = project_dir.join(RELAY_DIR);
        let faillog = FailureLog::new(relay_dir.join("logs").join(FAILURE_LOG_FILE));
        let config = RelayConfig::load_or_default(&relay_dir, &faillog);
        Self::with_config(project_dir, config)
    }

    /// Build an executor with explicit configuration.
    pub fn with_config(project_dir: impl AsRef<Path>, config: RelayConfig) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        let relay_dir = project_dir.join(RELAY_DIR);
        let faillog = FailureLog::new(relay_dir.join("logs").join(FAILURE_LOG_FILE));
        let launcher = HookLauncher::new(&project_dir, config, faillog.clone());
        Self {
            project_dir,
            faillog,
            launcher,
        }
    }

    /// The registry artifact this executor reads on each dispatch.
    pub fn registry_path(&self) -> PathBuf {
        self.project_dir.join(RELAY_DIR).join(REGISTRY_FILE)
    }

    /// Dispatch an event: load the registry fresh, run the chain registered
    /// for the event, and hand back the aggregate result. Never fails;
    /// a missing or corrupt registry degrades to an empty chain.
    pub async fn dispatch(&self, event: &str, payload: &Payload) -> ChainResult {
        let registry = Registry::load(&self.registry_path(), &self.faillog);
        let hooks = registry.hooks_for(event);
        debug!(event, hooks = hooks.len(), "dispatching event");
        self.run_chain(event, hooks, payload).await
    }

    /// Run an explicit hook chain for an event.
    pub async fn run_chain(
        &self,
        event: &str,
        hooks: &[HookLocator],
        payload: &Payload,
    ) -> ChainResult {
        let mut state = ChainState::Pending;
        debug!(event, ?state, hooks = hooks.len(), "chain ready");
        let mut outcomes = Vec::with_capacity(hooks.len());

        for (index, locator) in hooks.iter().enumerate() {
            state = ChainState::Running(index);
            debug!(event, ?state, hook = %locator, "running hook");
            let outcome = self.launcher.invoke(event, locator, payload).await;
            let stop = outcome.is_stop();
            debug!(event, hook = %locator, action = outcome.action.as_str(), "hook finished");
            outcomes.push(HookExecution {
                hook: locator.clone(),
                outcome,
            });

            if stop {
                state = ChainState::Stopped(index);
                debug!(event, ?state, hook = %locator, "hook stopped the chain");
                return ChainResult {
                    event: event.to_string(),
                    action: HookAction::Stop,
                    outcomes,
                };
            }
        }

        state = ChainState::Completed;
        debug!(event, ?state, hooks = outcomes.len(), "chain completed");
        ChainResult {
            event: event.to_string(),
            action: HookAction::Continue,
            outcomes,
        }
    }
}
