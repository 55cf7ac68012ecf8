//! Hook process launcher and timeout governor.
//!
//! One isolated child process per hook invocation: the payload goes in
//! through an environment channel (`HOOK_PAYLOAD`, plus `RELAY_EVENT` for
//! the event name), stdout/stderr are fully captured, and the whole
//! invocation races a hard wall-clock deadline. Process isolation also
//! guarantees every invocation observes a cold copy of the hook; no module
//! state survives from a prior run.
//!
//! Nothing escapes this layer. Spawn failures, stream errors, non-zero
//! exits, and expired deadlines are all absorbed into a
//! continue-with-error outcome and (where warranted) a failure record.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::dialect::Dialect;
use crate::errors::HookFailure;
use crate::faillog::FailureLog;
use crate::fallback::RunnerChain;
use crate::protocol;
use crate::types::{HookLocator, HookOutcome, Payload};

/// Environment variable carrying the serialized payload.
pub const PAYLOAD_ENV: &str = "HOOK_PAYLOAD";

/// Environment variable carrying the dispatched event name.
pub const EVENT_ENV: &str = "RELAY_EVENT";

/// Launches hooks and normalizes every possible result into an outcome.
pub struct HookLauncher {
    project_dir: PathBuf,
    config: RelayConfig,
    faillog: FailureLog,
}

impl HookLauncher {
    pub fn new(project_dir: impl AsRef<Path>, config: RelayConfig, faillog: FailureLog) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            config,
            faillog,
        }
    }

    /// Invoke one hook. Infallible by contract: every invocation yields
    /// exactly one outcome, crash, timeout, and missing-file included.
    pub async fn invoke(&self, event: &str, locator: &HookLocator, payload: &Payload) -> HookOutcome {
        match self.try_invoke(event, locator, payload).await {
            Ok(outcome) => {
                // A well-formed outcome may still report a hook-side error;
                // that is log-worthy but never halts the chain.
                if let Some(error) = outcome.error.as_deref() {
                    warn!(hook = %locator, error, "hook reported error");
                    self.faillog.record(locator.as_str(), "Hook reported error", error);
                }
                outcome
            }
            Err(failure) => {
                if failure.should_log() {
                    warn!(hook = %locator, "{failure}");
                    self.faillog
                        .record(locator.as_str(), &failure.to_string(), &self.detail_for(locator, &failure));
                }
                failure.into_outcome()
            }
        }
    }

    async fn try_invoke(
        &self,
        event: &str,
        locator: &HookLocator,
        payload: &Payload,
    ) -> Result<HookOutcome, HookFailure> {
        let hook_path = locator.resolve(&self.project_dir);
        if !hook_path.exists() {
            return Err(HookFailure::NotFound);
        }

        let payload_json = serde_json::to_string(payload).map_err(|e| HookFailure::Launch {
            message: format!("Failed to serialize payload: {e}"),
        })?;

        let child = match Dialect::classify(locator) {
            Dialect::Unsupported => return Err(HookFailure::UnsupportedDialect),
            Dialect::NativeScript => {
                let runner = self.config.native_runner.clone();
                self.runtime_command(&runner, &hook_path, event, &payload_json)
                    .spawn()
                    .map_err(|e| HookFailure::Launch {
                        message: format!("Failed to spawn {runner}: {e}"),
                    })?
            }
            Dialect::TypedScript => {
                let chain = RunnerChain::new(self.config.typed_runners.clone());
                chain.spawn_first(|runner| {
                    self.runtime_command(runner, &hook_path, event, &payload_json)
                })?
            }
        };

        debug!(hook = %locator, deadline_ms = self.config.deadline_ms, "hook spawned");
        self.govern(child).await
    }

    /// Build the child command for a runner binary. `kill_on_drop` is what
    /// lets the deadline reap the child: dropping the timed-out wait future
    /// terminates the process.
    fn runtime_command(&self, runner: &str, hook: &Path, event: &str, payload_json: &str) -> Command {
        let mut cmd = Command::new(runner);
        cmd.arg(hook)
            .current_dir(&self.project_dir)
            .env(PAYLOAD_ENV, payload_json)
            .env(EVENT_ENV, event)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Race the child against the deadline and normalize the result.
    async fn govern(&self, child: Child) -> Result<HookOutcome, HookFailure> {
        let output = match timeout(self.config.deadline(), child.wait_with_output()).await {
            // Dropping the wait future kills the child (kill_on_drop).
            Err(_elapsed) => return Err(HookFailure::Timeout),
            Ok(Err(e)) => {
                return Err(HookFailure::Launch {
                    message: format!("Failed to collect hook output: {e}"),
                });
            }
            Ok(Ok(output)) => output,
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(protocol::parse_response(&stdout))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(HookFailure::Runtime {
                code: output.status.code(),
                stderr: (!stderr.is_empty()).then_some(stderr),
            })
        }
    }

    /// Diagnostic detail line for the failure record.
    fn detail_for(&self, locator: &HookLocator, failure: &HookFailure) -> String {
        match failure {
            HookFailure::NotFound => {
                format!("resolved path: {}", locator.resolve(&self.project_dir).display())
            }
            HookFailure::RunnerUnavailable => {
                format!("candidates tried: {}", self.config.typed_runners.join(", "))
            }
            HookFailure::Timeout => format!(
                "deadline of {} ms exceeded; process terminated",
                self.config.deadline_ms
            ),
            HookFailure::Runtime { code, .. } => match code {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            },
            _ => String::new(),
        }
    }
}
