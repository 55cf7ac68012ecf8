//! Relay: a resilient event-hook orchestrator.
//!
//! A host process fires a named lifecycle event (e.g. `sessionStart`,
//! `postToolUse`); relay runs the hooks registered for that event strictly
//! in registration order, each in its own child process under a hard
//! deadline, and hands the host one [`ChainResult`](chain::ChainResult)
//! with a normalized outcome per hook.
//!
//! The engine is built to degrade, never to crash the host: a missing or
//! corrupt registry is an empty registry, a missing hook file or interpreter
//! is a continue-with-error outcome, a hung hook is terminated at the
//! deadline. The only way a hook halts a chain is an explicit, well-formed
//! `stop` response. Anomalies land in an append-only failure log.
//!
//! # Dispatching
//!
//! ```ignore
//! use relay::{ChainExecutor, Payload};
//!
//! let executor = ChainExecutor::new(&project_dir);
//! let result = executor.dispatch("sessionStart", &payload).await;
//! if result.stopped() {
//!     // honor the hook's stop request
//! }
//! ```
//!
//! # Hook contract
//!
//! A hook receives the serialized payload in the `HOOK_PAYLOAD` environment
//! variable (and the event name in `RELAY_EVENT`). Within the deadline it
//! either prints one line of JSON, `{"action": "continue" | "stop" |
//! "inject_context" | "modify", ...}`, and exits 0, or it exits non-zero /
//! times out / crashes, all of which become a continue-with-error outcome.
//! No output at all is a valid continue.

pub mod chain;
pub mod config;
pub mod dialect;
pub mod errors;
pub mod faillog;
pub mod fallback;
pub mod launcher;
pub mod protocol;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use chain::{ChainExecutor, ChainResult, ChainState, HookExecution};
pub use config::RelayConfig;
pub use errors::HookFailure;
pub use registry::Registry;
pub use types::{HookAction, HookLocator, HookOutcome, Payload};
