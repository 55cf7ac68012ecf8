//! Append-only diagnostic failure log.
//!
//! Anomalies the orchestrator absorbs (missing hooks, timeouts, corrupt
//! registries) land here as self-delimited text blocks. Logging must never
//! become a second point of failure: every error raised while appending is
//! swallowed, and each record is written with a single append so concurrent
//! dispatches cannot corrupt prior records.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default log location relative to the orchestrator directory.
pub const FAILURE_LOG_FILE: &str = "hook-failures.log";

/// One anomaly: when, who, what, and the diagnostic detail.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub timestamp: DateTime<Utc>,
    /// Hook locator, or "registry" for registry-level failures
    pub subject: String,
    pub message: String,
    pub detail: String,
}

impl FailureRecord {
    pub fn new(
        subject: impl Into<String>,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            subject: subject.into(),
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Render the record as one self-delimited block.
    fn render(&self) -> String {
        let stamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        if self.detail.is_empty() {
            format!("[{}] {}: {}\n\n", stamp, self.subject, self.message)
        } else {
            format!(
                "[{}] {}: {}\n{}\n\n",
                stamp, self.subject, self.message, self.detail
            )
        }
    }
}

/// Appends failure records to an append-only text artifact.
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an anomaly. Infallible: a log write that fails is itself
    /// swallowed (traced at debug level only).
    pub fn record(&self, subject: &str, message: &str, detail: &str) {
        let record = FailureRecord::new(subject, message, detail);
        if let Err(e) = self.append(&record) {
            debug!(path = %self.path.display(), error = %e, "failure log write suppressed");
        }
    }

    fn append(&self, record: &FailureRecord) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // One write per record keeps concurrent appends from interleaving.
        file.write_all(record.render().as_bytes())
    }
}
