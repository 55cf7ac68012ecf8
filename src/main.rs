use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use relay::chain::ChainExecutor;
use relay::types::Payload;

/// Dispatch a host lifecycle event through its registered hook chain.
///
/// Exits 0 regardless of hook failures: graceful degradation is the
/// contract, and the printed ChainResult carries everything the host needs
/// (including a `stop` effective action, which host tooling may translate
/// into its own exit code).
#[derive(Parser)]
#[command(name = "relay")]
#[command(version, about = "Event-hook orchestrator")]
struct Cli {
    /// Event name to dispatch (e.g. sessionStart, postToolUse)
    event: String,

    /// JSON object payload handed to every hook in the chain.
    /// Defaults to {"timestamp": ..., "workingDirectory": ...}
    payload: Option<String>,

    /// Project directory holding .relay/ (defaults to the current directory)
    #[arg(long)]
    project_dir: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let payload = match cli.payload.as_deref() {
        Some(raw) => {
            serde_json::from_str::<Payload>(raw).context("Payload must be a JSON object")?
        }
        None => default_payload(&project_dir),
    };

    let executor = ChainExecutor::new(&project_dir);
    let result = executor.dispatch(&cli.event, &payload).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Payload synthesized when the host passes none.
fn default_payload(project_dir: &std::path::Path) -> Payload {
    let mut payload = Payload::new();
    payload.insert("timestamp".to_string(), json!(Utc::now().timestamp_millis()));
    payload.insert(
        "workingDirectory".to_string(),
        json!(project_dir.display().to_string()),
    );
    payload
}

/// Tracing goes to stderr so stdout stays pure ChainResult JSON.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "relay=debug" } else { "relay=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
