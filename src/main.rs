use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use locstrings_merge::config::MergeConfig;
use locstrings_merge::console::{Console, StatusSink};
use locstrings_merge::services::pipeline;
use locstrings_merge::MergeError;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cfg = MergeConfig::from_env();
    let mut console = Console::stdout(cfg.charset);

    match pipeline::run(&cfg, &mut console) {
        Ok(report) => {
            if let Ok(json) = serde_json::to_string(&report) {
                debug!(report = %json, "merge report");
            }
            console.line("");
            console.line("=== merge complete ===");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "merge aborted");
            // the existence pre-check already reported a missing input
            if !matches!(e, MergeError::FileNotFound { .. }) {
                console.line(&format!("error: {e}"));
            }
            console.line("");
            console.line("=== merge failed ===");
            ExitCode::from(e.exit_code())
        }
    }
}
