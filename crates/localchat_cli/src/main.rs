//! CLI entry point for localchat.

mod cli;
mod commands;
mod output;

use clap::Parser;
use localchat_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load the nearest `.env` (cwd or a parent) so LOCALCHAT_* and OTEL_* apply.
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            return;
        }
        if !dir.pop() {
            return;
        }
    }
}

/// Logs go to stderr so replies on stdout stay clean.
fn init_tracing(verbose: bool) {
    let mut config = ObservabilityConfig::from_env()
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_stderr(true);
    if verbose {
        config = config.with_log_level("info,localchat_gateway=debug,localchat_cli=debug");
    } else if config.log_level.is_none() {
        config = config.with_log_level("warn");
    }

    if let Err(e) = localchat_observability::init(config) {
        output::warning(&format!("Tracing disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();
    let cli = Cli::parse();
    output::init(cli.output);
    init_tracing(cli.verbose);

    let result = commands::handle(cli).await;
    localchat_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
