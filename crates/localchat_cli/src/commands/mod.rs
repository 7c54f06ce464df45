//! Command dispatch.

mod ask;
mod chat;
mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use localchat_gateway::{ChatSession, GatewayConfig, GatewayResult, OllamaGateway};

use crate::cli::{BackendArgs, Cli, Command};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.backend)?;

    match cli.command {
        Command::Chat => chat::handle(&config).await,
        Command::Ask { text } => ask::handle(&config, &text.join(" ")).await,
        Command::Config => config::handle(&config),
    }
}

/// Environment first, then flags on top.
fn resolve_config(args: &BackendArgs) -> Result<GatewayConfig> {
    let config = apply_overrides(GatewayConfig::from_env(), args);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(mut config: GatewayConfig, args: &BackendArgs) -> GatewayConfig {
    if let Some(url) = &args.url {
        config = config.with_endpoint(url.clone());
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    if let Some(pairs) = args.max_pairs {
        config = config.with_max_pairs(pairs);
    }
    config
}

fn new_session(config: &GatewayConfig) -> ChatSession {
    let gateway = Arc::new(OllamaGateway::new(config.clone()));
    ChatSession::new(gateway, config)
}

/// Send one message with a spinner running, then print the outcome.
async fn exchange(session: &mut ChatSession, text: &str) -> Result<GatewayResult> {
    let spinner = output::spinner("Thinking…");
    let result = session.send(text).await;
    spinner.finish_and_clear();

    let result = result?;
    output::reply(&result);
    Ok(result)
}
