//! `localchat config`: show the effective gateway settings.

use anyhow::Result;
use localchat_gateway::{
    GatewayConfig, ENV_LLM_URL, ENV_MAX_PAIRS, ENV_MODEL, ENV_TIMEOUT_MS,
};

use crate::output;

pub fn handle(config: &GatewayConfig) -> Result<()> {
    let timeout = format!("{} ms", config.timeout_ms());
    let max_pairs = config.max_pairs.to_string();
    let rows = [
        ("endpoint", ENV_LLM_URL, config.endpoint.as_str()),
        ("model", ENV_MODEL, config.model.as_str()),
        ("timeout", ENV_TIMEOUT_MS, timeout.as_str()),
        ("max_pairs", ENV_MAX_PAIRS, max_pairs.as_str()),
    ];

    let mut table = output::table("Setting", "Value");
    for (name, env, value) in rows {
        output::table_row(&mut table, &format!("{name} ({env})"), value);
    }

    let data = serde_json::json!({
        "endpoint": config.endpoint,
        "model": config.model,
        "timeout_ms": config.timeout_ms(),
        "max_pairs": config.max_pairs,
    });
    output::table_print(&table, "config", &data);
    Ok(())
}
