//! `localchat ask`: one message, no history.

use anyhow::Result;
use localchat_gateway::GatewayConfig;

pub async fn handle(config: &GatewayConfig, text: &str) -> Result<()> {
    let mut session = super::new_session(config);
    super::exchange(&mut session, text).await?;
    Ok(())
}
