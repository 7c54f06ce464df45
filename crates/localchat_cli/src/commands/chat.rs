//! `localchat chat`: interactive loop over stdin.

use anyhow::Result;
use localchat_gateway::GatewayConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Exit,
    Clear,
    Message(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    match line.trim() {
        "" => Line::Skip,
        "/exit" | "/quit" => Line::Exit,
        "/clear" => Line::Clear,
        text => Line::Message(text),
    }
}

pub async fn handle(config: &GatewayConfig) -> Result<()> {
    let mut session = super::new_session(config);

    output::header("localchat");
    output::dim(&format!(
        "{} via {} · /clear resets the conversation, /exit quits",
        config.model, config.endpoint
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output::prompt_marker();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match classify(&line) {
            Line::Skip => continue,
            Line::Exit => break,
            Line::Clear => {
                session.clear();
                output::dim("Conversation cleared.");
            }
            Line::Message(text) => {
                super::exchange(&mut session, text).await?;
            }
        }
    }

    Ok(())
}
