use std::sync::Arc;

use aud_auth::InboundMessage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::context::AppContext;

const INBOUND_CAPACITY: usize = 16;

/// Handle `auditor relay`.
///
/// Each stdin line is one `{"origin": ..., "data": {...}}` event. Announcements
/// go to stdout as JSON lines. Runs until stdin closes.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let relay = Arc::clone(ctx.client.relay());
    let (sender, receiver) = mpsc::channel(INBOUND_CAPACITY);
    let listener = tokio::spawn(async move { relay.listen(receiver).await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(message) = parse_line(&line) else {
            continue;
        };
        if sender.send(message).await.is_err() {
            break;
        }
    }
    drop(sender);

    listener.await?;
    Ok(())
}

fn parse_line(line: &str) -> Option<InboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(message) => Some(message),
        Err(error) => {
            tracing::debug!(%error, "skipping unreadable relay input line");
            None
        }
    }
}
