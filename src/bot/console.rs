//! Console transport: runs the dispatcher over lines of text.
//!
//! `guildquest start --console` wires this to stdin/stdout so the bot can be exercised
//! without a Discord token. Replies are rendered as plain text, one blank line apart.
use anyhow::Result;
use log::info;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::dispatch::Dispatcher;

/// Feed every line from `reader` to the dispatcher, writing replies to `writer`.
/// Returns the number of replies written once the input ends.
pub async fn serve_lines<R, W>(dispatcher: &Dispatcher, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut replies = 0;
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = dispatcher.handle(&line).await {
            writer.write_all(reply.to_plain_text().as_bytes()).await?;
            writer.write_all(b"\n\n").await?;
            writer.flush().await?;
            replies += 1;
        }
    }
    Ok(replies)
}

/// Serve stdin until EOF or Ctrl-C.
pub async fn run(dispatcher: Arc<Dispatcher>) -> Result<()> {
    info!(
        "Console mode: type commands such as {}gql, Ctrl-D to exit",
        dispatcher.prefix()
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tokio::select! {
        served = serve_lines(&dispatcher, stdin, stdout) => {
            let replies = served?;
            info!("Console input closed after {} replies", replies);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }
    Ok(())
}
