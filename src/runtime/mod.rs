// src/runtime/mod.rs
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::protocol::JsonRpcResponse;
use crate::server::Server;
use crate::weather::WeatherGateway;

/// The message loop: one line in, at most one line out, strictly in order.
/// Returns on EOF. Only I/O failures on the streams themselves end it early.
pub async fn serve<G, R, W>(server: &Server<G>, mut reader: R, mut writer: W) -> Result<()>
where
    G: WeatherGateway,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        // This waits until the client sends a "\n" character (or closes the stream)
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read from input")?;
        if bytes_read == 0 {
            break;
        }

        // Invalid UTF-8 surfaces as a parse error reply, not a dead loop
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = server.handle_line(line).await {
            send_response(&mut writer, &response).await?;
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}

// Write one message + newline, then flush so the client sees it immediately
async fn send_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json_string = serde_json::to_string(response)?;
    // Messages are separated by newlines
    json_string.push('\n');

    writer
        .write_all(json_string.as_bytes())
        .await
        .context("Failed to write response")?;
    writer.flush().await?;

    Ok(())
}
