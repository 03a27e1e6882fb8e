use std::sync::Arc;

use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::context::GatewayContext;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcResponse};

use super::{decode, Incoming, TransportError};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
pub struct StdioServer {
    ctx: Arc<GatewayContext>,
}

impl StdioServer {
    pub fn new(ctx: Arc<GatewayContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self) -> Result<(), TransportError> {
        tracing::info!("MCP stdio transport ready");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), TransportError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = (&mut reader)
                .take(MAX_MESSAGE_BYTES as u64 + 1)
                .read_until(b'\n', &mut raw)
                .await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                tracing::warn!(limit = MAX_MESSAGE_BYTES, "message too large");
                if raw.last() != Some(&b'\n') {
                    skip_line(&mut reader).await?;
                }
                write_response(&mut writer, &parse_error()).await?;
                continue;
            }

            if raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let req = match decode(&raw) {
                Incoming::Request(req) => req,
                Incoming::Notification(method) => {
                    tracing::debug!(%method, "notification ignored");
                    continue;
                }
                Incoming::Malformed(e) => {
                    tracing::warn!(error = %e, "parse error");
                    write_response(&mut writer, &parse_error()).await?;
                    continue;
                }
            };

            let resp = handlers::dispatch(&req, &self.ctx).await;
            write_response(&mut writer, &resp).await?;
        }

        Ok(())
    }
}

/// Discard input up to and including the next newline without buffering it.
async fn skip_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

fn parse_error() -> JsonRpcResponse {
    JsonRpcResponse::error(None, JsonRpcError::parse_error())
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let out = resp.to_json()?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
