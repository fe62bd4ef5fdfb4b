//! Line-delimited JSON session over stdin/stdout

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::protocol::{RequestHandler, VaultRequest, VaultResponse};
use vault_core::Vault;

/// stdio session: one request per input line, one response per output line
pub struct StdioSession {
    handler: RequestHandler,
}

impl StdioSession {
    /// Create a new stdio session
    pub fn new(vault: Arc<RwLock<Vault>>, generated_length: usize) -> Self {
        Self {
            handler: RequestHandler::new(vault, generated_length),
        }
    }

    /// Serve requests from stdin until EOF or logout
    pub async fn run(&self) -> std::io::Result<()> {
        info!("Starting vault session on stdio");
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(reader, &mut stdout).await
    }

    /// Serve requests from `reader`, writing responses to `writer`
    pub async fn serve<R, W>(&self, mut reader: R, writer: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();

            let bytes_read = reader.read_until(b'\n', &mut buf).await?;
            if bytes_read == 0 {
                info!("EOF received, ending session");
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    error!("Request line is not valid UTF-8: {}", e);
                    write_response(writer, &VaultResponse::parse_error(e)).await?;
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request: VaultRequest = match serde_json::from_str(trimmed) {
                Ok(request) => request,
                Err(e) => {
                    error!("Failed to parse request: {}", e);
                    write_response(writer, &VaultResponse::parse_error(e)).await?;
                    continue;
                }
            };

            let is_logout = matches!(request, VaultRequest::Logout);
            let response = self.handler.handle(request).await;
            write_response(writer, &response).await?;

            if is_logout {
                info!("Logged out, ending session");
                break;
            }
        }

        Ok(())
    }
}

async fn write_response<W>(writer: &mut W, response: &VaultResponse) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = serde_json::to_string(response)?;
    debug!("Sending response (ok={})", response.ok);
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
