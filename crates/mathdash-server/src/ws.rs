//! WebSocket accept loop.

use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

use crate::connection::{handle_connection, ConnectionContext};

/// Accept connections forever, one task per client.
pub async fn serve(listener: TcpListener, ctx: ConnectionContext) {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(addr = %addr, "WebSocket listener ready");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, addr, ctx).await,
                        Err(e) => {
                            tracing::warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}
