//! HTTP request/response API.

mod error;
mod handlers;
mod routes;
mod state;
mod types;

pub use error::ApiError;
pub use routes::create_router;
pub use state::ApiState;
pub use types::*;

use tokio::net::TcpListener;

/// Serve the API on `listener` until the server stops.
pub async fn serve(listener: TcpListener, state: ApiState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(addr = %addr, "HTTP API listening");
    }
    axum::serve(listener, create_router(state)).await
}
