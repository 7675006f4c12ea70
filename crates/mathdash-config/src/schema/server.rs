//! Network listener configuration.

use serde::{Deserialize, Serialize};

/// Listener addresses and per-connection limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Port for the WebSocket push channel.
    pub ws_port: u16,
    /// Port for the HTTP request/response API.
    pub http_port: u16,
    /// Inbound frames allowed per connection per second (valid range: 1-1000).
    pub max_messages_per_second: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            ws_port: 9001,
            http_port: 8080,
            max_messages_per_second: 20,
        }
    }
}

impl ServerConfig {
    pub fn ws_addr(&self) -> String {
        format!("{}:{}", self.host, self.ws_port)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}
