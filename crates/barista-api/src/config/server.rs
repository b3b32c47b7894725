//! HTTP server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Matches the default apiServerUrl of the environment record
            bind_address: ([127, 0, 0, 1], 5000).into(),
            request_timeout: 30,
        }
    }
}
