//! Listen addresses for the API server and the Prometheus exporter.

use std::env;
use std::net::SocketAddr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub metrics_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            metrics_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
        }
    }
}

impl ServerConfig {
    /// Reads `SERVER_ADDR` and `METRICS_ADDR`. Unparseable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            addr: env::var("SERVER_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.addr),
            metrics_addr: env::var("METRICS_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.metrics_addr),
        }
    }
}
