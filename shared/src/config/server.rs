//! HTTP listener settings

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::env_or_default;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Worker count; `None` lets actix use one per physical core
    #[serde(default)]
    pub workers: Option<NonZeroUsize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: None,
        }
    }

    /// Read `SERVER_HOST`, `SERVER_PORT` and `SERVER_WORKERS` (0 means auto)
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self {
            host,
            port: env_or_default("SERVER_PORT", DEFAULT_PORT),
            workers: NonZeroUsize::new(env_or_default("SERVER_WORKERS", 0usize)),
        }
    }

    /// `host:port`, as accepted by `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
