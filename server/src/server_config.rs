use std::net::SocketAddr;

use common::config::Validate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "tictactoe_server.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub static_files_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            static_files_path: "static".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid bind_address '{}': {}", self.bind_address, e))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.static_files_path.is_empty() {
            return Err("static_files_path must not be empty".to_string());
        }
        Ok(())
    }
}
