use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_path: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("ROSTER_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let data_path = std::env::var("ROSTER_DATA_PATH")
            .unwrap_or_else(|_| "assignments.json".to_string())
            .into();

        let log_level = std::env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            listen_addr,
            data_path,
            log_level,
        })
    }
}
