use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_port: u16,
    /// Path to the accounts file (`username password home_directory`
    /// triples, whitespace-separated).
    pub accounts_file: String,
    pub backlog: u32,
    /// Per-session idle timeout on the control channel.
    pub idle_timeout_ms: u64,
    /// Bounds for the downward PASV/EPSV port scan.
    pub pasv_port_min: u16,
    pub pasv_port_max: u16,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: 21,
            accounts_file: String::from("accounts"),
            backlog: 100,
            idle_timeout_ms: 5 * 60 * 1000,
            pasv_port_min: 1024,
            pasv_port_max: 65535,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Config> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;
        Ok(config)
    }
}
