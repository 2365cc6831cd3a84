use std::time::Duration;

use common::config::Validate;
use common::logger::LogLevel;
use common::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_CONFIG_PATH: &str = "snake_server.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub snake_color: Color,
    /// Upper bound for one controller call. `None` waits as long as the
    /// controller takes.
    pub decision_timeout_ms: Option<u64>,
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            snake_color: Color::CORNFLOWER_BLUE,
            decision_timeout_ms: None,
            log_level: LogLevel::Info,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn decision_timeout(&self) -> Option<Duration> {
        self.decision_timeout_ms.map(Duration::from_millis)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.decision_timeout_ms == Some(0) {
            return Err("decision_timeout_ms must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}
