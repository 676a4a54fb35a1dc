//! Gateway configuration.

use common::config::{env_or, env_parse};
use common::AppResult;

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            host: env_or(&["SERVER_HOST", "GATEWAY_HOST"], "0.0.0.0"),
            port: env_parse(&["SERVER_PORT", "GATEWAY_PORT"], 3000)?,
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
