//! Config - Portal Client Configuration

use serde::{Deserialize, Serialize};

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP API configuration
    pub api: ApiConfig,
    /// Push-channel configuration
    pub channel: ChannelConfig,
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.asogan.example/v1".to_string(),
            timeout_secs: crate::constants::HTTP_TIMEOUT_SECS,
        }
    }
}

/// Push-channel (Redis pub/sub) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Redis host
    pub host: String,
    /// Redis port
    pub port: u16,
    /// Redis password (optional)
    pub password: Option<String>,
    /// Channel namespace prefix
    pub namespace: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            namespace: crate::constants::CHANNEL_NAMESPACE.to_string(),
        }
    }
}
