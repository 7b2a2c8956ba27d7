use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Remote API settings
    pub api: ApiSettings,
    /// Logging settings
    pub telemetry: TelemetrySettings,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the backend, e.g. `https://secutils.dev/`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of text
    pub structured_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings {
                base_url: "http://localhost:7070/".to_string(),
                timeout_seconds: 30,
                user_agent: format!("secutils-client/{}", env!("CARGO_PKG_VERSION")),
            },
            telemetry: TelemetrySettings {
                log_level: "info".to_string(),
                structured_logging: false,
            },
        }
    }
}

impl ApiSettings {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parsed base URL, always ending with `/` so relative joins keep its path
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)
        } else {
            Url::parse(&format!("{}/", self.base_url))
        }
    }
}
