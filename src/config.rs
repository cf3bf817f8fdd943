use std::env;
use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const API_URL: &str = "http://localhost:8080/api/";
const API_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(PORT),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_env() -> Self {
        let timeout_ms = env::var("GLOBETROTTER_API_TIMEOUT_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(API_TIMEOUT_MS);
        Self {
            base_url: env::var("GLOBETROTTER_API_URL").unwrap_or_else(|_| API_URL.to_string()),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::new(API_URL, Duration::from_millis(API_TIMEOUT_MS))
    }
}
