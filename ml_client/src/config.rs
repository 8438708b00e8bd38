use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_api_prefix() -> String {
    "/api".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl BackendConfig {
    pub fn get_address(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Address plus the API prefix, without a trailing slash.
    pub fn get_base_url(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.get_address()
        } else {
            format!("{}/{}", self.get_address(), prefix)
        }
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    // Never longer than the overall request timeout.
    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.min(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_config(api_prefix: &str) -> BackendConfig {
        BackendConfig {
            host: "127.0.0.1".into(),
            port: 8000,
            api_prefix: api_prefix.into(),
            timeout_ms: 500,
            connect_timeout_ms: 3_000,
        }
    }

    #[test]
    fn test_get_base_url() {
        assert_eq!(
            backend_config("/api").get_base_url(),
            "http://127.0.0.1:8000/api"
        );
        assert_eq!(
            backend_config("api/v2/").get_base_url(),
            "http://127.0.0.1:8000/api/v2"
        );
        assert_eq!(backend_config("/").get_base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_connect_timeout_capped_by_timeout() {
        let config = backend_config("/api");
        assert_eq!(config.get_timeout(), Duration::from_millis(500));
        assert_eq!(config.get_connect_timeout(), Duration::from_millis(500));
    }
}
