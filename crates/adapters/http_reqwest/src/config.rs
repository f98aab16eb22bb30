//! Device connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where the arm controller lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Host (and optional port) of the controller, e.g. `192.168.43.100`.
    ///
    /// A value that already carries a scheme is used as is.
    pub address: String,
    /// Upper bound on a single request, in milliseconds.
    pub timeout_ms: u64,
}

impl HttpConfig {
    /// Base URL every endpoint path is appended to.
    #[must_use]
    pub fn base_url(&self) -> String {
        let address = self.address.trim_end_matches('/');
        if address.contains("://") {
            format!("{address}/api")
        } else {
            format!("http://{address}/api")
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "192.168.43.100".to_string(),
            timeout_ms: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.address, "192.168.43.100");
        assert_eq!(config.timeout(), Duration::from_millis(3000));
        assert_eq!(config.base_url(), "http://192.168.43.100/api");
    }

    #[test]
    fn should_keep_explicit_scheme() {
        let config = HttpConfig {
            address: "https://arm.local:8443/".to_string(),
            ..HttpConfig::default()
        };
        assert_eq!(config.base_url(), "https://arm.local:8443/api");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            address = "10.0.0.7:5000"
            timeout_ms = 1500
        "#;
        let config: HttpConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.7:5000/api");
        assert_eq!(config.timeout_ms, 1500);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: HttpConfig = toml::from_str(r#"address = "arm.local""#).unwrap();
        assert_eq!(config.address, "arm.local");
        assert_eq!(config.timeout_ms, 3000);
    }
}
