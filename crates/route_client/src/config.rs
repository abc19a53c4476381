use std::{env, error, fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8050";
pub const DEFAULT_ENDPOINT: &str = "/api/route/plan";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidTimeout(String),
    InvalidBaseUrl(String),
    HttpClient(Arc<reqwest::Error>),
}

impl error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTimeout(value) => {
                write!(f, "ROUTE_API_TIMEOUT_SECS must be a whole number, got '{value}'")
            }
            Self::InvalidBaseUrl(value) => {
                write!(f, "ROUTE_API_URL must start with http:// or https://, got '{value}'")
            }
            Self::HttpClient(e) => write!(f, "could not build HTTP client: {e}"),
        }
    }
}

impl From<reqwest::Error> for ConfigError {
    fn from(e: reqwest::Error) -> Self {
        ConfigError::HttpClient(Arc::new(e))
    }
}

/// Where and how to reach the route planning backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteClientConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub proxy: Option<String>,
}

impl Default for RouteClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

impl RouteClientConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads `ROUTE_API_URL`, `ROUTE_API_ENDPOINT`, `ROUTE_API_TIMEOUT_SECS`
    /// and `ROUTE_API_PROXY`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("ROUTE_API_URL").unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        let endpoint = lookup("ROUTE_API_ENDPOINT").unwrap_or(defaults.endpoint);
        let timeout_secs = match lookup("ROUTE_API_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(value))?,
            None => defaults.timeout_secs,
        };
        let proxy = lookup("ROUTE_API_PROXY").filter(|proxy| !proxy.trim().is_empty());

        Ok(Self {
            base_url,
            endpoint,
            timeout_secs,
            proxy,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = RouteClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RouteClientConfig::default());
        assert_eq!(config.url(), "http://localhost:8050/api/route/plan");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn reads_all_variables() {
        let config = RouteClientConfig::from_lookup(lookup(&[
            ("ROUTE_API_URL", "https://routes.example.org/"),
            ("ROUTE_API_ENDPOINT", "v2/plan"),
            ("ROUTE_API_TIMEOUT_SECS", " 3 "),
            ("ROUTE_API_PROXY", "http://proxy:3128"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "https://routes.example.org/v2/plan");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn blank_proxy_is_ignored() {
        let config =
            RouteClientConfig::from_lookup(lookup(&[("ROUTE_API_PROXY", "  ")])).unwrap();
        assert_eq!(config.proxy, None);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = RouteClientConfig::from_lookup(lookup(&[("ROUTE_API_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(ref v) if v == "soon"));

        let err = RouteClientConfig::from_lookup(lookup(&[("ROUTE_API_URL", "localhost:8050")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
