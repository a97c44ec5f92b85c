use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub port: u16,
    pub fallback_enabled: bool,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            port: 3000,
            fallback_enabled: true,
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Reads `DASHBOARD_*` variables; call `dotenvy::dotenv()` first to pick up
    /// a `.env` file. Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_url = lookup("DASHBOARD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let port = lookup("DASHBOARD_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);

        let fallback_enabled = lookup("DASHBOARD_FALLBACK")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(defaults.fallback_enabled);

        let http_timeout = lookup("DASHBOARD_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Config { api_url, port, fallback_enabled, http_timeout }
    }
}
