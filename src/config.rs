//! Server configuration from the environment.

use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WATCH_TIMEOUT_SECS: u64 = 25;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long a watch request waits for a change before returning the current snapshot.
    pub watch_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            watch_timeout: Duration::from_secs(DEFAULT_WATCH_TIMEOUT_SECS),
        }
    }
}

/// Trimmed, non-empty value of an environment variable.
fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `WATCH_TIMEOUT_SECS`; unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(env_value)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            watch_timeout: lookup("WATCH_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.watch_timeout),
        }
    }
}
