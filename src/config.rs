// src/config.rs
use anyhow::Context;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub form_session_idle_secs: u64,
    pub form_session_capacity: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub enable_hsts: bool,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            form_session_idle_secs: 1800, // 30 minutes
            form_session_capacity: 10_000,
            rate_limit_max_requests: 60,
            rate_limit_window_secs: 60,
            enable_hsts: false,
            static_dir: "static".to_string(),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            host: env_or("HOST", defaults.host)?,
            port: env_or("PORT", defaults.port)?,
            form_session_idle_secs: env_or("FORM_SESSION_IDLE_SECS", defaults.form_session_idle_secs)?,
            form_session_capacity: env_or("FORM_SESSION_CAPACITY", defaults.form_session_capacity)?,
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", defaults.rate_limit_max_requests)?,
            rate_limit_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", defaults.rate_limit_window_secs)?,
            enable_hsts: env_or("ENABLE_HSTS", defaults.enable_hsts)?,
            static_dir: env_or("STATIC_DIR", defaults.static_dir)?,
        })
    }

    pub fn server_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid server address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_bad_host_is_reported() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(config.server_addr().is_err());
    }

    #[test]
    fn test_env_or_parses_and_falls_back() {
        std::env::set_var("SIGNUP_FORM_TEST_PORT", "8081");
        assert_eq!(env_or("SIGNUP_FORM_TEST_PORT", 3000u16).unwrap(), 8081);

        std::env::set_var("SIGNUP_FORM_TEST_BAD", "eighty");
        assert!(env_or("SIGNUP_FORM_TEST_BAD", 3000u16).is_err());

        assert!(env_or("SIGNUP_FORM_TEST_UNSET", true).unwrap());
    }
}
