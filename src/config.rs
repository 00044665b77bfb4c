use std::{net::SocketAddr, time::Duration};

pub const API_KEY_VAR: &str = "DEEPSEEK_KEY";
pub const BASE_URL_VAR: &str = "DEEPSEEK_BASE_URL";
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";
pub const TIMEOUT_VAR: &str = "ADVICE_TIMEOUT_SECS";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required secret {0} is not set")]
    MissingSecret(&'static str),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings loaded once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Option<Duration>,
    pub bind_addr: SocketAddr,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingSecret(API_KEY_VAR))?;

        let base_url = get(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let request_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_VAR,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => None,
        };

        let raw_addr = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_ADDR_VAR,
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            base_url,
            model,
            request_timeout,
            bind_addr,
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
