use std::time::Duration;

use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable 'GEMINI_API_KEY' (or 'API_KEY') is not set")]
    MissingApiKey,

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// `None` leaves the request timeout to the remote service.
    pub gemini_timeout: Option<Duration>,
    pub port: u16,
    /// `None` disables the upload body limit.
    pub max_upload_bytes: Option<usize>,
    pub max_sessions: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let max_sessions = parse_optional::<usize>(non_empty("MAX_SESSIONS"), "MAX_SESSIONS")?
            .unwrap_or(DEFAULT_MAX_SESSIONS);
        if max_sessions == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_SESSIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            gemini_api_key,
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_timeout: parse_optional::<u64>(non_empty("GEMINI_TIMEOUT_SECS"), "GEMINI_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            port: parse_optional(non_empty("PORT"), "PORT")?.unwrap_or(DEFAULT_PORT),
            max_upload_bytes: parse_optional(non_empty("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?,
            max_sessions,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_optional<T>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        })
        .transpose()
}
