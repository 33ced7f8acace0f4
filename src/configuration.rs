use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::model::alert::split_recipients;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Destination of forwarded notifications (`URL`).
    pub forward_url: String,
    /// Bearer token for the destination (`TOKEN`).
    pub token: String,
    pub recipients: Vec<String>,
    pub forward_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let forward_url = lookup("URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("URL"))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            forward_url,
            token: lookup("TOKEN").unwrap_or_default(),
            recipients: split_recipients(&lookup("RECIPIENTS").unwrap_or_default()),
            forward_timeout: Duration::from_secs(parse_or(
                &lookup,
                "FORWARD_TIMEOUT_SECS",
                DEFAULT_FORWARD_TIMEOUT_SECS,
            )?),
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) if value.is_empty() => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = Settings::from_lookup(|key| std::env::var(key).ok())?;

    if settings.token.is_empty() {
        warn!("TOKEN is not set, notifications will carry an empty bearer token");
    }
    if settings.recipients.iter().all(String::is_empty) {
        warn!("RECIPIENTS is empty, notifications will have no addressable recipient");
    }

    Ok(settings)
}
