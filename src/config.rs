use crate::ddgs::TEXT_BACKENDS;
use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AUTO_BACKEND: &str = "duckduckgo";

#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout applied to every provider client.
    pub timeout: Duration,
    /// Concrete text backend that `backend = "auto"` resolves to.
    pub auto_backend: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auto_backend: DEFAULT_AUTO_BACKEND.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_opt = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let timeout = match env_opt("DDGS_TIMEOUT") {
            Some(raw) => parse_u64_range("DDGS_TIMEOUT", &raw, 1, 120)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let auto_backend = env_opt("DDGS_AUTO_BACKEND")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_AUTO_BACKEND.into());
        if !TEXT_BACKENDS.contains(&auto_backend.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "DDGS_AUTO_BACKEND must be one of: {}",
                TEXT_BACKENDS.join(", ")
            )));
        }

        Ok(Self { timeout: Duration::from_secs(timeout), auto_backend })
    }
}

fn parse_u64_range(name: &str, raw: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::Invalid(format!("{name} must be an integer between {min} and {max}"));
    let val: u64 = raw.trim().parse().map_err(|_| invalid())?;
    if !(min..=max).contains(&val) {
        return Err(invalid());
    }
    Ok(val)
}
