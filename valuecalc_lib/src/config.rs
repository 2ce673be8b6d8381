//! Provider settings read from the environment, with CLI overrides.

use std::time::Duration;

use url::Url;

use crate::error::ValuecalcError;

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const BASE_URL_VAR: &str = "VALUECALC_BASE_URL";
pub const TIMEOUT_VAR: &str = "VALUECALC_TIMEOUT_SECS";

/// Where the provider lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Reads `VALUECALC_BASE_URL` and `VALUECALC_TIMEOUT_SECS`. Unset or
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ProviderConfig::from_env`] with an injectable lookup.
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = get(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_u64(get(TIMEOUT_VAR), DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ValuecalcError> {
        if let Some(url) = base_url {
            self.base_url = url.trim().to_string();
        }
        if let Some(secs) = timeout_secs {
            if secs == 0 {
                return Err(ValuecalcError::Config(
                    "timeout must be at least 1 second".to_string(),
                ));
            }
            self.timeout = Duration::from_secs(secs);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ValuecalcError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ValuecalcError::Config(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValuecalcError::Config(format!(
                "base URL '{}' must use http or https",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Builds the HTTP client for this configuration.
    pub fn client(&self) -> valuecalc_api::Client {
        valuecalc_api::Client::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}

fn parse_u64(val: Option<String>, default: u64) -> u64 {
    match val {
        Some(v) => match v.trim().parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!("ignoring invalid {}={:?}, using {}", TIMEOUT_VAR, v, default);
                default
            }
        },
        None => default,
    }
}
