//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Wizard client configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Base URL of the decision service, e.g. `https://keuzegids.example.com/api`.
    pub base_url: String,
    /// Per-request timeout. A hung request must not leave the wizard
    /// waiting indefinitely.
    pub request_timeout: Duration,
}

const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl WizardConfig {
    /// Load configuration from `KEUZEGIDS_API_URL` and
    /// `KEUZEGIDS_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("KEUZEGIDS_API_URL").map_err(|_| {
            ConfigError::MissingEnvVar {
                key: "KEUZEGIDS_API_URL".to_string(),
                hint: "export KEUZEGIDS_API_URL=https://keuzegids.example.com/api".to_string(),
            }
        })?;

        let request_timeout = match std::env::var("KEUZEGIDS_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 =
                    raw.parse()
                        .map_err(|_| ConfigError::InvalidValue {
                            key: "KEUZEGIDS_TIMEOUT_SECS".to_string(),
                            message: format!("'{raw}' is not a whole number of seconds"),
                        })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = WizardConfig::new("http://localhost:5000/api/");
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
