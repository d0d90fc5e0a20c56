use std::env;
use std::fmt;

use crate::{Error, Result};

pub const GUARDIAN_API_KEY_VAR: &str = "GUARDIAN_API_KEY";
pub const GUARDIAN_API_URL_VAR: &str = "GUARDIAN_API_URL";
pub const AWS_REGION_VAR: &str = "AWS_REGION";
pub const AWS_ENDPOINT_URL_VAR: &str = "AWS_ENDPOINT_URL";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Process configuration read from the environment (and `.env`, when present).
#[derive(Clone, Default)]
pub struct Config {
    pub guardian_api_key: Option<String>,
    pub guardian_api_url: Option<String>,
    pub aws_region: Option<String>,
    pub aws_endpoint_url: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            guardian_api_key: var(GUARDIAN_API_KEY_VAR),
            guardian_api_url: var(GUARDIAN_API_URL_VAR),
            aws_region: var(AWS_REGION_VAR),
            aws_endpoint_url: var(AWS_ENDPOINT_URL_VAR),
            log_level: var(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if api_key.is_some() {
            self.guardian_api_key = api_key;
        }
        self
    }

    pub fn api_key(&self) -> Result<&str> {
        self.guardian_api_key.as_deref().ok_or_else(|| {
            Error::Configuration(format!(
                "Guardian API key is required. Set {} environment variable.",
                GUARDIAN_API_KEY_VAR
            ))
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("guardian_api_key", &self.guardian_api_key.as_deref().map(|_| "<redacted>"))
            .field("guardian_api_url", &self.guardian_api_url)
            .field("aws_region", &self.aws_region)
            .field("aws_endpoint_url", &self.aws_endpoint_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}
