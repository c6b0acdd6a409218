//! Configuration module for the coachbook CLI.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::FileConfig;
use coachbook_core::CheckoutConfig;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Longest pay-later redirect delay accepted from the config file.
const MAX_PAY_LATER_REDIRECT_SECS: u64 = 60;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub api_base: Url,
    pub admin_token: Option<String>,
    pub checkout: CheckoutConfig,
}

/// Configuration loader that applies CLI overrides on top of the file.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    api_override: Option<Url>,
    token_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        api_override: Option<Url>,
        token_override: Option<String>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            api_override,
            token_override,
        }
    }

    /// Read the TOML file, apply overrides and validate.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.load_str(&config_content)
    }

    fn load_str(&self, config_content: &str) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(config_content)?;

        if let Some(api) = &self.api_override {
            file_config.api.base_url = api.clone();
        }
        if let Some(token) = &self.token_override {
            file_config.api.admin_token = Some(token.clone());
        }

        validate(&file_config)?;

        Ok(LoadedConfig {
            api_base: file_config.api.base_url,
            admin_token: file_config.api.admin_token,
            checkout: CheckoutConfig {
                callback_url: file_config.checkout.callback_url,
                pay_later_redirect: file_config.checkout.pay_later_redirect,
                pay_later_delay: Duration::from_secs(file_config.checkout.pay_later_redirect_secs),
            },
        })
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    for (name, url) in [
        ("api.base_url", &config.api.base_url),
        ("checkout.callback_url", &config.checkout.callback_url),
    ] {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be an http(s) url, got {url}"
            )));
        }
    }
    if config.checkout.pay_later_redirect_secs > MAX_PAY_LATER_REDIRECT_SECS {
        return Err(ConfigError::ValidationError(format!(
            "checkout.pay_later_redirect_secs must be at most {MAX_PAY_LATER_REDIRECT_SECS}"
        )));
    }
    Ok(())
}
