use std::env;

use crate::error::{ExportError, Result};

/// Environment variable holding the inventory API base URL.
pub const URL_VAR: &str = "NETBOX_URL";
/// Environment variable holding the inventory API token.
pub const TOKEN_VAR: &str = "NETBOX_TOKEN";

/// Connection settings for the inventory source, resolved once at startup
/// and handed to the client constructor.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub token: String,
}

impl Config {
    /// Builds a configuration from explicit values. Trailing slashes on the
    /// base URL are stripped so endpoint paths can be joined verbatim.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Reads the configuration from the environment. Either variable being
    /// absent or blank is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let base_url = require(URL_VAR)?;
        let token = require(TOKEN_VAR)?;
        Ok(Self::new(base_url, token))
    }
}

fn require(name: &'static str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ExportError::Config(name)),
    }
}
