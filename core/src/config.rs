//! Client configuration.
//!
//! The access token is the only required input; the base URL defaults to
//! the production endpoint and is overridden mainly to point at a mock
//! server.

use std::env;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.esa.io";

pub const TOKEN_VAR: &str = "ESA_ACCESS_TOKEN";
pub const BASE_URL_VAR: &str = "ESA_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Sent verbatim as the `access_token` query parameter; must already be
    /// URL-safe.
    pub access_token: String,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load from `ESA_ACCESS_TOKEN` and the optional `ESA_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_VAR))?;
        let config = Self::new(token);
        Ok(match lookup(BASE_URL_VAR).filter(|u| !u.is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }
}
