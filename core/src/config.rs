//! Client construction parameters.

use std::fmt;

use serde::Deserialize;

/// API key and secret, sent on every request as `Authorization: Key <key>:<secret>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Key {}:{}", self.key, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Everything needed to construct a client. All fields are required.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl ClientConfig {
    /// Load configuration from `REMOTE_BASE_URL`, `REMOTE_API_KEY` and
    /// `REMOTE_API_SECRET`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("REMOTE"))
    }

    /// Load configuration from an explicit environment source. Fails when
    /// any of the three values is missing.
    pub fn from_source(env: config::Environment) -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder().add_source(env).build()?;

        cfg.try_deserialize()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.api_key, &self.api_secret)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
