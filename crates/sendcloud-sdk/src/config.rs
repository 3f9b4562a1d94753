//! Client configuration and API credentials.
//!
//! Both can be built in code or loaded from `SENDCLOUD_*` environment
//! variables:
//!
//! | Variable                        | Setting                          |
//! |---------------------------------|----------------------------------|
//! | `SENDCLOUD_PUBLIC_KEY`          | [`Credentials::public_key`]      |
//! | `SENDCLOUD_SECRET_KEY`          | [`Credentials::secret_key`]      |
//! | `SENDCLOUD_API_URL`             | [`ClientConfig::api_url`]        |
//! | `SENDCLOUD_SERVICE_POINTS_URL`  | [`ClientConfig::service_points_url`] |
//! | `SENDCLOUD_USER_AGENT`          | [`ClientConfig::user_agent`]     |
//! | `SENDCLOUD_TIMEOUT_SECS`        | [`ClientConfig::timeout`]        |
//! | `SENDCLOUD_PARTNER_ID`          | [`ClientConfig::partner_id`]     |

use std::time::Duration;

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::error::ConfigError;

/// Production shipping API.
pub const DEFAULT_API_URL: &str = "https://panel.sendcloud.sc/api/v2";
/// Production service points API.
pub const DEFAULT_SERVICE_POINTS_URL: &str = "https://servicepoints.sendcloud.sc/api/v2";

const ENV_PREFIX: &str = "SENDCLOUD";

// ============================================================================
// Client configuration
// ============================================================================

/// Configuration for [`crate::client::SendcloudClient`].
///
/// # Examples
///
/// ```rust
/// use sendcloud_sdk::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_partner_id("b4b3d5b2-0000-4000-8000-000000000000");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the shipping API, without a trailing slash
    pub api_url: String,
    /// Base URL of the service points API
    pub service_points_url: String,
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Sent as `Sendcloud-Partner-Id` when set
    pub partner_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            service_points_url: DEFAULT_SERVICE_POINTS_URL.to_string(),
            user_agent: concat!("sendcloud-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            partner_id: None,
        }
    }
}

impl ClientConfig {
    /// Start a [`ClientConfigBuilder`] from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from `SENDCLOUD_*` environment variables.
    ///
    /// Unset variables keep their defaults. The result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = load_settings()?;

        let mut config = Self::default();
        if let Some(api_url) = settings.api_url {
            config.api_url = api_url;
        }
        if let Some(url) = settings.service_points_url {
            config.service_points_url = url;
        }
        if let Some(user_agent) = settings.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(seconds) = settings.timeout_secs {
            config.timeout = Duration::from_secs(seconds);
        }
        config.partner_id = settings.partner_id.filter(|id| !id.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Override the shipping API base URL, e.g. for a mock server.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_service_points_url(mut self, url: impl Into<String>) -> Self {
        self.service_points_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout. Must be non-zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Identify requests as coming from a registered integration partner.
    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    /// Check that the URLs are absolute http(s) URLs, the user agent is set
    /// and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("api_url", &self.api_url)?;
        validate_url("service_points_url", &self.service_points_url)?;

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(invalid("timeout", "must be greater than zero"));
        }
        Ok(())
    }

    /// `path` appended to the API base URL.
    pub(crate) fn api_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Whether `url` has the same scheme, host and port as the API base URL.
    pub(crate) fn is_api_origin(&self, url: &Url) -> bool {
        Url::parse(&self.api_url).is_ok_and(|api| api.origin() == url.origin())
    }

    /// `path` appended to the service points base URL.
    pub(crate) fn service_points_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.service_points_url.trim_end_matches('/'), path)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn service_points_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_points_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.config.partner_id = Some(partner_id.into());
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first invalid setting.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// API key pair used for HTTP basic authentication.
///
/// The secret key also signs webhooks. It is zeroed on drop and redacted
/// from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    secret_key: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from an API key pair.
    ///
    /// # Arguments
    ///
    /// * `public_key` - Basic-auth user name
    /// * `secret_key` - Basic-auth password and webhook signing key
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: Zeroizing::new(secret_key.into()),
        }
    }

    /// Load `SENDCLOUD_PUBLIC_KEY` and `SENDCLOUD_SECRET_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = load_settings()?;

        let public_key = settings
            .public_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| invalid("public_key", "SENDCLOUD_PUBLIC_KEY is not set"))?;
        let secret_key = settings
            .secret_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| invalid("secret_key", "SENDCLOUD_SECRET_KEY is not set"))?;

        Ok(Self {
            public_key,
            secret_key: Zeroizing::new(secret_key),
        })
    }

    /// Public API key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Secret API key.
    ///
    /// Do not log this value.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<REDACTED>")
            .finish()
    }
}

// ============================================================================
// Environment loading
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct EnvSettings {
    public_key: Option<String>,
    secret_key: Option<String>,
    api_url: Option<String>,
    service_points_url: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    partner_id: Option<String>,
}

fn load_settings() -> Result<EnvSettings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| invalid(field, format!("'{}' is not a URL: {}", value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, format!("unsupported scheme '{}'", scheme))),
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
