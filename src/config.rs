//! Configuration types for dify-export

use crate::error::{Error, Result};
use std::{fmt, path::PathBuf, time::Duration};

/// Environment variable holding the console API base address
pub const ENV_CONSOLE_API: &str = "DIFY_CONSOLE_API";
/// Environment variable holding the account email
pub const ENV_EMAIL: &str = "DIFY_EMAIL";
/// Environment variable holding the account password
pub const ENV_PASSWORD: &str = "DIFY_PASSWORD";

/// Account credentials and the API base they apply to
///
/// Values are taken verbatim: no trimming, no trailing-slash normalization, and
/// missing variables become empty strings. A bad value surfaces later as a
/// login failure from the remote service.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL of the console API (e.g., "https://dify.example.com/console/api")
    pub api_base: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_base", &self.api_base)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Retry behavior for outbound HTTP requests
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of additional attempts after the first (default: 2)
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Retry policy applied by the session
    pub retry: RetryConfig,

    /// Per-request timeout (None = reqwest default, which is no timeout)
    pub timeout: Option<Duration>,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for an export run
///
/// Built once at startup and lent to every component that needs it.
#[derive(Clone, Debug)]
pub struct Config {
    /// Console API credentials
    pub credentials: Credentials,

    /// Output archive path (default: "apps.zip")
    pub output_path: PathBuf,

    /// Ask the API to include secrets in exported documents (default: true)
    pub include_secret: bool,

    /// Number of applications requested per listing page (default: 100)
    pub page_size: u32,

    /// HTTP transport settings
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            output_path: default_output_path(),
            include_secret: true,
            page_size: default_page_size(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Build a configuration from the process environment
    ///
    /// Reads `DIFY_CONSOLE_API`, `DIFY_EMAIL` and `DIFY_PASSWORD`. Every other
    /// setting keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration reading variables through `lookup`
    ///
    /// Missing keys become empty strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            api_base: lookup(ENV_CONSOLE_API).unwrap_or_default(),
            email: lookup(ENV_EMAIL).unwrap_or_default(),
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
        };

        Self {
            credentials,
            ..Default::default()
        }
    }

    /// Validate the non-credential settings
    ///
    /// Credentials are deliberately not checked here; the remote service is the
    /// authority on whether they work.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config {
                message: "page size must be at least 1".to_string(),
                key: Some("page_size".to_string()),
            });
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "output path cannot be empty".to_string(),
                key: Some("output_path".to_string()),
            });
        }

        Ok(())
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("apps.zip")
}

fn default_page_size() -> u32 {
    100
}

fn default_user_agent() -> String {
    format!("dify-export/{}", env!("CARGO_PKG_VERSION"))
}
