use std::time::Duration;

/// Production API root.
pub const DEFAULT_API_ROOT: &str = "https://escuelatorreblanca.cl/api";

/// Path segment of the school records collection.
const RECORDS_PATH: &str = "colegio";

/// Path segment of the events collection.
const EVENTS_PATH: &str = "eventos";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash, e.g. `https://host/api`.
    pub api_root: String,
    /// Whole-request timeout. `None` leaves timeouts to the network layer.
    pub request_timeout: Option<Duration>,
}

/// Errors raised while loading configuration or building the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ClientConfig {
    /// Create a configuration for the given API root.
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: normalize_root(api_root.into()),
            request_timeout: None,
        }
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `TORREBLANCA_API_ROOT` | `https://escuelatorreblanca.cl/api`  |
    /// | `REQUEST_TIMEOUT_SECS` | unset (no client-side timeout)       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_root = lookup("TORREBLANCA_API_ROOT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_ROOT.to_string());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_root: normalize_root(api_root),
            request_timeout,
        })
    }

    /// Base URL of the records collection, with trailing slash.
    pub fn records_url(&self) -> String {
        format!("{}/{RECORDS_PATH}/", self.api_root)
    }

    /// URL of the events collection, with trailing slash.
    pub fn events_url(&self) -> String {
        format!("{}/{EVENTS_PATH}/", self.api_root)
    }

    /// Build a [`reqwest::Client`] honouring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ROOT)
    }
}

fn normalize_root(root: String) -> String {
    root.trim().trim_end_matches('/').to_string()
}
