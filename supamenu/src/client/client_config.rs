use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "SUPAMENU_API_BASE_URL";

/// ```rust,ignore
/// // Point the console at a backend
/// let config = ApiClientConfig::new("https://api.supamenu.rw/api/v1".to_string());
///
/// // Validate the configuration
/// if let Err(e) = config.validate() {
///     println!("Configuration error: {}", e);
///     return;
/// }
///
/// // Build full URLs from API paths
/// assert_eq!(config.endpoint("/restaurants"), "https://api.supamenu.rw/api/v1/restaurants");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    pub base_url: String,
}

impl ApiClientConfig {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Reads [`BASE_URL_ENV`], falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim().to_string()),
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        Ok(())
    }

    /// Joins the base URL and an API path with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
        }
    }
}
