use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const BASE_URL_VAR: &str = "TMDB_API_BASE_URL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),
    #[error("invalid base url {value:?}: {message}")]
    InvalidBaseUrl { value: String, message: String },
}

/// Connection details for the catalog service, fixed at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub api_token: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, api_token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: base_url.to_string(),
                message: "not a hierarchical url".to_string(),
            });
        }
        Ok(Self {
            base_url,
            api_token: api_token.into(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(API_KEY_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url, token)
    }

    /// Joins `path` onto the base url, keeping any base path such as `/3`.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url
    }
}
