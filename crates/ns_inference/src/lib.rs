use std::fmt;
use std::time::Duration;

use ns_core::{Error, Result};

pub mod highlight;
pub mod models;
pub mod summarizer;

pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
pub const ENDPOINT_ENV: &str = "NS_INFERENCE_URL";
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Hosted inference endpoint
    #[default]
    #[value(name = "huggingface")]
    HuggingFace,
    /// Offline, deterministic word truncation
    Dummy,
}

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub backend: Backend,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("backend", &self.backend)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            backend: Backend::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self {
            api_key,
            endpoint,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fails fast on settings that would break every request.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::HuggingFace {
            if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                return Err(Error::Configuration(format!(
                    "API key is missing, set {} or pass --api-key",
                    API_KEY_ENV
                )));
            }
            if self.endpoint.trim().is_empty() {
                return Err(Error::Configuration("inference endpoint is empty".to_string()));
            }
        }
        if self.timeout.is_zero() {
            return Err(Error::Configuration("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

pub mod prelude {
    pub use super::highlight::{render_highlight_html, select_highlight};
    pub use super::models::create_model;
    pub use super::summarizer::SummarizationClient;
    pub use super::{Backend, Config};
    pub use ns_core::{Error, Result, SummarizationModel, SummaryRequest};
}

pub use models::create_model;
pub use summarizer::SummarizationClient;
