use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

/// Environment variable supplying the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the model to use. Optional.
pub const MODEL_ENV: &str = "OPENAI_MODEL";
/// Environment variable overriding the base URL. Optional.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// The error returned when a configuration cannot be constructed from
/// the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    missing: &'static str,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} not found in environment variables, please set it before \
             starting",
            self.missing
        )
    }
}

impl StdError for ConfigError {}

/// Builder for [`OpenAIConfig`].
#[derive(Clone, PartialEq)]
pub struct OpenAIConfigBuilder {
    api_key: String,
    model: Option<String>,
    base_url: Option<String>,
    temperature: Option<f32>,
}

impl OpenAIConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            base_url: None,
            temperature: None,
        }
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> OpenAIConfig {
        OpenAIConfig {
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}

impl Debug for OpenAIConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfigBuilder")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Configuration for the OpenAI-compatible provider.
#[derive(Clone, PartialEq)]
pub struct OpenAIConfig {
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) temperature: f32,
}

impl OpenAIConfig {
    /// Builds a configuration from the process environment.
    ///
    /// [`API_KEY_ENV`] is required; its absence fails here, before any
    /// network call is made. [`MODEL_ENV`] and [`BASE_URL_ENV`] override
    /// the defaults when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(api_key) = env::var(API_KEY_ENV) else {
            return Err(ConfigError {
                missing: API_KEY_ENV,
            });
        };

        let mut builder = OpenAIConfigBuilder::with_api_key(api_key);
        if let Ok(model) = env::var(MODEL_ENV) {
            builder = builder.with_model(model);
        }
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            builder = builder.with_base_url(base_url);
        }
        Ok(builder.build())
    }
}

impl Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}
