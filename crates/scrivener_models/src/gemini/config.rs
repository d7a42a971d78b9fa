//! Configuration for the Gemini provider.

use derive_getters::Getters;
use scrivener_error::{ProviderError, ProviderErrorKind, ProviderResult};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini REST API.
#[derive(Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key
    api_key: String,
    /// Model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// REST endpoint root (without trailing slash)
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    /// Returns a builder for constructing a config.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `GOOGLE_GENERATIVE_AI_API_KEY`, falling back to `GEMINI_API_KEY` (required)
    /// - `GEMINI_MODEL` (default: "gemini-2.0-flash-exp")
    /// - `GEMINI_BASE_URL` (default: the public v1beta endpoint)
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("GOOGLE_GENERATIVE_AI_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| ProviderError::new(ProviderErrorKind::MissingApiKey))?;
        if api_key.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::MissingApiKey));
        }

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Model resource name as the API addresses it (`models/<model>`).
    ///
    /// ```
    /// use scrivener_models::GeminiConfig;
    ///
    /// let config = GeminiConfig::builder().api_key("key").build().unwrap();
    /// assert_eq!(config.model_resource(), "models/gemini-2.0-flash-exp");
    /// ```
    pub fn model_resource(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }

    /// Base URL with exactly one trailing slash, so relative model paths
    /// join under it rather than replacing its last segment.
    pub(crate) fn base_url_with_slash(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}
