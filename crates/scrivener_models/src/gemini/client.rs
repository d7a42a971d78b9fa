//! Streaming client for Gemini, built on `gemini-rust`.

use super::config::GeminiConfig;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use gemini_rust::Gemini;
use scrivener_core::{StreamFragment, TEMPERATURE};
use scrivener_error::{ProviderError, ProviderErrorKind, ProviderResult};
use scrivener_interface::{FragmentStream, TextGenerator};
use tracing::{debug, error, instrument, warn};

/// Gemini text generator.
///
/// Each call to [`TextGenerator::stream`] opens one streaming generation.
/// There is no retry and no resume: a generation that fails mid-stream is
/// reported, not restarted.
#[derive(Clone)]
pub struct GeminiClient {
    client: Gemini,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the underlying
    /// client cannot be constructed.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: GeminiConfig) -> ProviderResult<Self> {
        let base_url = reqwest::Url::parse(&config.base_url_with_slash()).map_err(|e| {
            error!(error = %e, base_url = %config.base_url(), "Invalid Gemini base URL");
            ProviderError::new(ProviderErrorKind::Connection(format!(
                "invalid base URL {}: {}",
                config.base_url(),
                e
            )))
        })?;

        let client = Gemini::with_model_and_base_url(
            config.api_key().clone(),
            config.model_resource(),
            base_url,
        )
        .map_err(|e| {
            error!(error = %e, "Failed to create Gemini client");
            ProviderError::new(ProviderErrorKind::Connection(e.to_string()))
        })?;

        debug!(base_url = %config.base_url(), "Created Gemini client");
        Ok(Self { client, config })
    }

    /// Creates a client from environment variables (see [`GeminiConfig::from_env`]).
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Returns the configured model name.
    pub fn model_name(&self) -> &str {
        self.config.model()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, system_instruction, prompt), fields(model = %self.config.model(), prompt_len = prompt.len()))]
    async fn stream(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> ProviderResult<FragmentStream> {
        debug!("Opening Gemini stream");
        let responses = self
            .client
            .generate_content()
            .with_system_prompt(system_instruction)
            .with_user_message(prompt)
            .with_temperature(TEMPERATURE)
            .execute_stream()
            .await
            .map_err(|e| {
                let kind = open_error_kind(&e.to_string());
                error!(error = %kind, "Gemini stream failed to open");
                ProviderError::new(kind)
            })?;

        debug!("Gemini stream opened");
        let mut responses = Box::pin(responses);

        let fragments = async_stream::stream! {
            let mut count = 0usize;

            loop {
                match responses.try_next().await {
                    Ok(Some(response)) => {
                        let text = response.text();
                        if text.is_empty() {
                            continue;
                        }
                        count += 1;
                        debug!(fragment = count, len = text.len(), "Fragment received");
                        yield Ok(StreamFragment::new(text));
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, fragments = count, "Gemini stream interrupted");
                        yield Err(ProviderError::new(ProviderErrorKind::StreamInterrupted(e.to_string())));
                        return;
                    }
                }
            }

            debug!(fragments = count, "Gemini stream finished");
        };

        Ok(Box::pin(fragments))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Classify an error raised while opening a stream.
///
/// `gemini-rust` reports a rejected request as
/// `bad response from server; code <status>; ...`. Anything without a status
/// never reached the API and counts as a connection failure.
fn open_error_kind(message: &str) -> ProviderErrorKind {
    match status_code(message) {
        Some(status_code) => ProviderErrorKind::HttpError {
            status_code,
            message: message.to_string(),
        },
        None => ProviderErrorKind::Connection(message.to_string()),
    }
}

fn status_code(message: &str) -> Option<u16> {
    let (_, rest) = message.split_once("code ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits
        .parse::<u16>()
        .ok()
        .filter(|code| (400..600).contains(code))
}
