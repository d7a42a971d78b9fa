//! Generation stream producer trait.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use scrivener_core::StreamFragment;
use scrivener_error::ProviderResult;

/// Ordered, finite, non-restartable sequence of generated fragments.
///
/// The stream ends with `None` on success. A provider failure after the
/// stream was opened is yielded as an `Err` item, after which the stream
/// yields nothing further. Dropping the stream releases the upstream
/// connection.
pub type FragmentStream = BoxStream<'static, ProviderResult<StreamFragment>>;

/// A model provider that streams generated text.
///
/// Implementations open exactly one provider call per invocation and never
/// retry: a failed call fails the whole generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Open a streaming generation.
    ///
    /// Errors returned here happen before any fragment was produced
    /// (connection refused, authentication rejected, bad status). Failures
    /// after that surface as `Err` items inside the returned stream.
    async fn stream(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> ProviderResult<FragmentStream>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}
