//! A generator that replays a fixed script of fragments.

use async_trait::async_trait;
use scrivener_core::StreamFragment;
use scrivener_error::{ProviderError, ProviderErrorKind, ProviderResult};
use scrivener_interface::{FragmentStream, TextGenerator};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// How a scripted run fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Fail when the stream is opened, before any fragment.
    OnOpen(ProviderErrorKind),
    /// Fail after emitting this many fragments.
    AfterFragments(usize, ProviderErrorKind),
    /// Emit every fragment, then never finish.
    Stall,
}

/// Deterministic [`TextGenerator`] for tests and offline runs.
///
/// Records how many streams were opened and whether the last opened stream
/// has been dropped, so callers can observe provider calls and release.
///
/// # Examples
///
/// ```
/// use futures_util::StreamExt;
/// use scrivener_interface::TextGenerator;
/// use scrivener_models::ScriptedGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = ScriptedGenerator::new(["Hel", "lo, ", "world!"]);
/// let mut stream = generator.stream("system", "prompt").await?;
///
/// let mut text = String::new();
/// while let Some(fragment) = stream.next().await {
///     text.push_str(fragment?.as_str());
/// }
/// assert_eq!(text, "Hello, world!");
/// assert_eq!(generator.calls(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    fragments: Vec<String>,
    failure: Option<ScriptedFailure>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    last_request: Arc<std::sync::Mutex<Option<(String, String)>>>,
}

impl ScriptedGenerator {
    /// Creates a generator that emits `fragments` in order, then ends.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            failure: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicBool::new(false)),
            last_request: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Add a failure to the script.
    pub fn with_failure(mut self, failure: ScriptedFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Fail after `count` fragments with a stream interruption.
    pub fn fail_after(self, count: usize, message: impl Into<String>) -> Self {
        self.with_failure(ScriptedFailure::AfterFragments(
            count,
            ProviderErrorKind::StreamInterrupted(message.into()),
        ))
    }

    /// Sleep before each fragment.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of streams opened so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Whether the most recently opened stream has been dropped.
    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// The `(system_instruction, prompt)` pair of the last call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Flags the generator as released when the stream holding it is dropped.
struct ReleaseGuard(Arc<AtomicBool>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        debug!("Scripted stream released");
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn stream(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> ProviderResult<FragmentStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((system_instruction.to_string(), prompt.to_string()));
        }

        if let Some(ScriptedFailure::OnOpen(kind)) = &self.failure {
            return Err(ProviderError::new(kind.clone()));
        }

        self.released.store(false, Ordering::SeqCst);
        let guard = ReleaseGuard(self.released.clone());
        let fragments = self.fragments.clone();
        let failure = self.failure.clone();
        let delay = self.delay;

        let stream = async_stream::stream! {
            let _guard = guard;
            for (index, text) in fragments.into_iter().enumerate() {
                if let Some(ScriptedFailure::AfterFragments(count, kind)) = &failure {
                    if index == *count {
                        yield Err(ProviderError::new(kind.clone()));
                        return;
                    }
                }
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(StreamFragment::new(text));
            }

            match failure {
                Some(ScriptedFailure::AfterFragments(_, kind)) => {
                    yield Err(ProviderError::new(kind));
                }
                Some(ScriptedFailure::Stall) => {
                    std::future::pending::<()>().await;
                }
                _ => {}
            }
        };

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
