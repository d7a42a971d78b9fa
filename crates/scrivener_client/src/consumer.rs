//! Incremental consumer for `POST /api/generate`.

use crate::decoder::Utf8StreamDecoder;
use crate::run::GenerationRun;
use futures_util::StreamExt;
use reqwest::Client;
use scrivener_core::GenerationRequest;
use scrivener_error::{TransportError, TransportErrorKind};
use tracing::{debug, error, info, instrument, warn};

/// Build the HTTP client shared by the generation and store clients.
pub(crate) fn http_client() -> Result<Client, TransportError> {
    Client::builder().build().map_err(|e| {
        error!(error = ?e, "Failed to build HTTP client");
        TransportError::new(TransportErrorKind::Request(e.to_string()))
    })
}

/// Streams generations from a Scrivener server.
///
/// # Example
///
/// ```no_run
/// use scrivener_client::GenerationClient;
/// use scrivener_core::GenerationRequest;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GenerationClient::new("http://localhost:3000")?;
/// let run = client
///     .stream_generation(GenerationRequest::new("email", "Say hi"), |text| print!("{}", text))
///     .await;
/// println!("\n{}", run.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: String,
}

impl GenerationClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self::with_http(http_client()?, base_url))
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one generation, calling `on_fragment` with each decoded piece of
    /// text as soon as it arrives.
    ///
    /// Never returns an error: failures end the run in
    /// [`RunStatus::Failed`](crate::RunStatus::Failed) with the received
    /// prefix kept in its output.
    #[instrument(skip(self, request, on_fragment), fields(mode = %request.mode()))]
    pub async fn stream_generation<F>(
        &self,
        request: GenerationRequest,
        mut on_fragment: F,
    ) -> GenerationRun
    where
        F: FnMut(&str),
    {
        let mut run = GenerationRun::new(request);

        let response = match self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(run.request())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Generate request failed");
                run.fail(TransportError::new(TransportErrorKind::Request(
                    e.to_string(),
                )));
                return run;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Generate request rejected");
            run.fail(TransportError::new(TransportErrorKind::Status {
                status_code: status.as_u16(),
                body,
            }));
            return run;
        }

        let mut body = response.bytes_stream();
        let mut decoder = Utf8StreamDecoder::default();
        let mut reads = 0usize;

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    reads += 1;
                    let text = decoder.push(&bytes);
                    debug!(read = reads, bytes = bytes.len(), "Chunk received");
                    if !text.is_empty() {
                        run.append(&text);
                        on_fragment(&text);
                    }
                }
                Err(e) => {
                    warn!(error = %e, received = run.output().len(), "Stream closed abnormally");
                    run.fail(TransportError::new(TransportErrorKind::AbnormalClose(
                        e.to_string(),
                    )));
                    return run;
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            run.append(&tail);
            on_fragment(&tail);
        }
        run.complete();
        info!(reads, chars = run.output().chars().count(), "Generation completed");
        run
    }
}
