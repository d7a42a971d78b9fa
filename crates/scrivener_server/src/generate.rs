//! `POST /api/generate`: stream generated text to the caller.

use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use scrivener_core::GenerationRequest;
use scrivener_error::{ProviderError, ProviderErrorKind, ValidationError};
use scrivener_interface::FragmentStream;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const MISSING_FIELDS: &str = "Missing required fields";
const GENERATION_FAILED: &str = "Error generating content";

/// Extract a request with a non-empty `prompt`.
///
/// A missing or non-string `mode` falls back to the default mode.
fn parse_request(body: &Value) -> Result<GenerationRequest, ValidationError> {
    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .ok_or_else(|| ValidationError::new(MISSING_FIELDS))?;
    let mode = body.get("mode").and_then(Value::as_str).unwrap_or_default();
    Ok(GenerationRequest::new(mode, prompt))
}

/// Stream handler.
///
/// Validation and provider setup happen before any byte is sent, so those
/// failures still get a status code. After the 200 header, a provider failure
/// aborts the chunked body instead of ending it cleanly.
#[instrument(skip_all)]
pub async fn generate(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Request body is not JSON");
            return (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED).into_response();
        }
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected generation request");
            return (StatusCode::BAD_REQUEST, MISSING_FIELDS).into_response();
        }
    };

    let mode = request.writing_mode();
    info!(
        provider = state.generator.provider_name(),
        mode = mode.identifier(),
        prompt_len = request.prompt().len(),
        "Starting generation"
    );

    let fragments = match state
        .generator
        .stream(mode.system_instruction(), request.prompt())
        .await
    {
        Ok(fragments) => fragments,
        Err(e) => {
            error!(error = %e, "Failed to open generation stream");
            return (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED).into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(body_stream(fragments, state.fragment_timeout)),
    )
        .into_response()
}

/// Pull the next fragment, failing it if the idle timeout elapses first.
async fn next_fragment(
    fragments: &mut FragmentStream,
    timeout: Option<Duration>,
) -> Option<Result<scrivener_core::StreamFragment, ProviderError>> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, fragments.next()).await {
            Ok(next) => next,
            Err(_) => Some(Err(ProviderError::new(ProviderErrorKind::IdleTimeout(
                limit.as_secs(),
            )))),
        },
        None => fragments.next().await,
    }
}

/// Encode fragments as body chunks, ending in an error on provider failure.
///
/// Dropping the returned stream (client disconnect) drops the provider stream.
fn body_stream(
    mut fragments: FragmentStream,
    timeout: Option<Duration>,
) -> impl futures_util::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    async_stream::stream! {
        let mut count = 0usize;
        loop {
            match next_fragment(&mut fragments, timeout).await {
                Some(Ok(fragment)) => {
                    // Zero-length chunks carry nothing
                    if fragment.is_empty() {
                        continue;
                    }
                    count += 1;
                    debug!(fragment = count, len = fragment.as_str().len(), "Writing fragment");
                    yield Ok(Bytes::from(fragment.into_string()));
                }
                Some(Err(e)) => {
                    error!(error = %e, fragments = count, "Generation failed mid-stream");
                    // Let hyper flush the fragments already yielded before the abort
                    tokio::task::yield_now().await;
                    yield Err(std::io::Error::other(e.to_string()));
                    break;
                }
                None => {
                    info!(fragments = count, "Generation completed");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request_requires_prompt() {
        assert!(parse_request(&json!({ "mode": "email" })).is_err());
        assert!(parse_request(&json!({ "prompt": "" })).is_err());
        assert!(parse_request(&json!({ "prompt": 42 })).is_err());
    }

    #[test]
    fn test_parse_request_defaults_mode() {
        let request = parse_request(&json!({ "prompt": "hi" })).unwrap();
        assert_eq!(request.mode(), "");
        assert_eq!(
            request.system_instruction(),
            "Write a professional email based on the following requirements:"
        );
    }
}
