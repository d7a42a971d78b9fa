//! Client for `/api/generations`.

use crate::consumer::http_client;
use reqwest::{Client, Response};
use scrivener_core::{BookmarkUpdate, GenerationRecord, NewGeneration};
use scrivener_error::{TransportError, TransportErrorKind};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Reads and writes generation records on a Scrivener server.
///
/// A failed call changes nothing locally; callers keep their prior state.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    base_url: String,
}

impl StoreClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self::with_http(http_client()?, base_url))
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/generations{}", self.base_url, path)
    }

    /// Persist a generation.
    #[instrument(skip(self, new), fields(mode = %new.mode))]
    pub async fn create(&self, new: &NewGeneration) -> Result<GenerationRecord, TransportError> {
        let response = self.http.post(self.url("")).json(new).send().await;
        let record: GenerationRecord = decode(response).await?;
        debug!(id = %record.id(), "Generation saved");
        Ok(record)
    }

    /// List records, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, bookmarked_only: bool) -> Result<Vec<GenerationRecord>, TransportError> {
        let mut request = self.http.get(self.url(""));
        if bookmarked_only {
            request = request.query(&[("bookmarked", "true")]);
        }
        decode(request.send().await).await
    }

    /// Look up one record by id.
    #[instrument(skip(self))]
    pub async fn find(&self, id: Uuid) -> Result<Option<GenerationRecord>, TransportError> {
        let records = self.list(false).await?;
        Ok(records.into_iter().find(|record| *record.id() == id))
    }

    /// Set or clear a bookmark, returning the updated record.
    #[instrument(skip(self))]
    pub async fn set_bookmark(
        &self,
        id: Uuid,
        is_bookmarked: bool,
    ) -> Result<GenerationRecord, TransportError> {
        let response = self
            .http
            .patch(self.url(&format!("/{}", id)))
            .json(&BookmarkUpdate { is_bookmarked })
            .send()
            .await;
        decode(response).await
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), TransportError> {
        let response = self.http.delete(self.url(&format!("/{}", id))).send().await;
        let _: serde_json::Value = decode(response).await?;
        Ok(())
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(
    response: Result<Response, reqwest::Error>,
) -> Result<T, TransportError> {
    let response = response.map_err(|e| {
        error!(error = %e, "Store request failed");
        TransportError::new(TransportErrorKind::Request(e.to_string()))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Store request rejected");
        return Err(TransportError::new(TransportErrorKind::Status {
            status_code: status.as_u16(),
            body,
        }));
    }

    response.json::<T>().await.map_err(|e| {
        error!(error = %e, "Failed to decode store response");
        TransportError::new(TransportErrorKind::Decode(e.to_string()))
    })
}
