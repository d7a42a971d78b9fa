//! Session state around the stream consumer.

use crate::consumer::{GenerationClient, http_client};
use crate::export::{ExportFormat, export_output};
use crate::run::GenerationRun;
use crate::store::StoreClient;
use scrivener_core::{GenerationRecord, GenerationRequest, NewGeneration, OutputStats, WritingMode};
use scrivener_error::{ScrivenerResult, TransportError, TransportErrorKind, ValidationError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Message shown when generate is asked for with nothing to send.
const EMPTY_PROMPT: &str = "Please enter a prompt";

#[derive(Debug, Default)]
struct Session {
    mode: WritingMode,
    run: Option<GenerationRun>,
    session_tokens: u64,
    saved_id: Option<Uuid>,
    is_bookmarked: bool,
}

/// Clears the busy flag when a generation ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user's writing session.
///
/// Holds the selected mode, the latest run, the running token total, and the
/// saved/bookmarked state of the current output. Only one generation may be
/// in flight at a time.
#[derive(Debug)]
pub struct Workbench {
    generator: GenerationClient,
    store: StoreClient,
    busy: AtomicBool,
    session: Mutex<Session>,
}

impl Workbench {
    /// Creates a workbench over existing clients.
    pub fn new(generator: GenerationClient, store: StoreClient) -> Self {
        Self {
            generator,
            store,
            busy: AtomicBool::new(false),
            session: Mutex::new(Session::default()),
        }
    }

    /// Creates a workbench talking to the server at `base_url`.
    pub fn connect(base_url: &str) -> Result<Self, TransportError> {
        let http = http_client()?;
        Ok(Self::new(
            GenerationClient::with_http(http.clone(), base_url),
            StoreClient::with_http(http, base_url),
        ))
    }

    /// Record client used by this workbench.
    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    /// Select the writing mode for subsequent generations.
    pub async fn set_mode(&self, mode: WritingMode) {
        self.session.lock().await.mode = mode;
    }

    /// Currently selected writing mode.
    pub async fn mode(&self) -> WritingMode {
        self.session.lock().await.mode
    }

    /// Whether a generation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Run a generation for `prompt` in the selected mode.
    ///
    /// `on_fragment` receives each piece of text as it arrives. The returned
    /// run is `Completed` or `Failed`; failures after the request was sent are
    /// reported through the run, not as an error.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if `prompt` is empty or whitespace
    /// - `TransportErrorKind::Busy` if a generation is already running
    #[instrument(skip(self, prompt, on_fragment), fields(prompt_len = prompt.len()))]
    pub async fn generate<F>(&self, prompt: &str, on_fragment: F) -> ScrivenerResult<GenerationRun>
    where
        F: FnMut(&str) + Send,
    {
        if prompt.trim().is_empty() {
            return Err(ValidationError::new(EMPTY_PROMPT).into());
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Generation already in progress");
            return Err(TransportError::new(TransportErrorKind::Busy).into());
        }
        let _busy = BusyGuard(&self.busy);

        let request = {
            let mut session = self.session.lock().await;
            session.run = None;
            session.saved_id = None;
            session.is_bookmarked = false;
            GenerationRequest::new(session.mode.identifier(), prompt)
        };

        let run = self.generator.stream_generation(request, on_fragment).await;

        let mut session = self.session.lock().await;
        if run.is_completed() {
            session.session_tokens += u64::from(run.tokens_used());
            info!(
                tokens = run.tokens_used(),
                session_tokens = session.session_tokens,
                "Generation added to session"
            );
        }
        session.run = Some(run.clone());
        Ok(run)
    }

    /// Rerun the last prompt through the same path as [`Workbench::generate`].
    ///
    /// # Errors
    ///
    /// Fails like [`Workbench::generate`], or with a `ValidationError` when
    /// nothing has been generated yet.
    pub async fn regenerate<F>(&self, on_fragment: F) -> ScrivenerResult<GenerationRun>
    where
        F: FnMut(&str) + Send,
    {
        let prompt = {
            let session = self.session.lock().await;
            session
                .run
                .as_ref()
                .map(|run| run.request().prompt().clone())
        };
        match prompt {
            Some(prompt) => self.generate(&prompt, on_fragment).await,
            None => Err(ValidationError::new(EMPTY_PROMPT).into()),
        }
    }

    /// Persist the current output.
    ///
    /// Returns `None` when there is no output to save.
    #[instrument(skip(self))]
    pub async fn save(&self) -> ScrivenerResult<Option<GenerationRecord>> {
        let new = {
            let session = self.session.lock().await;
            match session.run.as_ref() {
                Some(run) if !run.output().is_empty() => NewGeneration::estimated(
                    run.request().writing_mode().identifier(),
                    run.request().prompt().as_str(),
                    run.output().as_str(),
                ),
                _ => {
                    debug!("Nothing to save");
                    return Ok(None);
                }
            }
        };

        let record = self.store.create(&new).await?;
        let mut session = self.session.lock().await;
        session.saved_id = Some(*record.id());
        session.is_bookmarked = record.is_bookmarked();
        info!(id = %record.id(), "Output saved");
        Ok(Some(record))
    }

    /// Flip the bookmark on the current output.
    ///
    /// Unsaved output is saved instead. The local flag changes only after the
    /// server confirms. Returns the resulting flag.
    #[instrument(skip(self))]
    pub async fn toggle_bookmark(&self) -> ScrivenerResult<bool> {
        let (saved_id, is_bookmarked) = {
            let session = self.session.lock().await;
            (session.saved_id, session.is_bookmarked)
        };

        let Some(id) = saved_id else {
            self.save().await?;
            return Ok(self.is_bookmarked().await);
        };

        let record = self.store.set_bookmark(id, !is_bookmarked).await?;
        let mut session = self.session.lock().await;
        session.is_bookmarked = record.is_bookmarked();
        info!(%id, is_bookmarked = session.is_bookmarked, "Bookmark toggled");
        Ok(session.is_bookmarked)
    }

    /// Latest run, if any.
    pub async fn current_run(&self) -> Option<GenerationRun> {
        self.session.lock().await.run.clone()
    }

    /// Text of the latest run, or empty.
    pub async fn output(&self) -> String {
        self.session
            .lock()
            .await
            .run
            .as_ref()
            .map(|run| run.output().clone())
            .unwrap_or_default()
    }

    /// Character, word and token counts of the current output.
    pub async fn stats(&self) -> OutputStats {
        OutputStats::of(&self.output().await)
    }

    /// Tokens estimated across all completed generations this session.
    pub async fn session_tokens(&self) -> u64 {
        self.session.lock().await.session_tokens
    }

    /// Id of the saved record for the current output.
    pub async fn saved_id(&self) -> Option<Uuid> {
        self.session.lock().await.saved_id
    }

    /// Bookmark flag of the current output.
    pub async fn is_bookmarked(&self) -> bool {
        self.session.lock().await.is_bookmarked
    }

    /// Write the current output into `dir`.
    ///
    /// Returns the written path, or `None` when there is no output.
    pub async fn export(&self, format: ExportFormat, dir: &Path) -> ScrivenerResult<Option<PathBuf>> {
        let output = self.output().await;
        Ok(export_output(&output, format, dir).await?)
    }
}
