//! Persisted generation records and their write payloads.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generation persisted in the `generations` table.
///
/// # Examples
///
/// ```
/// use scrivener_core::GenerationRecord;
///
/// let record = GenerationRecord::builder()
///     .mode("email")
///     .prompt("p")
///     .output("o")
///     .tokens_used(1)
///     .build()
///     .unwrap();
///
/// assert!(!record.is_bookmarked());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerationRecord {
    /// Record identifier
    #[builder(default = "Uuid::new_v4()")]
    id: Uuid,
    /// Creation timestamp
    #[builder(default = "Utc::now()")]
    created_at: DateTime<Utc>,
    /// Writing mode identifier
    mode: String,
    /// User prompt
    prompt: String,
    /// Generated output
    output: String,
    /// Heuristic token estimate of prompt + output
    tokens_used: i32,
    /// Bookmark flag
    #[builder(default)]
    #[getter(skip)]
    is_bookmarked: bool,
}

impl GenerationRecord {
    /// Returns a builder for constructing a record.
    pub fn builder() -> GenerationRecordBuilder {
        GenerationRecordBuilder::default()
    }

    /// Assemble a record from store-assigned fields and a create payload.
    pub fn from_parts(
        id: Uuid,
        created_at: DateTime<Utc>,
        new: NewGeneration,
        is_bookmarked: bool,
    ) -> Self {
        Self {
            id,
            created_at,
            mode: new.mode,
            prompt: new.prompt,
            output: new.output,
            tokens_used: new.tokens_used,
            is_bookmarked,
        }
    }

    /// Whether the record is bookmarked.
    pub fn is_bookmarked(&self) -> bool {
        self.is_bookmarked
    }

    /// Set the bookmark flag.
    pub fn set_bookmarked(&mut self, bookmarked: bool) {
        self.is_bookmarked = bookmarked;
    }
}

/// Body of a create request: `{ mode, prompt, output, tokens_used }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGeneration {
    /// Writing mode identifier
    pub mode: String,
    /// User prompt
    pub prompt: String,
    /// Generated output
    pub output: String,
    /// Heuristic token estimate of prompt + output
    pub tokens_used: i32,
}

impl NewGeneration {
    /// Build a create payload, estimating `tokens_used` from prompt + output.
    ///
    /// ```
    /// use scrivener_core::NewGeneration;
    ///
    /// let new = NewGeneration::estimated("email", "abcd", "efgh!");
    /// assert_eq!(new.tokens_used, 3);
    /// ```
    pub fn estimated(
        mode: impl Into<String>,
        prompt: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        let prompt = prompt.into();
        let output = output.into();
        let tokens_used = crate::estimate_tokens(&format!("{}{}", prompt, output)) as i32;
        Self {
            mode: mode.into(),
            prompt,
            output,
            tokens_used,
        }
    }

    /// Materialize a record as a store would on insert.
    pub fn into_record(self) -> GenerationRecord {
        GenerationRecord::from_parts(Uuid::new_v4(), Utc::now(), self, false)
    }
}

/// Body of a bookmark update: `{ is_bookmarked }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    /// New bookmark flag
    pub is_bookmarked: bool,
}
