//! Generation record store trait.

use async_trait::async_trait;
use scrivener_core::{GenerationRecord, NewGeneration};
use scrivener_error::DatabaseResult;
use uuid::Uuid;

/// Persistence for generation records (one `generations` table).
///
/// Failures are never retried; callers report them once.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a record. The store assigns `id`, `created_at`, and
    /// `is_bookmarked = false`.
    async fn create(&self, new: NewGeneration) -> DatabaseResult<GenerationRecord>;

    /// List records, newest first, optionally only bookmarked ones.
    async fn list(&self, bookmarked_only: bool) -> DatabaseResult<Vec<GenerationRecord>>;

    /// Set the bookmark flag on a record and return the updated row.
    async fn set_bookmark(&self, id: Uuid, is_bookmarked: bool)
    -> DatabaseResult<GenerationRecord>;

    /// Delete a record.
    async fn delete(&self, id: Uuid) -> DatabaseResult<()>;
}
