//! In-memory generation store.
//!
//! Used when no `DATABASE_URL` is configured and in tests. All data is lost
//! when the store is dropped.

use async_trait::async_trait;
use scrivener_core::{GenerationRecord, NewGeneration};
use scrivener_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use scrivener_interface::GenerationStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Generation store holding records in a `Vec` behind an `RwLock`.
///
/// # Example
///
/// ```
/// use scrivener_core::NewGeneration;
/// use scrivener_database::InMemoryGenerationStore;
/// use scrivener_interface::GenerationStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryGenerationStore::new();
/// let record = store
///     .create(NewGeneration::estimated("email", "hi", "Hello!"))
///     .await?;
/// assert_eq!(store.list(false).await?[0].id(), record.id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryGenerationStore {
    /// Records in insertion order
    records: Arc<RwLock<Vec<GenerationRecord>>>,
    /// When set, every operation fails with a connection error
    unavailable: Arc<AtomicBool>,
}

impl InMemoryGenerationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Get the number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    #[track_caller]
    fn check_available(&self) -> DatabaseResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::new(DatabaseErrorKind::Connection(
                "store unavailable".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl GenerationStore for InMemoryGenerationStore {
    async fn create(&self, new: NewGeneration) -> DatabaseResult<GenerationRecord> {
        self.check_available()?;
        let record = new.into_record();
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self, bookmarked_only: bool) -> DatabaseResult<Vec<GenerationRecord>> {
        self.check_available()?;
        let records = self.records.read().await;

        // Reverse first so records sharing a timestamp keep newest-first order
        let mut listed: Vec<GenerationRecord> = records
            .iter()
            .rev()
            .filter(|r| !bookmarked_only || r.is_bookmarked())
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(listed)
    }

    async fn set_bookmark(
        &self,
        id: Uuid,
        is_bookmarked: bool,
    ) -> DatabaseResult<GenerationRecord> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| *r.id() == id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        record.set_bookmarked(is_bookmarked);
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        self.check_available()?;
        self.records.write().await.retain(|r| *r.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = InMemoryGenerationStore::new();
        store.set_unavailable(true);

        let err = store
            .create(NewGeneration::estimated("email", "p", "o"))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::Connection(_)));
        assert!(store.list(false).await.is_err());
        assert!(store.delete(Uuid::new_v4()).await.is_err());

        store.set_unavailable(false);
        assert!(store.list(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bookmark_unknown_id_is_not_found() {
        let store = InMemoryGenerationStore::new();
        let err = store.set_bookmark(Uuid::new_v4(), true).await.unwrap_err();
        assert_eq!(err.kind, DatabaseErrorKind::NotFound);
    }
}
