//! PostgreSQL-backed generation store.

use crate::connection::{DbPool, create_pool, run_migrations};
use crate::models::{GenerationRow, NewGenerationRow};
use crate::schema::generations;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use scrivener_core::{GenerationRecord, NewGeneration};
use scrivener_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use scrivener_interface::GenerationStore;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Generation store over a diesel r2d2 pool.
///
/// Diesel is synchronous, so every operation runs on the blocking thread pool.
#[derive(Clone)]
pub struct PgGenerationStore {
    pool: DbPool,
}

impl std::fmt::Debug for PgGenerationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgGenerationStore")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl PgGenerationStore {
    /// Wrap an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`, apply migrations, and build the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or migrations fail.
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str, max_size: u32) -> DatabaseResult<Self> {
        let database_url = database_url.to_string();
        let pool = tokio::task::spawn_blocking(move || -> DatabaseResult<DbPool> {
            let pool = create_pool(&database_url, max_size)?;
            let mut conn = pool.get()?;
            run_migrations(&mut conn)?;
            Ok(pool)
        })
        .await
        .map_err(join_error)??;

        info!(max_size, "PostgreSQL generation store ready");
        Ok(Self { pool })
    }

    async fn with_conn<T, F>(&self, op: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            op(&mut conn)
        })
        .await
        .map_err(join_error)?
    }
}

fn join_error(e: tokio::task::JoinError) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Task(e.to_string()))
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    #[instrument(skip(self, new), fields(mode = %new.mode, tokens_used = new.tokens_used))]
    async fn create(&self, new: NewGeneration) -> DatabaseResult<GenerationRecord> {
        let row = NewGenerationRow::from(new);
        let inserted: GenerationRow = self
            .with_conn(move |conn| {
                Ok(diesel::insert_into(generations::table)
                    .values(&row)
                    .returning(GenerationRow::as_returning())
                    .get_result(conn)?)
            })
            .await?;

        debug!(id = %inserted.id(), "Generation saved");
        Ok(inserted.into())
    }

    #[instrument(skip(self))]
    async fn list(&self, bookmarked_only: bool) -> DatabaseResult<Vec<GenerationRecord>> {
        let rows: Vec<GenerationRow> = self
            .with_conn(move |conn| {
                let mut query = generations::table
                    .select(GenerationRow::as_select())
                    .order(generations::created_at.desc())
                    .into_boxed();
                if bookmarked_only {
                    query = query.filter(generations::is_bookmarked.eq(true));
                }
                Ok(query.load(conn)?)
            })
            .await?;

        debug!(count = rows.len(), "Generations listed");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn set_bookmark(
        &self,
        id: Uuid,
        is_bookmarked: bool,
    ) -> DatabaseResult<GenerationRecord> {
        let row: GenerationRow = self
            .with_conn(move |conn| {
                Ok(diesel::update(generations::table.find(id))
                    .set(generations::is_bookmarked.eq(is_bookmarked))
                    .returning(GenerationRow::as_returning())
                    .get_result(conn)?)
            })
            .await?;

        debug!("Bookmark updated");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        let deleted = self
            .with_conn(move |conn| {
                Ok(diesel::delete(generations::table.find(id)).execute(conn)?)
            })
            .await?;

        debug!(deleted, "Generation deleted");
        Ok(())
    }
}
