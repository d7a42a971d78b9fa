//! Diesel models for the `generations` table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use scrivener_core::{GenerationRecord, NewGeneration};
use uuid::Uuid;

/// Database row for the `generations` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, derive_getters::Getters)]
#[diesel(table_name = crate::schema::generations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GenerationRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    mode: String,
    prompt: String,
    output: String,
    tokens_used: i32,
    is_bookmarked: bool,
}

impl From<GenerationRow> for GenerationRecord {
    fn from(row: GenerationRow) -> Self {
        let new = NewGeneration {
            mode: row.mode,
            prompt: row.prompt,
            output: row.output,
            tokens_used: row.tokens_used,
        };
        GenerationRecord::from_parts(row.id, row.created_at, new, row.is_bookmarked)
    }
}

/// Insertable struct for a new generation.
///
/// `id`, `created_at` and `is_bookmarked` take their column defaults.
#[derive(Debug, Clone, Insertable, derive_builder::Builder)]
#[diesel(table_name = crate::schema::generations)]
#[builder(setter(into))]
pub struct NewGenerationRow {
    mode: String,
    prompt: String,
    output: String,
    tokens_used: i32,
}

impl From<NewGeneration> for NewGenerationRow {
    fn from(new: NewGeneration) -> Self {
        Self {
            mode: new.mode,
            prompt: new.prompt,
            output: new.output,
            tokens_used: new.tokens_used,
        }
    }
}
