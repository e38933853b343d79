//! ColorStore trait definition for the persistence/search store

use async_trait::async_trait;

use crate::data::errors::StoreError;
use crate::data::records::{ColorMatch, EnrichedColor};

/// Interface to the searchable color store.
///
/// `upsert_color` must be idempotent: repeated upserts of an identical
/// record leave the store in the same observable state, and conflicting
/// writes keyed by `name` overwrite rather than duplicate.
///
/// `nearest_colors` is the secondary read contract used by downstream
/// consumers; the ingestion core never calls it.
#[async_trait]
pub trait ColorStore: Send + Sync {
    /// Persists a storage-ready record, keyed by `name`.
    async fn upsert_color(&self, record: &EnrichedColor) -> Result<(), StoreError>;

    /// Returns up to `match_count` records ranked by ascending distance
    /// from the given serialized query embedding.
    async fn nearest_colors(
        &self,
        query_embedding: &str,
        match_count: usize,
    ) -> Result<Vec<ColorMatch>, StoreError>;
}
