use std::sync::Arc;

use tracing::{info, instrument};

use crate::data::errors::IngestError;
use crate::data::records::ColorMatch;
use crate::pipeline::format_embedding;
use crate::traits::{ColorStore, EmbeddingGenerator};

/// Read facade over the store's nearest-neighbor contract.
///
/// Embeds the query text with the same generator the ingestion side uses,
/// then delegates to [`ColorStore::nearest_colors`]. Not called by the
/// ingestion core; this is the surface downstream consumers search through.
pub struct QueryService {
    embedding_generator: Arc<dyn EmbeddingGenerator>,
    store: Arc<dyn ColorStore>,
}

impl QueryService {
    pub fn new(
        embedding_generator: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn ColorStore>,
    ) -> Self {
        Self {
            embedding_generator,
            store,
        }
    }

    /// Returns up to `match_count` stored colors ranked by semantic
    /// similarity to `query_text`.
    #[instrument(skip(self), fields(query = %query_text, match_count = match_count))]
    pub async fn find_similar(
        &self,
        query_text: &str,
        match_count: usize,
    ) -> Result<Vec<ColorMatch>, IngestError> {
        let embedding = self
            .embedding_generator
            .generate_embedding(query_text)
            .await?;

        let matches = self
            .store
            .nearest_colors(&format_embedding(&embedding), match_count)
            .await?;

        info!(result_count = matches.len(), "Similarity search complete");
        Ok(matches)
    }
}
