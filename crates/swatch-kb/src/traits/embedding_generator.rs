//! EmbeddingGenerator trait definition for vector embeddings

use async_trait::async_trait;

use crate::data::errors::IngestError;

/// Represents the interface for generating vector embeddings from text.
///
/// Contract: converts input text into a dense vector of the provider's
/// fixed output dimension, using one pinned model identifier. Failures are
/// opaque to the caller; the batch driver isolates them at the record
/// level with no internal retry or backoff.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Generates an embedding vector for the given text.
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, IngestError>;
}
