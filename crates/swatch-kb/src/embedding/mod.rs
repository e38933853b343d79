use std::sync::Arc;

use async_trait::async_trait;

use crate::data::errors::IngestError;
use crate::data::records::EMBEDDING_DIM;
use crate::traits::EmbeddingGenerator;

mod openai;

#[cfg(feature = "async-openai")]
pub use openai::OpenAiEmbeddingGenerator;

/// Deterministic embedding generator for offline runs and tests.
///
/// Derives a normalized, fixed-dimension vector from a hash of the input
/// text. Identical inputs always produce identical vectors.
#[derive(Debug, Clone)]
pub struct DeterministicEmbedding {
    embedding_dimension: usize,
}

impl DeterministicEmbedding {
    pub fn new(embedding_dimension: usize) -> Self {
        Self {
            embedding_dimension,
        }
    }

    fn generate(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.embedding_dimension];

        let text_hash = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        for (i, value) in embedding.iter_mut().enumerate() {
            *value = ((text_hash.wrapping_add(i as u64)) % 100) as f32 / 100.0;
        }

        let magnitude: f32 = embedding.iter().map(|&v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        embedding
    }
}

impl Default for DeterministicEmbedding {
    fn default() -> Self {
        Self::new(EMBEDDING_DIM)
    }
}

#[async_trait]
impl EmbeddingGenerator for DeterministicEmbedding {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, IngestError> {
        Ok(self.generate(text))
    }
}

/// Configuration for embedding generators
#[derive(Debug, Clone)]
pub enum EmbeddingConfig {
    /// Use the OpenAI API for embeddings
    OpenAi { api_key: String, model: String },
    /// Use deterministic hash-derived embeddings (offline runs, tests)
    Deterministic { dimensions: usize },
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            Self::OpenAi {
                api_key,
                model: "text-embedding-3-small".to_string(),
            }
        } else {
            Self::Deterministic {
                dimensions: EMBEDDING_DIM,
            }
        }
    }
}

/// Create an embedding generator from the provided configuration
pub fn create_embedding_generator(config: EmbeddingConfig) -> Arc<dyn EmbeddingGenerator> {
    match config {
        #[cfg(feature = "async-openai")]
        EmbeddingConfig::OpenAi { api_key, model } => {
            Arc::new(OpenAiEmbeddingGenerator::new(api_key, model))
        }
        #[cfg(not(feature = "async-openai"))]
        EmbeddingConfig::OpenAi { .. } => {
            panic!("OpenAI embedding generator is not available because the 'async-openai' feature is not enabled");
        }
        EmbeddingConfig::Deterministic { dimensions } => {
            Arc::new(DeterministicEmbedding::new(dimensions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deterministic_embedding_has_fixed_dimension() {
        let generator = DeterministicEmbedding::default();
        let embedding = generator.generate_embedding("Red").await.unwrap();
        assert_eq!(embedding.len(), EMBEDDING_DIM);
    }

    #[tokio::test]
    async fn deterministic_embedding_is_stable() {
        let generator = DeterministicEmbedding::default();
        let first = generator.generate_embedding("Cerulean").await.unwrap();
        let second = generator.generate_embedding("Cerulean").await.unwrap();
        assert_eq!(first, second, "Embeddings should be deterministic");

        let other = generator.generate_embedding("Crimson").await.unwrap();
        assert_ne!(
            first, other,
            "Different text should have different embeddings"
        );
    }

    #[tokio::test]
    async fn deterministic_embedding_is_normalized() {
        let generator = DeterministicEmbedding::default();
        let embedding = generator.generate_embedding("Olive").await.unwrap();
        let magnitude: f32 = embedding.iter().map(|&v| v * v).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn factory_builds_deterministic_generator() {
        let generator = create_embedding_generator(EmbeddingConfig::Deterministic {
            dimensions: EMBEDDING_DIM,
        });
        let embedding = generator.generate_embedding("test").await.unwrap();
        assert_eq!(embedding.len(), EMBEDDING_DIM);
    }
}
