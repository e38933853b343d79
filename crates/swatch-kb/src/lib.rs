//! Swatch knowledge base: CSV ingestion of named colors enriched with
//! semantic embeddings, persisted into a searchable store under an
//! idempotent key.

// Core modules
pub mod data;
pub mod embedding;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod throttle;
pub mod traits;

// Implementation adapters (optional, can be provided externally)
#[cfg(feature = "adapters")]
pub mod adapters;

// Testing utilities
pub mod test_utils;

// Re-export key types for convenient usage
pub use data::errors::{IngestError, StoreError, ValidationFailure};
pub use data::records::{
    ColorMatch, ColorRow, EnrichedColor, RunWindow, ValidatedRow, EMBEDDING_DIM,
};
pub use pipeline::{encode_record, format_embedding, parse_embedding, parse_row, validate_row};
pub use throttle::{BatchThrottle, FixedIntervalThrottle, NoThrottle};

// Re-export core traits
pub use traits::{ColorStore, EmbeddingGenerator};

// Re-export embedding services
#[cfg(feature = "async-openai")]
pub use embedding::OpenAiEmbeddingGenerator;
pub use embedding::{create_embedding_generator, DeterministicEmbedding, EmbeddingConfig};

// Re-export store implementations
#[cfg(all(feature = "adapters", feature = "reqwest"))]
pub use adapters::{RestColorStore, RestStoreConfig};
pub use storage::MemoryColorStore;

// Re-export core services
pub use services::{IngestionService, QueryService};

/// Initialize tracing for the ingestion CLI and tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();
}
