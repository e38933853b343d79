//! Mock implementations of the collaborator traits for unit testing.
//!
//! These are expectation-queue mocks: `expect_*().returning(result)` pushes
//! a queued result, calls pop them in order, and a call with an empty queue
//! falls back to a sensible default. No external mocking crate is needed.

#[cfg(feature = "mocks")]
pub use mock_implementations::*;

#[cfg(feature = "mocks")]
mod mock_implementations {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::data::errors::{IngestError, StoreError};
    use crate::data::records::{ColorMatch, EnrichedColor, EMBEDDING_DIM};
    use crate::throttle::BatchThrottle;
    use crate::traits::{ColorStore, EmbeddingGenerator};

    /// Mock for EmbeddingGenerator.
    ///
    /// With no queued expectations it returns a constant vector of the
    /// fixed embedding dimension, so pipeline tests succeed by default.
    #[derive(Debug, Clone)]
    pub struct MockEmbeddingGenerator {
        expected_results: Arc<Mutex<Vec<Result<Vec<f32>, IngestError>>>>,
        call_counts: Arc<Mutex<HashMap<String, usize>>>,
    }

    impl MockEmbeddingGenerator {
        pub fn new() -> Self {
            Self {
                expected_results: Arc::new(Mutex::new(Vec::new())),
                call_counts: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        pub fn expect_generate_embedding(&self) -> &Self {
            self
        }

        pub fn returning(&self, result: Result<Vec<f32>, IngestError>) -> &Self {
            let mut results = self.expected_results.lock().unwrap();
            results.push(result);
            self
        }

        pub fn times(&self, _: usize) -> &Self {
            // Stub for mockall-style syntax
            self
        }

        /// Number of times `generate_embedding` has been called.
        pub fn call_count(&self) -> usize {
            let counts = self.call_counts.lock().unwrap();
            *counts.get("generate_embedding").unwrap_or(&0)
        }
    }

    impl Default for MockEmbeddingGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl EmbeddingGenerator for MockEmbeddingGenerator {
        async fn generate_embedding(&self, _text: &str) -> Result<Vec<f32>, IngestError> {
            let mut counts = self.call_counts.lock().unwrap();
            *counts.entry("generate_embedding".to_string()).or_insert(0) += 1;
            drop(counts);

            let mut results = self.expected_results.lock().unwrap();
            if !results.is_empty() {
                results.remove(0)
            } else {
                Ok(vec![0.5; EMBEDDING_DIM])
            }
        }
    }

    /// Mock for ColorStore.
    ///
    /// Records every upserted record (in call order) so tests can assert
    /// persistence order and content; queued results override the default
    /// success/empty responses.
    #[derive(Debug, Clone)]
    pub struct MockColorStore {
        expected_upsert_results: Arc<Mutex<Vec<Result<(), StoreError>>>>,
        expected_search_results: Arc<Mutex<Vec<Result<Vec<ColorMatch>, StoreError>>>>,
        upserted: Arc<Mutex<Vec<EnrichedColor>>>,
    }

    impl MockColorStore {
        pub fn new() -> Self {
            Self {
                expected_upsert_results: Arc::new(Mutex::new(Vec::new())),
                expected_search_results: Arc::new(Mutex::new(Vec::new())),
                upserted: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn expect_upsert_color(&self) -> &Self {
            self
        }

        pub fn expect_nearest_colors(&self) -> &Self {
            self
        }

        pub fn returning_for_upsert(&self, result: Result<(), StoreError>) -> &Self {
            let mut results = self.expected_upsert_results.lock().unwrap();
            results.push(result);
            self
        }

        pub fn returning_for_search(
            &self,
            result: Result<Vec<ColorMatch>, StoreError>,
        ) -> &Self {
            let mut results = self.expected_search_results.lock().unwrap();
            results.push(result);
            self
        }

        pub fn times(&self, _: usize) -> &Self {
            // Stub for mockall-style syntax
            self
        }

        /// All records upserted so far, in call order.
        pub fn upserted(&self) -> Vec<EnrichedColor> {
            self.upserted.lock().unwrap().clone()
        }

        /// Names of upserted records, in call order.
        pub fn upserted_names(&self) -> Vec<String> {
            self.upserted
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.name.clone())
                .collect()
        }
    }

    impl Default for MockColorStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ColorStore for MockColorStore {
        async fn upsert_color(&self, record: &EnrichedColor) -> Result<(), StoreError> {
            let mut results = self.expected_upsert_results.lock().unwrap();
            let result = if !results.is_empty() {
                results.remove(0)
            } else {
                Ok(())
            };
            drop(results);

            if result.is_ok() {
                self.upserted.lock().unwrap().push(record.clone());
            }
            result
        }

        async fn nearest_colors(
            &self,
            _query_embedding: &str,
            _match_count: usize,
        ) -> Result<Vec<ColorMatch>, StoreError> {
            let mut results = self.expected_search_results.lock().unwrap();
            if !results.is_empty() {
                results.remove(0)
            } else {
                Ok(Vec::new())
            }
        }
    }

    /// Throttle that records every `rows_attempted` value it is consulted
    /// with, without pausing.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingThrottle {
        calls: Arc<Mutex<Vec<u64>>>,
    }

    impl RecordingThrottle {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<u64> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BatchThrottle for RecordingThrottle {
        async fn after_row(&self, rows_attempted: u64) {
            self.calls.lock().unwrap().push(rows_attempted);
        }
    }
}
