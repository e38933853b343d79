use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::errors::StoreError;
use crate::data::records::{ColorMatch, EnrichedColor};
use crate::pipeline::encoder::parse_embedding;
use crate::traits::ColorStore;

/// In-memory color store.
///
/// Upserts are keyed by `name` with insert-or-replace semantics;
/// `nearest_colors` ranks stored records by cosine distance from the
/// query embedding.
pub struct MemoryColorStore {
    colors: Arc<RwLock<HashMap<String, EnrichedColor>>>,
}

impl MemoryColorStore {
    pub fn new() -> Self {
        Self {
            colors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the stored record for `name`, if any.
    pub async fn get(&self, name: &str) -> Option<EnrichedColor> {
        let colors = self.colors.read().await;
        colors.get(name).cloned()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        let colors = self.colors.read().await;
        colors.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let mag_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        let mag_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
        if mag_a == 0.0 || mag_b == 0.0 {
            return 1.0;
        }
        1.0 - dot / (mag_a * mag_b)
    }
}

impl Default for MemoryColorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ColorStore for MemoryColorStore {
    async fn upsert_color(&self, record: &EnrichedColor) -> Result<(), StoreError> {
        let mut colors = self.colors.write().await;
        colors.insert(record.name.clone(), record.clone());
        Ok(())
    }

    async fn nearest_colors(
        &self,
        query_embedding: &str,
        match_count: usize,
    ) -> Result<Vec<ColorMatch>, StoreError> {
        let query = parse_embedding(query_embedding)?;
        let colors = self.colors.read().await;

        let mut matches: Vec<ColorMatch> = Vec::with_capacity(colors.len());
        for record in colors.values() {
            let stored = parse_embedding(&record.embedding)?;
            matches.push(ColorMatch {
                name: record.name.clone(),
                distance: Self::cosine_distance(&query, &stored),
            });
        }

        matches.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(match_count);

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encoder::format_embedding;

    fn record(name: &str, embedding: &[f32]) -> EnrichedColor {
        EnrichedColor {
            name: name.to_string(),
            hex: "ff0000".to_string(),
            is_good_name: true,
            embedding: format_embedding(embedding),
        }
    }

    #[tokio::test]
    async fn upsert_then_get() {
        let store = MemoryColorStore::new();
        let red = record("Red", &[1.0, 0.0, 0.0]);

        store.upsert_color(&red).await.unwrap();

        assert_eq!(store.get("Red").await, Some(red));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn repeated_upsert_is_idempotent() {
        let store = MemoryColorStore::new();
        let red = record("Red", &[1.0, 0.0, 0.0]);

        store.upsert_color(&red).await.unwrap();
        store.upsert_color(&red).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("Red").await, Some(red));
    }

    #[tokio::test]
    async fn conflicting_upsert_overwrites() {
        let store = MemoryColorStore::new();
        store
            .upsert_color(&record("Red", &[1.0, 0.0, 0.0]))
            .await
            .unwrap();

        let mut updated = record("Red", &[0.0, 1.0, 0.0]);
        updated.hex = "ee0000".to_string();
        store.upsert_color(&updated).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("Red").await.unwrap().hex, "ee0000");
    }

    #[tokio::test]
    async fn nearest_colors_ranks_by_cosine_distance() {
        let store = MemoryColorStore::new();
        store
            .upsert_color(&record("Red", &[1.0, 0.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert_color(&record("Green", &[0.0, 1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert_color(&record("Pink", &[0.9, 0.1, 0.0]))
            .await
            .unwrap();

        let query = format_embedding(&[1.0, 0.0, 0.0]);
        let matches = store.nearest_colors(&query, 10).await.unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].name, "Red");
        assert_eq!(matches[1].name, "Pink");
        assert_eq!(matches[2].name, "Green");
        assert!(matches[0].distance < matches[1].distance);
        assert!(matches[1].distance < matches[2].distance);
    }

    #[tokio::test]
    async fn nearest_colors_truncates_to_match_count() {
        let store = MemoryColorStore::new();
        for i in 0..5 {
            store
                .upsert_color(&record(&format!("Color{}", i), &[1.0, i as f32, 0.0]))
                .await
                .unwrap();
        }

        let query = format_embedding(&[1.0, 0.0, 0.0]);
        let matches = store.nearest_colors(&query, 2).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn nearest_colors_rejects_malformed_query() {
        let store = MemoryColorStore::new();
        let result = store.nearest_colors("not-a-vector", 5).await;
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    }
}
