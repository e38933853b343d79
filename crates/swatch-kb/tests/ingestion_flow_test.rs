//! End-to-end ingestion scenarios through the public crate surface:
//! failure isolation, pacing cadence, window math, idempotence, and
//! persistence order.

use std::sync::Arc;

use swatch_kb::test_utils::mocks::{MockColorStore, MockEmbeddingGenerator, RecordingThrottle};
use swatch_kb::{
    DeterministicEmbedding, IngestError, IngestionService, MemoryColorStore, NoThrottle, RunWindow,
    EMBEDDING_DIM,
};

fn rows(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("Color{},#ff00{:02x},x", i, i))
        .collect()
}

#[tokio::test]
async fn full_pipeline_persists_scenario_row() {
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    service
        .run(&["Red,#ff0000,x".to_string()], RunWindow::default())
        .await;

    let record = store.get("Red").await.expect("record should be persisted");
    assert_eq!(record.hex, "ff0000");
    assert!(record.is_good_name);
    assert!(record.embedding.starts_with('['));
}

#[tokio::test]
async fn invalid_row_is_skipped_and_batch_continues() {
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    let batch = vec![
        "Red,#ff0000,x".to_string(),
        ",#00ff00,x".to_string(), // empty name: validation failure
        "Blue,#0000ff,".to_string(),
    ];
    service.run(&batch, RunWindow::default()).await;

    assert_eq!(store.len().await, 2);
    assert!(store.get("Red").await.is_some());
    assert!(store.get("Blue").await.is_some());
    assert!(!store.get("Blue").await.unwrap().is_good_name);
}

#[tokio::test]
async fn provider_failure_on_row_five_spares_the_rest() {
    let generator = MockEmbeddingGenerator::new();
    for _ in 0..4 {
        generator
            .expect_generate_embedding()
            .returning(Ok(vec![0.5; EMBEDDING_DIM]));
    }
    generator
        .expect_generate_embedding()
        .returning(Err(IngestError::Provider("network timeout".to_string())));
    // Remaining calls fall back to the mock's default success.

    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(generator),
        store.clone(),
        Arc::new(NoThrottle),
    );

    service.run(&rows(25), RunWindow::default()).await;

    assert_eq!(store.len().await, 24);
    assert!(store.get("Color4").await.is_none());
    for i in (0..25).filter(|&i| i != 4) {
        assert!(
            store.get(&format!("Color{}", i)).await.is_some(),
            "row {} should have been persisted",
            i
        );
    }
}

#[tokio::test(start_paused = true)]
async fn batch_of_25_rows_pauses_after_rows_10_and_20_only() {
    use tokio::time::{Duration, Instant};

    let store = Arc::new(MemoryColorStore::new());
    let service =
        IngestionService::new(Arc::new(DeterministicEmbedding::default()), store.clone());

    let start = Instant::now();
    service.run(&rows(25), RunWindow::default()).await;

    assert_eq!(start.elapsed(), Duration::from_millis(400));
    assert_eq!(store.len().await, 25);
}

#[tokio::test]
async fn failed_rows_still_count_toward_the_pause_counter() {
    let throttle = Arc::new(RecordingThrottle::new());
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store,
        throttle.clone(),
    );

    let batch = vec![
        ",#ff0000,x".to_string(), // invalid
        "Red,#ff0000,x".to_string(),
        "bad".to_string(), // invalid
    ];
    service.run(&batch, RunWindow::default()).await;

    assert_eq!(throttle.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn offset_resumes_a_partial_run() {
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    let batch = rows(10);
    service
        .run(
            &batch,
            RunWindow {
                offset: Some(7),
                limit: None,
            },
        )
        .await;

    assert_eq!(store.len().await, 3);
    assert!(store.get("Color6").await.is_none());
    assert!(store.get("Color7").await.is_some());
    assert!(store.get("Color9").await.is_some());
}

#[tokio::test]
async fn limit_caps_a_run() {
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    service
        .run(
            &rows(10),
            RunWindow {
                offset: None,
                limit: Some(4),
            },
        )
        .await;

    assert_eq!(store.len().await, 4);
}

#[tokio::test]
async fn reingesting_the_same_rows_is_idempotent() {
    let store = Arc::new(MemoryColorStore::new());
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    let batch = rows(5);
    service.run(&batch, RunWindow::default()).await;
    let first_pass = store.get("Color0").await.unwrap();

    service.run(&batch, RunWindow::default()).await;

    assert_eq!(store.len().await, 5);
    assert_eq!(store.get("Color0").await.unwrap(), first_pass);
}

#[tokio::test]
async fn persistence_order_matches_input_order() {
    let store = MockColorStore::new();
    let store = Arc::new(store);
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    service.run(&rows(6), RunWindow::default()).await;

    assert_eq!(
        store.upserted_names(),
        vec!["Color0", "Color1", "Color2", "Color3", "Color4", "Color5"]
    );
}

#[tokio::test]
async fn persistence_failure_skips_row_without_retry() {
    use swatch_kb::StoreError;

    let store = MockColorStore::new();
    store
        .expect_upsert_color()
        .returning_for_upsert(Err(StoreError::Connection("refused".to_string())));

    let store = Arc::new(store);
    let service = IngestionService::with_throttle(
        Arc::new(DeterministicEmbedding::default()),
        store.clone(),
        Arc::new(NoThrottle),
    );

    service.run(&rows(3), RunWindow::default()).await;

    // First upsert failed and was not retried; the other two landed.
    assert_eq!(store.upserted_names(), vec!["Color1", "Color2"]);
}
