use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::data::errors::IngestError;
use crate::data::records::RunWindow;
use crate::pipeline::{encode_record, parse_row, validate_row};
use crate::throttle::{BatchThrottle, FixedIntervalThrottle};
use crate::traits::{ColorStore, EmbeddingGenerator};

/// Batch driver: sequences the per-row pipeline over an ordered list of
/// raw lines.
///
/// Rows are processed strictly sequentially in input order, so persistence
/// order matches input order and at most one external request is in flight
/// at a time. Any stage failure is logged with the row's position and the
/// row is skipped; the store is left untouched for that row and the batch
/// continues. After every attempted row (success or failure) the throttle
/// is consulted to respect the embedding provider's throughput limits.
pub struct IngestionService {
    embedding_generator: Arc<dyn EmbeddingGenerator>,
    store: Arc<dyn ColorStore>,
    throttle: Arc<dyn BatchThrottle>,
}

impl IngestionService {
    /// Creates a new IngestionService with the default fixed-interval
    /// throttle (200 ms pause after every 10 attempted rows).
    pub fn new(
        embedding_generator: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn ColorStore>,
    ) -> Self {
        Self::with_throttle(
            embedding_generator,
            store,
            Arc::new(FixedIntervalThrottle::default()),
        )
    }

    /// Creates a new IngestionService with an explicit pacing policy.
    pub fn with_throttle(
        embedding_generator: Arc<dyn EmbeddingGenerator>,
        store: Arc<dyn ColorStore>,
        throttle: Arc<dyn BatchThrottle>,
    ) -> Self {
        Self {
            embedding_generator,
            store,
            throttle,
        }
    }

    /// Runs the full pipeline for one raw line: parse, validate, embed,
    /// encode, upsert. Returns the persisted name on success.
    pub async fn ingest_row(&self, line: &str) -> Result<String, IngestError> {
        let row = parse_row(line);
        let validated = validate_row(row)?;

        let embedding = self
            .embedding_generator
            .generate_embedding(&validated.as_row().name)
            .await?;

        let record = encode_record(validated, &embedding)?;
        self.store.upsert_color(&record).await?;

        Ok(record.name)
    }

    /// Processes `rows[offset..offset+limit]` one row at a time.
    ///
    /// Per-row failures are logged with the absolute row position and
    /// skipped; a persistence failure discards the already-computed
    /// embedding with no compensating action. Completion is logged but no
    /// summary statistics are computed or returned: failures are visible
    /// only through per-event logs, and the manual `offset` parameter is
    /// the only resumption mechanism.
    #[instrument(skip(self, rows), fields(total_rows = rows.len(), offset = ?window.offset, limit = ?window.limit))]
    pub async fn run(&self, rows: &[String], window: RunWindow) {
        let start = window.offset.unwrap_or(0).min(rows.len());
        let end = match window.limit {
            Some(limit) => start.saturating_add(limit).min(rows.len()),
            None => rows.len(),
        };

        info!(start = start, end = end, "Ingestion run started");

        let mut attempted: u64 = 0;
        for (position, line) in rows[start..end].iter().enumerate().map(|(i, l)| (start + i, l)) {
            match self.ingest_row(line).await {
                Ok(name) => {
                    info!(row = position, name = %name, "Row persisted");
                }
                Err(e) => {
                    error!(row = position, error = %e, "Row skipped");
                }
            }

            attempted += 1;
            self.throttle.after_row(attempted).await;
        }

        info!("Ingestion run complete");
    }
}
