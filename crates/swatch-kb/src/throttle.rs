//! Batch pacing between rows.
//!
//! The throttling policy is decoupled from row iteration: the batch driver
//! consults a [`BatchThrottle`] after every attempted row, and the policy
//! decides whether to pause. Swapping the policy (e.g. for adaptive
//! backoff) never touches the per-row pipeline logic.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Pacing policy consulted by the batch driver after each attempted row.
#[async_trait]
pub trait BatchThrottle: Send + Sync {
    /// Called with the number of rows attempted so far in this run,
    /// counting both successes and failures.
    async fn after_row(&self, rows_attempted: u64);
}

/// Pauses for a fixed interval after every `every_rows` attempted rows, to
/// respect the embedding provider's throughput limits.
#[derive(Debug, Clone)]
pub struct FixedIntervalThrottle {
    pub every_rows: u64,
    pub pause: Duration,
}

impl Default for FixedIntervalThrottle {
    fn default() -> Self {
        Self {
            every_rows: 10,
            pause: Duration::from_millis(200),
        }
    }
}

#[async_trait]
impl BatchThrottle for FixedIntervalThrottle {
    async fn after_row(&self, rows_attempted: u64) {
        if rows_attempted > 0 && rows_attempted % self.every_rows == 0 {
            debug!(
                rows_attempted = rows_attempted,
                pause_ms = self.pause.as_millis() as u64,
                "Pausing batch to respect provider rate limits"
            );
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// No-op pacing, for tests and offline stores.
#[derive(Debug, Clone, Default)]
pub struct NoThrottle;

#[async_trait]
impl BatchThrottle for NoThrottle {
    async fn after_row(&self, _rows_attempted: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn pauses_only_at_multiples() {
        let throttle = FixedIntervalThrottle::default();

        let start = Instant::now();
        throttle.after_row(9).await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        throttle.after_row(10).await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));

        throttle.after_row(11).await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn twenty_five_rows_pause_twice() {
        let throttle = FixedIntervalThrottle::default();

        let start = Instant::now();
        for attempted in 1..=25u64 {
            throttle.after_row(attempted).await;
        }
        // Pauses fire after rows 10 and 20, none after row 25.
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn no_throttle_never_pauses() {
        let throttle = NoThrottle;
        let start = Instant::now();
        for attempted in 1..=100u64 {
            throttle.after_row(attempted).await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_interval_is_respected() {
        let throttle = FixedIntervalThrottle {
            every_rows: 3,
            pause: Duration::from_millis(50),
        };

        let start = Instant::now();
        for attempted in 1..=9u64 {
            throttle.after_row(attempted).await;
        }
        assert_eq!(start.elapsed(), Duration::from_millis(150));
    }
}
