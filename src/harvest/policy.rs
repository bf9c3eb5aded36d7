//! Retrieval policy
//!
//! Wraps every provider call with bounded retries for transient failures and
//! tracks how far the crawl has walked since the last existing match.

use crate::config::{NotFoundConfig, RetryConfig};
use crate::provider::FetchOutcome;
use crate::{HarvestError, Result};
use std::future::Future;
use std::time::Duration;

/// Severity of the current not-found gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GapSignal {
    Quiet,
    Warn,
    Error,
    Exit,
}

/// Classifies a gap against the thresholds, highest threshold first
///
/// Thresholds are exclusive: a gap equal to `warn` is still quiet.
pub fn classify_gap(gap: u64, thresholds: &NotFoundConfig) -> GapSignal {
    if gap > thresholds.exit {
        GapSignal::Exit
    } else if gap > thresholds.error {
        GapSignal::Error
    } else if gap > thresholds.warn {
        GapSignal::Warn
    } else {
        GapSignal::Quiet
    }
}

/// What one retrieval produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval<T> {
    Found(T),

    /// The record does not exist upstream
    NotFound,

    /// Rate limited with rate-limit retries disabled; existence is unknown
    Throttled,
}

/// Retry and not-found bookkeeping shared by all retrievals of a crawl
#[derive(Debug, Clone)]
pub struct RetrievalPolicy {
    retry: RetryConfig,
    thresholds: NotFoundConfig,
    last_found: u64,
}

impl RetrievalPolicy {
    /// Creates a policy
    ///
    /// # Arguments
    ///
    /// * `retry` - Retry limits and rate-limit handling
    /// * `thresholds` - Not-found gap thresholds
    /// * `last_found` - Index treated as the most recent hit
    pub fn new(retry: RetryConfig, thresholds: NotFoundConfig, last_found: u64) -> Self {
        Self {
            retry,
            thresholds,
            last_found,
        }
    }

    /// Index of the most recent successful retrieval
    pub fn last_found(&self) -> u64 {
        self.last_found
    }

    /// Runs one retrieval under the policy
    ///
    /// # Arguments
    ///
    /// * `index` - Numeric match index being retrieved
    /// * `label` - What is being retrieved, for logs ("summary", "timeline")
    /// * `op` - Performs one attempt; called at most `max-attempts` times
    ///
    /// # Returns
    ///
    /// * `Ok(Retrieval::Found(record))` - Retrieved; `last_found` moves to `index`
    /// * `Ok(Retrieval::NotFound)` - The record does not exist
    /// * `Ok(Retrieval::Throttled)` - Rate limited with rate-limit retries
    ///   disabled; the gap is not touched
    /// * `Err(HarvestError::NotFoundGapExceeded)` - Fatal, the gap passed `exit`
    /// * `Err(HarvestError::RetriesExhausted)` - Every attempt was transient
    /// * `Err(_)` - A non-transient failure from the provider
    pub async fn retrieve<T, F, Fut>(&mut self, index: u64, label: &str, mut op: F) -> Result<Retrieval<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<FetchOutcome<T>>>,
    {
        let attempts = self.retry.max_attempts.max(1);
        let mut reason = String::new();

        for attempt in 1..=attempts {
            match op().await? {
                FetchOutcome::Found(record) => {
                    self.last_found = index;
                    return Ok(Retrieval::Found(record));
                }
                FetchOutcome::NotFound => {
                    self.on_not_found(index, label)?;
                    return Ok(Retrieval::NotFound);
                }
                FetchOutcome::RateLimited { retry_after } => {
                    if !self.retry.retry_rate_limited {
                        tracing::warn!(
                            index,
                            retry_after,
                            "Rate limited on {}, skipping without retry",
                            label
                        );
                        return Ok(Retrieval::Throttled);
                    }

                    tracing::warn!(
                        index,
                        attempt,
                        retry_after,
                        "Rate limited on {} (attempt {}/{})",
                        label,
                        attempt,
                        attempts
                    );
                    reason = "rate limited".to_string();

                    if attempt < attempts && self.retry.respect_retry_after {
                        if let Some(secs) = retry_after {
                            tokio::time::sleep(Duration::from_secs(secs)).await;
                        }
                    }
                }
                FetchOutcome::ConnectionFailure { reason: why } => {
                    tracing::warn!(
                        index,
                        attempt,
                        "Connection failure on {} (attempt {}/{}): {}",
                        label,
                        attempt,
                        attempts,
                        why
                    );
                    reason = why;
                }
            }
        }

        tracing::error!(index, "{} retrieval gave up after {} attempts", label, attempts);
        Err(HarvestError::RetriesExhausted {
            label: label.to_string(),
            attempts,
            reason,
        })
    }

    fn on_not_found(&self, index: u64, label: &str) -> Result<()> {
        let gap = index.saturating_sub(self.last_found);
        tracing::info!(index, gap, "{} not found", label);

        match classify_gap(gap, &self.thresholds) {
            GapSignal::Exit => {
                tracing::error!(
                    critical = true,
                    index,
                    gap,
                    "Not-found exit threshold reached: last found = {}, index = {}",
                    self.last_found,
                    index
                );
                Err(HarvestError::NotFoundGapExceeded {
                    last_found: self.last_found,
                    index,
                })
            }
            GapSignal::Error => {
                tracing::error!(
                    index,
                    gap,
                    "Not-found error threshold reached: last found = {}, index = {}",
                    self.last_found,
                    index
                );
                Ok(())
            }
            GapSignal::Warn => {
                tracing::warn!(
                    index,
                    gap,
                    "Not-found warning threshold reached: last found = {}, index = {}",
                    self.last_found,
                    index
                );
                Ok(())
            }
            GapSignal::Quiet => Ok(()),
        }
    }
}
