//! Crawler - sequential walk over the match id space
//!
//! One index is fully resolved (retrieved, transformed, stored or skipped)
//! before the next one starts. The cursor always advances, whatever happened
//! to the current index.

use crate::config::Config;
use crate::harvest::{Retrieval, RetrievalPolicy};
use crate::provider::Provider;
use crate::region::Platform;
use crate::storage::Gateway;
use crate::transform::transform;
use crate::{HarvestError, Result, TransformError};
use std::time::Instant;

/// How often progress is reported, in indices
const PROGRESS_INTERVAL: u64 = 100;

/// What happened to one index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The match was persisted under this row id
    Stored { row_id: i64 },

    /// The match was already in the store; nothing was fetched
    AlreadyStored,

    /// No match exists at this index
    NotFound,

    /// The summary exists but its timeline does not
    Inconsistent,

    /// A retrieval was rate limited and rate-limit retries are disabled
    RateLimited,

    /// A non-fatal error abandoned this index
    Failed,
}

/// Main crawl loop state
pub struct Crawler<P: Provider, G: Gateway> {
    provider: P,
    gateway: G,
    policy: RetrievalPolicy,
    platform: Platform,
    index: u64,
    consecutive_errors: u32,
    max_consecutive_errors: u32,
    processed: u64,
    stored: u64,
    started: Instant,
}

impl<P: Provider, G: Gateway> Crawler<P, G> {
    /// Creates a crawler positioned at `crawler.start-index`
    ///
    /// The index just before the start counts as the last hit, so the
    /// not-found gap starts at one.
    pub fn new(config: &Config, provider: P, gateway: G) -> Self {
        let start = config.crawler.start_index;
        Self {
            provider,
            gateway,
            policy: RetrievalPolicy::new(
                config.retry.clone(),
                config.not_found,
                start.saturating_sub(1),
            ),
            platform: config.provider.platform,
            index: start,
            consecutive_errors: 0,
            max_consecutive_errors: config.crawler.max_consecutive_errors,
            processed: 0,
            stored: 0,
            started: Instant::now(),
        }
    }

    /// Next index to be processed
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    pub fn last_found(&self) -> u64 {
        self.policy.last_found()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Crawls until a fatal error stops the loop
    ///
    /// There is no natural end to the id space, so this only ever returns
    /// an error (`NotFoundGapExceeded` or `ErrorLimitExceeded`).
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            "Starting crawl at {}",
            self.platform.match_id(self.index)
        );
        loop {
            self.step().await?;
        }
    }

    /// Crawls a bounded number of indices
    pub async fn run_for(&mut self, count: u64) -> Result<()> {
        tracing::info!(
            "Starting crawl at {} for {} indices",
            self.platform.match_id(self.index),
            count
        );
        for _ in 0..count {
            self.step().await?;
        }
        tracing::info!(
            "Crawl finished: {} indices processed, {} matches stored in {:?}",
            self.processed,
            self.stored,
            self.started.elapsed()
        );
        Ok(())
    }

    /// Processes the current index and advances the cursor
    ///
    /// # Returns
    ///
    /// * `Ok(StepOutcome)` - The index was handled (possibly by failing)
    /// * `Err(HarvestError)` - A fatal condition; the crawl must stop
    pub async fn step(&mut self) -> Result<StepOutcome> {
        let index = self.index;
        let outcome = self.process(index).await;

        self.index += 1;
        self.processed += 1;

        let result = match outcome {
            Ok(outcome) => {
                self.consecutive_errors = 0;
                if let StepOutcome::Stored { .. } = outcome {
                    self.stored += 1;
                }
                Ok(outcome)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                self.consecutive_errors += 1;
                tracing::error!(
                    index,
                    consecutive_errors = self.consecutive_errors,
                    "Error processing {}: {}",
                    self.platform.match_id(index),
                    e
                );

                if self.consecutive_errors > self.max_consecutive_errors {
                    tracing::error!(
                        critical = true,
                        index,
                        "Too many consecutive errors ({}), stopping",
                        self.consecutive_errors
                    );
                    Err(HarvestError::ErrorLimitExceeded {
                        count: self.consecutive_errors,
                    })
                } else {
                    Ok(StepOutcome::Failed)
                }
            }
        };

        if self.processed % PROGRESS_INTERVAL == 0 {
            let elapsed = self.started.elapsed();
            let rate = self.processed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            tracing::info!(
                "Progress: {} indices processed, {} stored, last found {}, {:.2} indices/sec",
                self.processed,
                self.stored,
                self.policy.last_found(),
                rate
            );
        }

        result
    }

    async fn process(&mut self, index: u64) -> Result<StepOutcome> {
        let match_id = self.platform.match_id(index);

        if self.gateway.exists(&match_id)? {
            tracing::warn!(index, match_id = %match_id, "Match already stored, skipping");
            return Ok(StepOutcome::AlreadyStored);
        }

        let provider = &self.provider;
        let id = match_id.as_str();

        let summary = match self
            .policy
            .retrieve(index, "summary", move || provider.fetch_summary(id))
            .await?
        {
            Retrieval::Found(summary) => summary,
            Retrieval::NotFound => return Ok(StepOutcome::NotFound),
            Retrieval::Throttled => return Ok(StepOutcome::RateLimited),
        };

        if summary.metadata.match_id != match_id {
            return Err(TransformError::MatchIdMismatch {
                expected: match_id,
                found: summary.metadata.match_id,
            }
            .into());
        }

        let timeline = match self
            .policy
            .retrieve(index, "timeline", move || provider.fetch_timeline(id))
            .await?
        {
            Retrieval::Found(timeline) => timeline,
            Retrieval::NotFound => {
                tracing::error!(
                    index,
                    match_id = %match_id,
                    "Summary retrieved but timeline is missing, skipping"
                );
                return Ok(StepOutcome::Inconsistent);
            }
            Retrieval::Throttled => {
                tracing::warn!(
                    index,
                    match_id = %match_id,
                    "Timeline rate limited, skipping match"
                );
                return Ok(StepOutcome::RateLimited);
            }
        };

        tracing::info!(index, match_id = %match_id, "Match and timeline retrieved");

        let graph = transform(&summary, &timeline, &mut self.gateway)?;
        let row_id = self.gateway.store(&graph)?;

        tracing::info!(
            index,
            match_id = %match_id,
            "Stored match ({} participants, {} events)",
            graph.participants.len(),
            graph.event_count()
        );

        Ok(StepOutcome::Stored { row_id })
    }
}
