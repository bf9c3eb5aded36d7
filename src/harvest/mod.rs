//! Crawl orchestration
//!
//! This module contains the sequential crawl loop and the retrieval policy
//! that wraps every upstream call:
//! - Walking the numeric match id space one index at a time
//! - Bounded retries for rate limits and connection failures
//! - Not-found gap escalation (warn, error, exit)
//! - Consecutive error limiting

mod crawler;
mod policy;

pub use crawler::{Crawler, StepOutcome};
pub use policy::{classify_gap, GapSignal, Retrieval, RetrievalPolicy};
