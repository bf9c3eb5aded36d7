//! Retrieval provider
//!
//! A provider fetches the two upstream records of one match. It only
//! classifies what happened; retrying and gap tracking live in
//! `harvest::RetrievalPolicy`.

mod riot;

pub use riot::{build_http_client, RiotProvider};

use crate::upstream::{MatchDto, TimelineDto};
use crate::HarvestError;

/// Classified result of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The record exists and decoded
    Found(T),

    /// The identifier is unassigned upstream
    NotFound,

    /// Upstream asked us to slow down
    RateLimited {
        /// Seconds to wait, when the upstream said so
        retry_after: Option<u64>,
    },

    /// Transient transport failure (connect, timeout, 5xx)
    ConnectionFailure { reason: String },
}

/// Source of match records
///
/// `Err` is reserved for failures retrying cannot fix, such as a rejected
/// API key or a body that does not decode.
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Fetches the match summary for a global match id
    async fn fetch_summary(&self, match_id: &str) -> Result<FetchOutcome<MatchDto>, HarvestError>;

    /// Fetches the event timeline for a global match id
    async fn fetch_timeline(
        &self,
        match_id: &str,
    ) -> Result<FetchOutcome<TimelineDto>, HarvestError>;
}

