//! HTTP provider for the match-v5 API
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with the API key and user agent
//! - Routing to the platform's regional host
//! - Classifying response codes into fetch outcomes

use crate::config::ProviderConfig;
use crate::provider::{FetchOutcome, Provider};
use crate::upstream::{MatchDto, TimelineDto};
use crate::{ConfigError, HarvestError};
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const API_KEY_HEADER: &str = "X-Riot-Token";

/// Builds an HTTP client that authenticates every request
///
/// # Arguments
///
/// * `config` - The provider configuration (timeouts)
/// * `api_key` - The resolved API key
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - The key is not a valid header value or the client failed to build
pub fn build_http_client(config: &ProviderConfig, api_key: &str) -> Result<Client, HarvestError> {
    let mut token = HeaderValue::from_str(api_key)
        .map_err(|_| ConfigError::Validation("API key is not a valid header value".to_string()))?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, token);

    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Provider backed by the upstream REST API
#[derive(Debug, Clone)]
pub struct RiotProvider {
    client: Client,
    base_url: Url,
}

impl RiotProvider {
    /// Creates a provider for the configured platform
    ///
    /// Requests go to `base-url` when set, otherwise to the platform's
    /// regional routing host.
    pub fn new(config: &ProviderConfig, api_key: &str) -> Result<Self, HarvestError> {
        let base = config
            .base_url
            .clone()
            .unwrap_or_else(|| config.platform.route().api_base_url());
        let base_url = Url::parse(&base).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(base).into());
        }

        Ok(Self {
            client: build_http_client(config, api_key)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a match resource, with optional trailing segments
    fn endpoint(&self, match_id: &str, suffix: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["lol", "match", "v5", "matches", match_id]);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        match_id: &str,
        url: Url,
    ) -> Result<FetchOutcome<T>, HarvestError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Ok(FetchOutcome::ConnectionFailure { reason: describe(&e) }),
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotFound);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Ok(FetchOutcome::RateLimited { retry_after });
        }

        if status.is_server_error() {
            return Ok(FetchOutcome::ConnectionFailure {
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        if !status.is_success() {
            return Err(HarvestError::UpstreamRejected {
                match_id: match_id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Ok(FetchOutcome::ConnectionFailure { reason: describe(&e) }),
        };

        serde_json::from_slice(&body)
            .map(FetchOutcome::Found)
            .map_err(|source| HarvestError::Decode {
                match_id: match_id.to_string(),
                source,
            })
    }
}

impl Provider for RiotProvider {
    async fn fetch_summary(&self, match_id: &str) -> Result<FetchOutcome<MatchDto>, HarvestError> {
        let url = self.endpoint(match_id, None);
        self.get_json(match_id, url).await
    }

    async fn fetch_timeline(
        &self,
        match_id: &str,
    ) -> Result<FetchOutcome<TimelineDto>, HarvestError> {
        let url = self.endpoint(match_id, Some("timeline"));
        self.get_json(match_id, url).await
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    }
}
