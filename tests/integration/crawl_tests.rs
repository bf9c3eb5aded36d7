//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the upstream match API, plus a
//! scripted in-process provider where exact call counts matter.

mod common;

use common::{create_test_config, summary_json, timeline_json};
use match_harvester::config::NotFoundConfig;
use match_harvester::provider::{FetchOutcome, Provider, RiotProvider};
use match_harvester::storage::{Gateway, SqliteStorage, Table};
use match_harvester::upstream::{MatchDto, TimelineDto};
use match_harvester::{Crawler, HarvestError, StepOutcome};
use serde_json::Value;
use std::cell::Cell;
use std::collections::HashMap;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARY_PATH: &str = "/lol/match/v5/matches/RU_100";
const TIMELINE_PATH: &str = "/lol/match/v5/matches/RU_100/timeline";

/// Provider answering from in-memory documents
#[derive(Default)]
struct ScriptedProvider {
    summaries: HashMap<String, Value>,
    timelines: HashMap<String, Value>,
    reject_all: bool,
    calls: Cell<u32>,
}

impl ScriptedProvider {
    fn with_match(mut self, match_id: &str) -> Self {
        self.summaries
            .insert(match_id.to_string(), summary_json(match_id));
        self.timelines
            .insert(match_id.to_string(), timeline_json(match_id));
        self
    }

    fn lookup<T: serde::de::DeserializeOwned>(
        &self,
        docs: &HashMap<String, Value>,
        match_id: &str,
    ) -> Result<FetchOutcome<T>, HarvestError> {
        self.calls.set(self.calls.get() + 1);
        if self.reject_all {
            return Err(HarvestError::UpstreamRejected {
                match_id: match_id.to_string(),
                status: 403,
            });
        }
        match docs.get(match_id) {
            Some(doc) => Ok(FetchOutcome::Found(serde_json::from_value(doc.clone()).unwrap())),
            None => Ok(FetchOutcome::NotFound),
        }
    }
}

impl Provider for ScriptedProvider {
    async fn fetch_summary(&self, match_id: &str) -> Result<FetchOutcome<MatchDto>, HarvestError> {
        self.lookup(&self.summaries, match_id)
    }

    async fn fetch_timeline(
        &self,
        match_id: &str,
    ) -> Result<FetchOutcome<TimelineDto>, HarvestError> {
        self.lookup(&self.timelines, match_id)
    }
}

#[tokio::test]
async fn test_full_crawl_persists_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .and(header("X-Riot-Token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("RU_100")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(TIMELINE_PATH))
        .and(header("X-Riot-Token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_json("RU_100")))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Everything else falls through to wiremock's default 404

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("matches.db");
    let config = create_test_config(
        Some(&mock_server.uri()),
        db_path.to_str().unwrap(),
        100,
    );

    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();
    let storage = SqliteStorage::new(&db_path).unwrap();
    let mut crawler = Crawler::new(&config, provider, storage);

    crawler.run_for(3).await.unwrap();

    assert_eq!(crawler.index(), 103);
    assert_eq!(crawler.last_found(), 100);

    let storage = crawler.gateway();
    assert!(storage.exists("RU_100").unwrap());
    assert!(!storage.exists("RU_101").unwrap());
    assert_eq!(storage.count_rows(Table::Matches).unwrap(), 1);
    assert_eq!(storage.count_rows(Table::Participants).unwrap(), 10);
    assert_eq!(storage.count_rows(Table::Teams).unwrap(), 2);
    assert_eq!(storage.count_rows(Table::Bans).unwrap(), 3);
    assert_eq!(storage.count_rows(Table::Perks).unwrap(), 60);
    assert_eq!(storage.count_rows(Table::Missions).unwrap(), 1);
    assert_eq!(storage.count_rows(Table::Challenges).unwrap(), 1);
    assert_eq!(storage.count_rows(Table::ChallengeLinks).unwrap(), 1);
    assert_eq!(storage.count_rows(Table::Frames).unwrap(), 3);
    assert_eq!(storage.count_rows(Table::ParticipantFrames).unwrap(), 30);
    assert_eq!(storage.count_rows(Table::Events).unwrap(), 9);
    assert_eq!(storage.latest_match_id().unwrap().as_deref(), Some("RU_100"));
}

#[tokio::test]
async fn test_scripted_crawl_stores_match() {
    let mut crawler = Crawler::new(
        &create_test_config(None, "unused", 100),
        ScriptedProvider::default().with_match("RU_100"),
        SqliteStorage::new_in_memory().unwrap(),
    );

    let first = crawler.step().await.unwrap();

    assert!(matches!(first, StepOutcome::Stored { .. }));
    assert_eq!(crawler_calls(&crawler), 2);
    assert_eq!(crawler.gateway().count_rows(Table::EventAssists).unwrap(), 4);
    assert_eq!(
        crawler.gateway().count_rows(Table::VictimDamageReceived).unwrap(),
        2
    );
}

#[tokio::test]
async fn test_stored_match_is_not_fetched_again() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = match_harvester::transform(
        &common::summary("RU_100"),
        &common::timeline("RU_100"),
        &mut storage,
    )
    .unwrap();
    storage.store(&graph).unwrap();

    let provider = ScriptedProvider::default().with_match("RU_100");
    let mut again = Crawler::new(&create_test_config(None, "unused", 100), provider, storage);
    let outcome = again.step().await.unwrap();

    assert_eq!(outcome, StepOutcome::AlreadyStored);
    assert_eq!(crawler_calls(&again), 0);
    assert_eq!(again.gateway().count_rows(Table::Matches).unwrap(), 1);
    assert_eq!(again.index(), 101);
}

fn crawler_calls(crawler: &Crawler<ScriptedProvider, SqliteStorage>) -> u32 {
    crawler.provider().calls.get()
}

#[tokio::test]
async fn test_missing_timeline_is_inconsistent() {
    let mut provider = ScriptedProvider::default().with_match("RU_100");
    provider.timelines.clear();

    let mut crawler = Crawler::new(
        &create_test_config(None, "unused", 100),
        provider,
        SqliteStorage::new_in_memory().unwrap(),
    );

    let outcome = crawler.step().await.unwrap();

    assert_eq!(outcome, StepOutcome::Inconsistent);
    assert_eq!(crawler.consecutive_errors(), 0);
    assert_eq!(crawler.index(), 101);
    assert!(!crawler.gateway().exists("RU_100").unwrap());
    assert_eq!(crawler.gateway().count_rows(Table::Participants).unwrap(), 0);
}

#[tokio::test]
async fn test_error_limit_stops_crawl() {
    let mut config = create_test_config(None, "unused", 100);
    config.crawler.max_consecutive_errors = 2;

    let provider = ScriptedProvider {
        reject_all: true,
        ..Default::default()
    };
    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
    assert_eq!(crawler.consecutive_errors(), 2);

    let result = crawler.step().await;
    match result {
        Err(e @ HarvestError::ErrorLimitExceeded { count: 3 }) => assert!(e.is_fatal()),
        other => panic!("expected error limit, got {:?}", other),
    }

    // The cursor still moved past every failed index
    assert_eq!(crawler.index(), 103);
}

#[tokio::test]
async fn test_success_resets_error_counter() {
    let provider = ScriptedProvider::default().with_match("RU_100");
    let mut config = create_test_config(None, "unused", 99);
    config.crawler.max_consecutive_errors = 1;

    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    // 99 does not exist: a not-found iteration counts as success
    assert_eq!(crawler.step().await.unwrap(), StepOutcome::NotFound);
    assert_eq!(crawler.consecutive_errors(), 0);
    assert!(matches!(
        crawler.step().await.unwrap(),
        StepOutcome::Stored { .. }
    ));
    assert_eq!(crawler.consecutive_errors(), 0);
}

#[tokio::test]
async fn test_not_found_gap_is_fatal() {
    let mut config = create_test_config(None, "unused", 10);
    config.not_found = NotFoundConfig {
        warn: 1,
        error: 2,
        exit: 3,
    };

    let mut crawler = Crawler::new(
        &config,
        ScriptedProvider::default(),
        SqliteStorage::new_in_memory().unwrap(),
    );

    // Gaps 1, 2 and 3 from the implicit last hit at index 9
    for _ in 0..3 {
        assert_eq!(crawler.step().await.unwrap(), StepOutcome::NotFound);
    }

    let result = crawler.run().await;
    assert!(matches!(
        result,
        Err(HarvestError::NotFoundGapExceeded {
            last_found: 9,
            index: 13
        })
    ));
}

#[tokio::test]
async fn test_server_errors_are_retried_then_counted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(&mock_server.uri()), "unused", 100);
    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();
    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
    assert_eq!(crawler.consecutive_errors(), 1);
    assert_eq!(crawler.index(), 101);
}

#[tokio::test]
async fn test_rate_limit_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("RU_100")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(TIMELINE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_json("RU_100")))
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(&mock_server.uri()), "unused", 100);
    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();
    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    assert!(matches!(
        crawler.step().await.unwrap(),
        StepOutcome::Stored { .. }
    ));
}

#[tokio::test]
async fn test_rejected_key_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(&mock_server.uri()), "unused", 100);
    let provider = RiotProvider::new(&config.provider, "bad-key").unwrap();
    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
}

#[tokio::test]
async fn test_undecodable_body_fails_iteration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"metadata\": 1}"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(&mock_server.uri()), "unused", 100);
    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();

    let outcome = provider.fetch_summary("RU_100").await;
    assert!(matches!(outcome, Err(HarvestError::Decode { .. })));

    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());
    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
}

#[tokio::test]
async fn test_mismatched_match_id_is_rejected() {
    let mut provider = ScriptedProvider::default();
    provider
        .summaries
        .insert("RU_100".to_string(), summary_json("RU_999"));
    provider
        .timelines
        .insert("RU_100".to_string(), timeline_json("RU_999"));

    let mut crawler = Crawler::new(
        &create_test_config(None, "unused", 100),
        provider,
        SqliteStorage::new_in_memory().unwrap(),
    );

    assert_eq!(crawler.step().await.unwrap(), StepOutcome::Failed);
    assert!(!crawler.gateway().exists("RU_999").unwrap());
}

#[tokio::test]
async fn test_provider_classifies_status_codes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/RU_1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/RU_2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(Some(&mock_server.uri()), "unused", 1);
    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();

    assert!(matches!(
        provider.fetch_summary("RU_1").await.unwrap(),
        FetchOutcome::RateLimited {
            retry_after: Some(7)
        }
    ));
    assert!(matches!(
        provider.fetch_summary("RU_2").await.unwrap(),
        FetchOutcome::ConnectionFailure { .. }
    ));
    assert!(matches!(
        provider.fetch_summary("RU_3").await.unwrap(),
        FetchOutcome::NotFound
    ));
}

#[tokio::test]
async fn test_throttled_timeline_is_not_inconsistent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("RU_100")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(TIMELINE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(Some(&mock_server.uri()), "unused", 100);
    config.retry.retry_rate_limited = false;

    let provider = RiotProvider::new(&config.provider, "test-key").unwrap();
    let mut crawler = Crawler::new(&config, provider, SqliteStorage::new_in_memory().unwrap());

    assert_eq!(crawler.step().await.unwrap(), StepOutcome::RateLimited);
    assert_eq!(crawler.consecutive_errors(), 0);
    assert_eq!(crawler.index(), 101);
    assert!(!crawler.gateway().exists("RU_100").unwrap());
}
