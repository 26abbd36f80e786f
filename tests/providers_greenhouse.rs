// tests/providers_greenhouse.rs
use std::time::Duration;

use job_radar::ingest::http::JsonFetcher;
use job_radar::ingest::providers::greenhouse::GreenhouseProvider;
use job_radar::ingest::types::SourceProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GREENHOUSE_JSON: &str = include_str!("fixtures/greenhouse_jobs.json");

fn fetcher() -> JsonFetcher {
    JsonFetcher::new(Duration::from_secs(5))
        .unwrap()
        .with_backoff_base(Duration::from_millis(1))
}

#[tokio::test]
async fn greenhouse_fixture_parses_and_skips_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/boards/acme/jobs"))
        .and(query_param("content", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GREENHOUSE_JSON))
        .mount(&server)
        .await;

    let provider = GreenhouseProvider::new("acme", fetcher()).with_base_url(&server.uri());
    let items = provider.fetch_latest().await.expect("greenhouse fetch ok");

    assert_eq!(items.len(), 3, "url-less and non-object records are skipped");
    assert!(items.iter().all(|p| p.source == "greenhouse:acme"));
    assert!(items.iter().all(|p| p.company == "Acme"));

    let first = &items[0];
    assert_eq!(first.title, "Software Engineer, New Grad");
    assert_eq!(first.location, "San Francisco, CA");
    assert_eq!(
        first.description,
        "Join our platform team. Python SQL We offer H-1B visa sponsorship."
    );
    assert_eq!(first.date_posted.as_deref(), Some("2024-03-01T15:15:00Z"));

    assert_eq!(items[1].date_posted, None, "bad dates become None");
    assert_eq!(items[2].location, "");
    assert_eq!(items[2].description, "");
    assert_eq!(items[2].date_posted.as_deref(), Some("2024-02-10T00:00:00Z"));
}

#[tokio::test]
async fn greenhouse_404_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/boards/missing/jobs"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = GreenhouseProvider::new("missing", fetcher()).with_base_url(&server.uri());
    let err = provider.fetch_latest().await.unwrap_err();
    assert!(format!("{err:#}").contains("404"));
}

#[tokio::test]
async fn greenhouse_malformed_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let provider = GreenhouseProvider::new("acme", fetcher()).with_base_url(&server.uri());
    assert!(provider.fetch_latest().await.is_err());
}
