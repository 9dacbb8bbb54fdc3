mod common;

use common::{init_tracing, ATOM_FEED};
use paper_summarizer::{ErrorKind, FetchConfig, Fetcher, QueryParams};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pairs(value: serde_json::Value) -> QueryParams {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_raw_query_appended_verbatim() {
    let query = QueryParams::Raw("search_query=all:electron&max_results=3".to_string());
    let url = Fetcher::build_query_url("http://export.arxiv.org/api/query", &query).unwrap();

    assert_eq!(
        url.as_str(),
        "http://export.arxiv.org/api/query?search_query=all:electron&max_results=3"
    );
}

#[test]
fn test_raw_query_keeps_existing_query() {
    let query = QueryParams::Raw("max_results=3".to_string());
    let url = Fetcher::build_query_url("http://example.com/feed?sort=new", &query).unwrap();

    assert_eq!(url.query(), Some("sort=new&max_results=3"));
}

#[test]
fn test_object_query_encoded_as_pairs() {
    let query = pairs(json!({
        "search_query": "all:electron",
        "max_results": 5,
        "cat": ["cs.AI", "cs.LG"],
        "skip": null
    }));
    let url = Fetcher::build_query_url("http://example.com/api", &query).unwrap();

    let found: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(found.contains(&("search_query".to_string(), "all:electron".to_string())));
    assert!(found.contains(&("max_results".to_string(), "5".to_string())));
    assert_eq!(found.iter().filter(|(k, _)| k == "cat").count(), 2);
    assert!(!found.iter().any(|(k, _)| k == "skip"));
}

#[test]
fn test_invalid_url_is_transport_error() {
    let query = QueryParams::Raw("q=1".to_string());
    let err = Fetcher::build_query_url("not a url", &query).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_fetch_with_query_sends_parameters() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("search_query", "all:electron"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ATOM_FEED))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    let body = fetcher
        .fetch_with_query(
            &format!("{}/api/query", server.uri()),
            &QueryParams::Raw("search_query=all:electron".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(body, ATOM_FEED);
}

#[tokio::test]
async fn test_error_status_body_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not here</p>"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    let body = fetcher.fetch(&format!("{}/missing", server.uri())).await.unwrap();

    assert_eq!(body, b"<p>Not here</p>".to_vec());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let fetcher = Fetcher::new(&FetchConfig {
        timeout_seconds: Some(5),
        ..FetchConfig::default()
    })
    .unwrap();

    let err = fetcher.fetch("http://127.0.0.1:1/feed").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
