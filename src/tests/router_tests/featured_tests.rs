// src/tests/router_tests/featured_tests.rs
use crate::tests::utils::{call, call_all, test_config, test_config_with};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARDS: &str = include_str!("../../featured/fixtures/featured_cards.html");
const EMPTY_PAGE: &str = "<html><body><p>This agent has no featured listings.</p></body></html>";

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/html; charset=utf-8")
        .set_body_string(body)
}

#[tokio::test(flavor = "multi_thread")]
async fn featured_returns_extracted_listings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("agent_number", "A100"))
        .respond_with(html(CARDS))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        test_config(&server.uri()),
        "/api/har/featured?agent_number=A100",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    let listings = body["listings"].as_array().unwrap();
    assert_eq!(listings.len(), 4);
    assert_eq!(
        listings[0]["url"],
        "https://www.har.com/homedetail/1204-elm-st-houston-tx-77002/5551001"
    );
    assert_eq!(listings[0]["price"], "$325,000");
    assert_eq!(listings[1]["sqft"], "4210");
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_request_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .respond_with(html(CARDS))
        .expect(1)
        .mount(&server)
        .await;

    let uri = "/api/har/featured?agent_number=A100".to_string();
    let results = call_all(test_config(&server.uri()), vec![uri.clone(), uri]).await;

    assert_eq!(results[0].0, 200);
    assert_eq!(results[1].0, 200);
    assert_eq!(results[0].1, results[1].1);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_agent_page_falls_back_to_cid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("agent_number", "A100"))
        .respond_with(html(EMPTY_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("cid", "C7"))
        .respond_with(html(CARDS))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        test_config(&server.uri()),
        "/api/har/featured?agent_number=A100&cid=C7",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["listings"].as_array().unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_agent_page_falls_back_to_default_cid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("agent_number", "A100"))
        .respond_with(html(EMPTY_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("cid", "C9"))
        .respond_with(html(CARDS))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config_with(&server.uri(), &[("HAR_DEFAULT_CID", "C9")]);
    let (status, body) = call(config, "/api/har/featured?agent_number=A100").await;

    assert_eq!(status, 200);
    assert_eq!(body["listings"].as_array().unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_agent_page_without_any_cid_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/idx/featured"))
        .and(query_param("agent_number", "A100"))
        .respond_with(html(EMPTY_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        test_config(&server.uri()),
        "/api/har/featured?agent_number=A100",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "ok": true, "listings": [] }));
}

#[tokio::test(flavor = "multi_thread")]
async fn page_without_listings_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(EMPTY_PAGE))
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/har/featured?cid=C7").await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "ok": true, "listings": [] }));
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_rejection_is_500_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let (status, body) = call(
        test_config(&server.uri()),
        "/api/har/featured?agent_number=A100",
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("HTTP 403"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_identifier_never_fetches() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(html(CARDS))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _) = call(test_config(&server.uri()), "/api/har/featured").await;

    assert_eq!(status, 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_returns_status_and_snippet() {
    let long_page = format!("<html><body>{}</body></html>", "x".repeat(5000));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("cid", "C7"))
        .respond_with(ResponseTemplate::new(404).set_body_string(long_page.clone()))
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/har/raw?cid=C7").await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], false);
    assert_eq!(body["status"], 404);
    assert_eq!(body["url"], format!("{}/idx/featured?cid=C7", server.uri()));
    assert_eq!(body["length"], long_page.len());
    assert_eq!(body["snippet"].as_str().unwrap().len(), 2000);
}
