// src/tests/router_tests/listing_tests.rs
use crate::tests::utils::{call, test_config, TEST_API_KEY};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn listing_is_fetched_with_bearer_token_and_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/HAR123"))
        .and(header("Authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "ListingID": "HAR123",
                "ListPrice": 450000,
                "Address": { "Full": "1204 Elm St", "City": "Houston", "StateOrProvince": "TX", "PostalCode": "77002" },
                "BedroomsTotal": 3,
                "BathroomsTotalInteger": 2,
                "LivingArea": 1850,
                "YearBuilt": 2004,
                "InteriorFeatures": "Fireplace, Wet Bar",
                "PublicURL": "https://idx.example.com/HAR123"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/listing?mlsId=HAR123").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "id": "HAR123",
            "price": "$450,000",
            "address": "1204 Elm St, Houston, TX, 77002",
            "beds": 3,
            "baths": 2,
            "sqft": 1850,
            "lot": "",
            "year": 2004,
            "features": ["Fireplace", "Wet Bar"],
            "brochureUrl": "#",
            "idxUrl": "https://idx.example.com/HAR123"
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_status_and_body_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/listing?mlsId=missing").await;

    assert_eq!(status, 404);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Upstream error");
    assert_eq!(body["detail"], "not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_upstream_json_is_server_exception() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/listing?mlsId=X1").await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "ok": false, "error": "Server exception" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn body_without_data_wrapper_is_mapped_directly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/listings/X2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mlsNumber": "X2",
            "listPriceFormatted": "$610,000",
            "property": { "bedrooms": 4, "features": ["Pool"] }
        })))
        .mount(&server)
        .await;

    let (status, body) = call(test_config(&server.uri()), "/api/listing?mlsId=X2").await;

    assert_eq!(status, 200);
    assert_eq!(body["id"], "X2");
    assert_eq!(body["price"], "$610,000");
    assert_eq!(body["beds"], 4);
    assert_eq!(body["features"], json!(["Pool"]));
}
