#![allow(clippy::unwrap_used)]
// Integration tests for `GraphqlClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitewatch_api::{CreateWebsiteVars, Error, GraphqlClient, WireTimestamp};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GraphqlClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = GraphqlClient::with_client(reqwest::Client::new(), base_url, "/graphql").unwrap();
    (server, client)
}

fn operation(name: &str) -> wiremock::matchers::BodyPartialJsonMatcher {
    body_partial_json(json!({ "operationName": name }))
}

// ── Liveness ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ping_any_status_counts_as_awake() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert_eq!(client.ping().await.unwrap(), 404);
}

#[tokio::test]
async fn test_ping_unreachable_is_error() {
    let client = GraphqlClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
        "/graphql",
    )
    .unwrap();

    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}

// ── Queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_websites() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(operation("getWebsites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getWebsites": [
                    {
                        "id": "w1",
                        "url": "http://example.com",
                        "monitered": true,
                        "latestStatus": 200,
                        "title": "Example"
                    },
                    {
                        "id": "w2",
                        "url": "http://down.example",
                        "monitered": false,
                        "latestStatus": null,
                        "title": null
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    let websites = client.get_websites().await.unwrap();

    assert_eq!(websites.len(), 2);
    assert_eq!(websites[0].id, "w1");
    assert_eq!(websites[0].monitered, Some(true));
    assert_eq!(websites[0].latest_status, Some(200));
    assert_eq!(websites[0].title.as_deref(), Some("Example"));
    assert_eq!(websites[1].latest_status, None);
}

#[tokio::test]
async fn test_check_status_sends_website_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "checkStatus",
            "variables": { "websiteId": "w1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "checkStatus": { "statusCode": 503, "timestamp": "1718447400000" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let check = client.check_status("w1").await.unwrap();

    assert_eq!(check.status_code, 503);
    assert_eq!(
        check.timestamp,
        Some(WireTimestamp::Text("1718447400000".into()))
    );
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_website_sends_nulls_for_absent_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "createWebsite",
            "variables": { "url": "http://example.com", "email": null, "title": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createWebsite": {
                    "id": "w9",
                    "url": "http://example.com",
                    "monitered": false,
                    "latestStatus": null
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_website(&CreateWebsiteVars {
            url: "http://example.com",
            email: None,
            title: None,
        })
        .await
        .unwrap();

    assert_eq!(created.id, "w9");
    assert_eq!(created.monitered, Some(false));
}

#[tokio::test]
async fn test_delete_website_returns_verdict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(operation("deleteWebsite"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleteWebsite": true } })),
        )
        .mount(&server)
        .await;

    assert!(client.delete_website("w1").await.unwrap());
}

#[tokio::test]
async fn test_start_monitoring_null_result_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(operation("startMonitoring"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "startMonitoring": null } })),
        )
        .mount(&server)
        .await;

    assert_eq!(client.start_monitoring("w1").await.unwrap(), None);
}

#[tokio::test]
async fn test_stop_monitoring_returns_updated_website() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(operation("stopMonitoring"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "stopMonitoring": {
                    "id": "w1",
                    "url": "http://example.com",
                    "latestStatus": 200,
                    "monitered": false
                }
            }
        })))
        .mount(&server)
        .await;

    let website = client.stop_monitoring("w1").await.unwrap();
    assert_eq!(website.monitered, Some(false));
}

#[tokio::test]
async fn test_get_report_history() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(operation("getReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getReport": {
                    "id": "w1",
                    "url": "http://example.com",
                    "history": [
                        { "statusCode": 200, "timestamp": 1 },
                        { "statusCode": 500, "timestamp": 2 },
                        { "statusCode": 200, "timestamp": 3 }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let report = client.get_report("w1").await.unwrap();

    assert_eq!(report.url, "http://example.com");
    let codes: Vec<i32> = report.history.iter().map(|c| c.status_code).collect();
    assert_eq!(codes, vec![200, 500, 200]);
}

// ── Error envelopes ─────────────────────────────────────────────────

#[tokio::test]
async fn test_graphql_errors_surface_first_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Website not found" },
                { "message": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let err = client.stop_monitoring("missing").await.unwrap_err();

    match err {
        Error::GraphQl { message, all } => {
            assert_eq!(message, "Website not found");
            assert_eq!(all.len(), 2);
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_error_with_http_400() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "message": "Variable \"$url\" of required type \"String!\" was not provided." }]
        })))
        .mount(&server)
        .await;

    let err = client
        .create_website(&CreateWebsiteVars {
            url: "",
            email: None,
            title: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GraphQl { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_http_error_without_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Application Error"))
        .mount(&server)
        .await;

    let err = client.get_websites().await.unwrap_err();

    assert!(
        matches!(err, Error::Http { status: 503, .. }),
        "got: {err:?}"
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_missing_field_is_missing_data() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let err = client.get_websites().await.unwrap_err();

    assert!(
        matches!(err, Error::MissingData { operation: "getWebsites" }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sleeping</html>"))
        .mount(&server)
        .await;

    let err = client.get_websites().await.unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}
