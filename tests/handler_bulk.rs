mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::{DelayedProber, FixedProber, GaugeProber, Source, TestStateBuilder, Verdict};
use std::time::Duration;
use domain_checker::api::handlers::bulk_handler;
use domain_checker::state::AppState;
use serde_json::json;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/bulk", post(bulk_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_bulk_preserves_input_order() {
    let whois = DelayedProber::new(Source::Whois);
    let dns = DelayedProber::new(Source::Dns);
    let server = server(TestStateBuilder::new(whois.clone(), dns.clone()).build());

    let response = server
        .post("/bulk")
        .json(&json!({
            "domains": ["slow300", "fast", "slow150", "slow10", "quick"],
            "tld": "net"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let domains: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["domain"].as_str().unwrap())
        .collect();

    assert_eq!(
        domains,
        vec!["slow300.net", "fast.net", "slow150.net", "slow10.net", "quick.net"]
    );
    assert_eq!(whois.calls(), 5);
    assert_eq!(dns.calls(), 5);
}

#[tokio::test]
async fn test_bulk_rejects_invalid_items_inline() {
    let server = server(common::create_test_state(Verdict::Taken, Verdict::Taken));

    let json = server
        .post("/bulk")
        .json(&json!({ "domains": ["example", "not valid", "test"] }))
        .await
        .json::<serde_json::Value>();

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["domain"], "example.com");
    assert_eq!(results[0]["status"], "taken");

    assert_eq!(results[1]["domain"], "not valid.com");
    assert_eq!(results[1]["status"], "error");
    assert_eq!(results[1]["error"], "Invalid domain name format");

    assert_eq!(results[2]["domain"], "test.com");
    assert_eq!(results[2]["cached"], false);
}

#[tokio::test]
async fn test_bulk_too_many_domains_probes_nothing() {
    let whois = FixedProber::new(Source::Whois, Verdict::Available);
    let dns = FixedProber::new(Source::Dns, Verdict::Available);
    let server = server(
        TestStateBuilder::new(whois.clone(), dns.clone())
            .max_bulk_domains(3)
            .build(),
    );

    let response = server
        .post("/bulk")
        .json(&json!({ "domains": ["a", "b", "c", "d"] }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Invalid request");
    assert!(json["message"].as_str().unwrap().contains("Maximum 3 domains"));
    assert_eq!(whois.calls(), 0);
    assert_eq!(dns.calls(), 0);
}

#[tokio::test]
async fn test_bulk_invalid_tld_probes_nothing() {
    let whois = FixedProber::new(Source::Whois, Verdict::Available);
    let dns = FixedProber::new(Source::Dns, Verdict::Available);
    let server = server(TestStateBuilder::new(whois.clone(), dns.clone()).build());

    let response = server
        .post("/bulk")
        .json(&json!({ "domains": ["example"], "tld": "123" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["message"],
        "Invalid TLD format"
    );
    assert_eq!(whois.calls(), 0);
}

#[tokio::test]
async fn test_bulk_empty_list() {
    let server = server(common::create_test_state(Verdict::Available, Verdict::Available));

    let response = server.post("/bulk").json(&json!({ "domains": [] })).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "results": [] })
    );
}

#[tokio::test]
async fn test_bulk_malformed_body() {
    let server = server(common::create_test_state(Verdict::Available, Verdict::Available));

    let not_a_list = server
        .post("/bulk")
        .json(&json!({ "domains": "example" }))
        .await;
    not_a_list.assert_status_bad_request();
    assert_eq!(
        not_a_list.json::<serde_json::Value>()["error"],
        "Invalid request"
    );

    let not_json = server.post("/bulk").text("domains=example").await;
    not_json.assert_status_bad_request();
}

#[tokio::test]
async fn test_bulk_respects_concurrency_cap() {
    let whois = GaugeProber::new(Source::Whois, Duration::from_millis(50));
    let dns = FixedProber::new(Source::Dns, Verdict::Available);
    let server = server(
        TestStateBuilder::new(whois.clone(), dns)
            .bulk_concurrency(3)
            .build(),
    );

    let domains: Vec<String> = (0..10).map(|i| format!("name{i}")).collect();

    let json = server
        .post("/bulk")
        .json(&json!({ "domains": domains }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["results"].as_array().unwrap().len(), 10);
    assert!(whois.peak() <= 3, "peak {} exceeds cap", whois.peak());
    assert!(whois.peak() > 1, "checks never overlapped");
}
