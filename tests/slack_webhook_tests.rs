// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Slack webhook delivery tests.
//!
//! A local `wiremock` server stands in for the incoming-webhook endpoint so
//! no real network traffic is made.

use dealer_checkin::error::AppError;
use dealer_checkin::models::ActivityEntry;
use dealer_checkin::services::notifier::deliver;
use dealer_checkin::services::scoring;
use dealer_checkin::services::{Notifier, ReportMessage, SlackNotifier};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn report() -> ReportMessage {
    let entries = [ActivityEntry {
        cars_sold: 2,
        description: Some("Delivered two Tellurides".to_string()),
        ..Default::default()
    }];
    let aggregate = scoring::aggregate(&entries);
    ReportMessage::build("Dana", "2026-03-02", &entries, &aggregate, None)
}

fn notifier_for(server: &MockServer) -> SlackNotifier {
    SlackNotifier::new(
        Some(format!("{}/services/hook", server.uri())),
        Duration::from_secs(5),
    )
    .expect("failed to build SlackNotifier")
}

#[tokio::test]
async fn test_webhook_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/hook"))
        .and(body_partial_json(
            json!({"text": "📊 Daily Activity Report - Dana"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let result = notifier_for(&server).send(&report()).await;
    assert_eq!(result.unwrap(), "Successfully sent to Slack");
}

#[tokio::test]
async fn test_webhook_payload_blocks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    notifier_for(&server).send(&report()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let payload: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let blocks = payload["blocks"].as_array().unwrap();
    assert_eq!(blocks[0]["type"], "header");
    assert_eq!(
        blocks[1]["elements"][0]["text"],
        "*Date:* 2026-03-02 | *Total Score:* 20 points | *📍 Location:* Unknown Location"
    );
    assert_eq!(blocks[3]["fields"].as_array().unwrap().len(), 7);
    assert_eq!(
        blocks[4]["text"]["text"],
        "*🕐 Hourly Activities:*\n*Hour 1:* Delivered two Tellurides ⭐⭐⭐⭐⭐"
    );
}

#[tokio::test]
async fn test_webhook_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/hook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid_payload"))
        .mount(&server)
        .await;

    let err = notifier_for(&server).send(&report()).await.unwrap_err();
    assert!(matches!(err, AppError::NotificationDeliveryFailed(_)));
    assert!(err.to_string().contains("Slack API error: 500 invalid_payload"));
}

#[tokio::test]
async fn test_deliver_reports_failure_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
        .mount(&server)
        .await;

    let notifier = notifier_for(&server);
    let outcome = deliver(&notifier, &report(), Duration::from_secs(5)).await;
    assert!(!outcome.delivered);
    assert!(outcome.detail.contains("404 no_service"));
}

#[tokio::test]
async fn test_deliver_times_out_slow_webhook() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let notifier = notifier_for(&server);
    let outcome = deliver(&notifier, &report(), Duration::from_millis(200)).await;
    assert!(!outcome.delivered);
    assert!(outcome.detail.contains("timed out"));
}
