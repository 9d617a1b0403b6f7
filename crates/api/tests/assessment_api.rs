//! Integration tests for the panel-wide assessment endpoint.

mod common;

use axum::http::StatusCode;
use common::{all_safe_state, body_json, build_test_app, empty_state, get, put_json, seeded_state};
use serde_json::json;

#[tokio::test]
async fn all_safe_panel_is_normal() {
    let app = build_test_app(all_safe_state());
    let response = get(app, "/api/v1/assessment").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["assessment"]["counts"]["safe"], 10);
    assert_eq!(data["assessment"]["counts"]["warning"], 0);
    assert_eq!(data["assessment"]["counts"]["danger"], 0);
    assert_eq!(data["assessment"]["overall"], "NORMAL");
    assert_eq!(data["headline"], "Normal Market");
    assert_eq!(data["automated_gauges"], 5);
    assert_eq!(data["manual_gauges"], 5);
}

#[tokio::test]
async fn reference_readings_are_caution() {
    let app = build_test_app(seeded_state());
    let json = body_json(get(app, "/api/v1/assessment").await).await;

    let data = &json["data"];
    assert_eq!(data["assessment"]["counts"]["warning"], 9);
    assert_eq!(data["assessment"]["counts"]["danger"], 1);
    assert_eq!(data["assessment"]["overall"], "CAUTION");
    assert_eq!(data["recommended_action"], "Increase vigilance, review positions");
    assert_eq!(data["readings"]["valuation-metrics"]["value"], 34.2);
}

#[tokio::test]
async fn empty_session_reports_unclassified_gauges() {
    let app = build_test_app(empty_state());
    let json = body_json(get(app, "/api/v1/assessment").await).await;

    let counts = &json["data"]["assessment"]["counts"];
    assert_eq!(counts["unclassified"], 10);
    assert_eq!(json["data"]["assessment"]["overall"], "NORMAL");
    assert!(json["data"]["assessment"]["gauges"][0]["level"].is_null());
}

#[tokio::test]
async fn four_danger_gauges_is_bubble() {
    let app = build_test_app(all_safe_state());

    for (id, value) in [
        ("capex-revenue", 0.9),
        ("application-maturity", 10.0),
        ("valuation-metrics", 41.0),
        ("geographic-concentration", 90.0),
    ] {
        let response = put_json(
            app.clone(),
            &format!("/api/v1/gauges/{id}/reading"),
            json!({ "value": value, "trend": "worsening" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get(app, "/api/v1/assessment").await).await;
    assert_eq!(json["data"]["assessment"]["counts"]["danger"], 4);
    assert_eq!(json["data"]["assessment"]["overall"], "BUBBLE");
    assert_eq!(json["data"]["headline"], "Bubble Territory");
}

#[tokio::test]
async fn two_danger_gauges_is_overheating() {
    let app = build_test_app(all_safe_state());

    for (id, value) in [("debt-financing", 1.4), ("regulatory-risk", 80.0)] {
        let response = put_json(
            app.clone(),
            &format!("/api/v1/gauges/{id}/reading"),
            json!({ "value": value, "trend": "rising" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get(app, "/api/v1/assessment").await).await;
    assert_eq!(json["data"]["assessment"]["counts"]["danger"], 2);
    assert_eq!(json["data"]["assessment"]["overall"], "OVERHEATING");
}

#[tokio::test]
async fn reference_readings_are_all_reported_stale() {
    let app = build_test_app(seeded_state());
    let json = body_json(get(app, "/api/v1/assessment").await).await;

    let stale = json["data"]["stale_gauges"].as_array().unwrap();
    assert_eq!(stale.len(), 10);
    assert_eq!(stale[0], "capex-revenue");
    // Stale readings still drive the verdict.
    assert_eq!(json["data"]["assessment"]["overall"], "CAUTION");
}

#[tokio::test]
async fn only_old_readings_are_listed_as_stale() {
    let app = build_test_app(empty_state());

    let response = put_json(
        app.clone(),
        "/api/v1/gauges/sentiment-speculation/reading",
        json!({ "value": 62.0, "trend": "rising", "last_update": "2020-01-01T00:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        app.clone(),
        "/api/v1/gauges/market-concentration/reading",
        json!({ "value": 58.0, "trend": "rising" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/assessment").await).await;
    assert_eq!(json["data"]["stale_gauges"], json!(["sentiment-speculation"]));
}
