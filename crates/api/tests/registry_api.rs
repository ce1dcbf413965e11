//! End-to-end tests for the registry operations over HTTP.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::http::Method;
use common::{
    asset_body, build_test_app, build_test_app_with, delete, expect_status, get, post_json,
    put_json, register, send, test_config, EXECUTIVE,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Registration and reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_id_height_and_custodian() {
    let app = build_test_app();
    let response = post_json(&app, "/api/v1/assets", "alice", asset_body("doc-1")).await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["data"]["asset_id"], 1);
    assert_eq!(json["data"]["height"], 1);
    assert_eq!(json["data"]["custodian"], "alice");

    let json = expect_status(get(&app, "/api/v1/assets/1", "alice").await, StatusCode::OK).await;
    let record = &json["data"];
    assert_eq!(record["content_descriptor"], "doc-1");
    assert_eq!(record["storage_capacity"], 500);
    assert_eq!(record["summary"], "s");
    assert_eq!(record["classification_markers"], json!(["a"]));
    assert_eq!(record["custodian"], "alice");
    assert_eq!(record["created_at"], 1);
}

#[tokio::test]
async fn strangers_cannot_read_records() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;

    let json = expect_status(
        get(&app, &format!("/api/v1/assets/{id}"), "mallory").await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "PRIVILEGE_VIOLATION");

    // The executive can always read.
    let response = get(&app, &format!("/api/v1/assets/{id}"), EXECUTIVE).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Modify / transfer scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transfer_scenario() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let uri = format!("/api/v1/assets/{id}");

    let json = expect_status(
        put_json(&app, &uri, "bob", asset_body("by-bob")).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "OWNERSHIP_MISMATCH");

    let response = post_json(
        &app,
        &format!("{uri}/transfer"),
        "alice",
        json!({"successor": "bob"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(&app, &uri, "bob", asset_body("by-bob")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(
        put_json(&app, &uri, "alice", asset_body("by-alice")).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "OWNERSHIP_MISMATCH");

    // Former custodian keeps its grant.
    let json = expect_status(
        get(&app, &format!("{uri}/access/alice"), "bob").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["granted"], true);

    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["custodian"], "bob");
    assert_eq!(json["data"]["content_descriptor"], "by-bob");
    assert_eq!(json["data"]["created_at"], 1);
}

#[tokio::test]
async fn self_transfer_is_privilege_violation() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;

    let json = expect_status(
        post_json(
            &app,
            &format!("/api/v1/assets/{id}/transfer"),
            "alice",
            json!({"successor": "alice"}),
        )
        .await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "PRIVILEGE_VIOLATION");
}

#[tokio::test]
async fn blank_successor_is_rejected_and_custody_kept() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let uri = format!("/api/v1/assets/{id}");

    for successor in ["", "   "] {
        let json = expect_status(
            post_json(&app, &format!("{uri}/transfer"), "alice", json!({"successor": successor}))
                .await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    let oversized = "p".repeat(129);
    let response = post_json(
        &app,
        &format!("{uri}/transfer"),
        "alice",
        json!({"successor": oversized}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["custodian"], "alice");
    let response = put_json(&app, &uri, "alice", asset_body("still-mine")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn successor_is_trimmed_like_the_caller_header() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let uri = format!("/api/v1/assets/{id}");

    let response = post_json(
        &app,
        &format!("{uri}/transfer"),
        "alice",
        json!({"successor": " bob "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(get(&app, &uri, "bob").await, StatusCode::OK).await;
    assert_eq!(json["data"]["custodian"], "bob");
    let response = put_json(&app, &uri, "bob", asset_body("by-bob")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Access grants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn grant_and_revoke_access() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let access = format!("/api/v1/assets/{id}/access/bob");

    for _ in 0..2 {
        let response = put_json(&app, &access, "alice", json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = get(&app, &format!("/api/v1/assets/{id}/analytics"), "bob").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(&app, &access, "alice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, &format!("/api/v1/assets/{id}/analytics"), "bob").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn self_grant_and_self_revoke_fail_differently() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let access = format!("/api/v1/assets/{id}/access/alice");

    let json = expect_status(
        put_json(&app, &access, "alice", json!({})).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "PRIVILEGE_VIOLATION");

    let json = expect_status(delete(&app, &access, "alice").await, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "AUTHORIZATION_REQUIRED");
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn markers_archive_and_restrict() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    let base = format!("/api/v1/assets/{id}");

    let response = post_json(&app, &format!("{base}/markers"), "alice", json!({"markers": ["b"]})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(&app, &format!("{base}/archive"), "alice", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(
        post_json(&app, &format!("{base}/restrict"), "mallory", json!({})).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "AUTHORIZATION_REQUIRED");

    let response = post_json(&app, &format!("{base}/restrict"), EXECUTIVE, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(get(&app, &base, "alice").await, StatusCode::OK).await;
    assert_eq!(
        json["data"]["classification_markers"],
        json!(["a", "b", "ARCHIVED-STATUS", "ACCESS-RESTRICTED"])
    );
}

#[tokio::test]
async fn augment_on_full_asset_is_rejected() {
    let app = build_test_app();
    let markers: Vec<String> = (0..10).map(|i| format!("m{i}")).collect();
    let body = json!({
        "content_descriptor": "full",
        "storage_capacity": 1,
        "summary": "s",
        "classification_markers": markers,
    });
    let json = expect_status(
        post_json(&app, "/api/v1/assets", "alice", body).await,
        StatusCode::CREATED,
    )
    .await;
    let id = json["data"]["asset_id"].as_u64().unwrap();

    let json = expect_status(
        post_json(
            &app,
            &format!("/api/v1/assets/{id}/markers"),
            "alice",
            json!({"markers": ["extra"]}),
        )
        .await,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;
    assert_eq!(json["code"], "CLASSIFICATION_REJECTED");

    let json = expect_status(get(&app, &format!("/api/v1/assets/{id}"), "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["classification_markers"], json!(markers));
}

// ---------------------------------------------------------------------------
// Destroy and read-only views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn destroy_then_analytics_is_missing_entry() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;

    let response = delete(&app, &format!("/api/v1/assets/{id}"), "alice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(
        get(&app, &format!("/api/v1/assets/{id}/analytics"), "alice").await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "MISSING_ENTRY");

    // Ids are never reissued.
    assert_eq!(register(&app, "alice", "doc-2").await, id + 1);
}

#[tokio::test]
async fn analytics_and_authenticity() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await; // height 1
    register(&app, "bob", "doc-2").await; // height 2
    register(&app, "bob", "doc-3").await; // height 3

    let json = expect_status(
        get(&app, &format!("/api/v1/assets/{id}/analytics"), "alice").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(
        json["data"],
        json!({
            "tenure": 2,
            "storage_capacity": 500,
            "marker_count": 1,
            "created_at": 1,
            "current_height": 3,
        })
    );

    let uri = format!("/api/v1/assets/{id}/authenticity?claimed_custodian=alice");
    let json = expect_status(get(&app, &uri, EXECUTIVE).await, StatusCode::OK).await;
    assert_eq!(json["data"]["matches"], true);
    assert_eq!(json["data"]["tenure"], 2);

    let uri = format!("/api/v1/assets/{id}/authenticity?claimed_custodian=mallory");
    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["matches"], false);

    let uri = format!("/api/v1/assets/{id}/authenticity?claimed_custodian=%20alice%20");
    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["matches"], true);
}

#[tokio::test]
async fn blank_claimed_custodian_is_bad_request() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;

    let uri = format!("/api/v1/assets/{id}/authenticity?claimed_custodian=");
    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");

    let uri = format!("/api/v1/assets/{id}/authenticity");
    let json = expect_status(get(&app, &uri, "alice").await, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Registry flags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn maintenance_blocks_registration() {
    let app = build_test_app();

    let json = expect_status(
        put_json(&app, "/api/v1/registry/maintenance", "alice", json!({"enabled": true})).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "AUTHORIZATION_REQUIRED");

    let response = put_json(&app, "/api/v1/registry/maintenance", EXECUTIVE, json!({"enabled": true})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_status(
        post_json(&app, "/api/v1/assets", "alice", asset_body("doc-1")).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "AUTHORIZATION_REQUIRED");

    let json = expect_status(get(&app, "/api/v1/registry", "alice").await, StatusCode::OK).await;
    assert_eq!(json["data"]["maintenance"], true);
    assert_eq!(json["data"]["active"], true);
    assert_eq!(json["data"]["executive"], EXECUTIVE);
}

#[tokio::test]
async fn inactive_registry_rejects_until_activated() {
    let mut config = test_config();
    config.registry_active = false;
    let app = build_test_app_with(config);

    let response = post_json(&app, "/api/v1/assets", "alice", asset_body("doc-1")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json(&app, "/api/v1/registry/activation", EXECUTIVE, json!({"enabled": true})).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(register(&app, "alice", "doc-1").await, 1);
}

// ---------------------------------------------------------------------------
// Event journal
// ---------------------------------------------------------------------------

/// Poll the journal until it holds `expected` events (the subscriber task
/// runs concurrently with the request that published them).
async fn wait_for_events(
    app: &axum::Router,
    uri: &str,
    caller: &str,
    expected: usize,
) -> Vec<Value> {
    for _ in 0..50 {
        let json = expect_status(get(app, uri, caller).await, StatusCode::OK).await;
        let events = json["data"].as_array().cloned().unwrap_or_default();
        if events.len() >= expected {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("journal did not reach {expected} events");
}

#[tokio::test]
async fn committed_transitions_are_journaled() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    put_json(&app, &format!("/api/v1/assets/{id}/access/bob"), "alice", json!({})).await;
    // Rejected calls publish nothing.
    put_json(&app, &format!("/api/v1/assets/{id}/access/alice"), "alice", json!({})).await;
    register(&app, "carol", "doc-2").await;

    let events = wait_for_events(&app, "/api/v1/events", EXECUTIVE, 3).await;
    let kinds: Vec<_> = events.iter().map(|e| e["event_type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["asset.registered", "access.granted", "asset.registered"]);

    let events = wait_for_events(&app, &format!("/api/v1/events?asset_id={id}"), "alice", 2).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["payload"]["principal"], "bob");
    assert_eq!(events[0]["height"], 2);
    assert_eq!(events[1]["actor"], "alice");
}

#[tokio::test]
async fn events_are_filtered_by_read_access() {
    let app = build_test_app();
    let id = register(&app, "alice", "doc-1").await;
    put_json(&app, &format!("/api/v1/assets/{id}/access/bob"), "alice", json!({})).await;
    put_json(&app, "/api/v1/registry/maintenance", EXECUTIVE, json!({"enabled": true})).await;

    // Executive sees everything; waiting on it guarantees the journal caught up.
    let events = wait_for_events(&app, "/api/v1/events", EXECUTIVE, 3).await;
    assert_eq!(events.len(), 3);

    // The grantee reads the asset, so it sees the grant naming it.
    let json = expect_status(get(&app, "/api/v1/events", "bob").await, StatusCode::OK).await;
    let kinds: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["registry.maintenance_changed", "access.granted", "asset.registered"]
    );

    // A stranger only sees registry-wide events.
    let json = expect_status(get(&app, "/api/v1/events", "mallory").await, StatusCode::OK).await;
    let events = json["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert!(events.iter().all(|e| e["asset_id"].is_null()));
    assert!(!json.to_string().contains("access.granted"));

    let json = expect_status(
        get(&app, &format!("/api/v1/events?asset_id={id}"), "mallory").await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(json["code"], "PRIVILEGE_VIOLATION");

    let json = expect_status(
        get(&app, "/api/v1/events?asset_id=99", EXECUTIVE).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "MISSING_ENTRY");
}

#[tokio::test]
async fn events_require_a_caller() {
    let app = build_test_app();
    let response = send(&app, Method::GET, "/api/v1/events", None, None).await;

    let json = expect_status(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}
