mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{app_state, fake_with_ottawa, test_user, GOOD_TOKEN};
use itinerary_api::{middleware::request_id::REQUEST_ID_HEADER, routes::create_router};

async fn create_test_server() -> TestServer {
    let state = app_state(fake_with_ottawa(), Duration::from_millis(20)).await;
    TestServer::new(create_router(state)).unwrap()
}

async fn logged_in_server() -> TestServer {
    let server = create_test_server().await;
    server
        .post("/api/auth/google")
        .json(&json!({ "token": GOOD_TOKEN }))
        .await
        .assert_status_ok();
    server
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    assert!(response.headers().get(REQUEST_ID_HEADER).is_some());
}

#[tokio::test]
async fn test_login_without_token_is_bad_request() {
    let server = create_test_server().await;

    let response = server.post("/api/auth/google").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn test_login_with_invalid_token_is_unauthorized() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/google")
        .json(&json!({ "token": "forged" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_returns_user_and_opens_session() {
    let server = create_test_server().await;

    let response = server
        .post("/api/auth/google")
        .json(&json!({ "token": GOOD_TOKEN }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], test_user().email);

    let session = server.get("/api/auth/session").await;
    session.assert_status_ok();
    let user: Value = session.json();
    assert_eq!(user["name"], "Test User");
}

#[tokio::test]
async fn test_flow_requires_login() {
    let server = create_test_server().await;

    server
        .get("/api/v1/flow")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/v1/flow/city")
        .json(&json!({ "city": "Ottawa" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_closes_session_and_resets_flow() {
    let server = logged_in_server().await;
    server
        .post("/api/v1/flow/city")
        .json(&json!({ "city": "Ottawa" }))
        .await
        .assert_status_ok();

    server
        .post("/api/auth/logout")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/auth/session")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/auth/google")
        .json(&json!({ "token": GOOD_TOKEN }))
        .await
        .assert_status_ok();
    let flow: Value = server.get("/api/v1/flow").await.json();
    assert_eq!(flow["stage"], "no_city");
    assert_eq!(flow["venues"], json!([]));
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let server = logged_in_server().await;

    let initial: Value = server.get("/api/v1/flow").await.json();
    assert_eq!(initial["stage"], "no_city");
    assert_eq!(initial["map"]["zoom"], 4);

    let loaded = server
        .post("/api/v1/flow/city")
        .json(&json!({ "city": "Ottawa" }))
        .await;
    loaded.assert_status_ok();
    let loaded: Value = loaded.json();
    assert_eq!(loaded["stage"], "venues_loaded");
    assert_eq!(loaded["venues"].as_array().unwrap().len(), 4);
    assert_eq!(loaded["map"]["zoom"], 13);

    server
        .post("/api/v1/flow/questionnaire/open")
        .await
        .assert_status_ok();

    let submitted: Value = server
        .post("/api/v1/flow/questionnaire")
        .json(&json!({ "spots": "1", "eat": "Yes", "duration": "2" }))
        .await
        .json();
    assert_eq!(submitted["processing"], true);
    assert_eq!(submitted["itinerary"], Value::Null);

    tokio::time::sleep(Duration::from_millis(80)).await;

    let ready: Value = server.get("/api/v1/flow").await.json();
    assert_eq!(ready["stage"], "suggestions_ready");
    assert_eq!(ready["itinerary"][0]["id"], "R2");
    assert_eq!(ready["itinerary"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let server = logged_in_server().await;

    let response = server
        .post("/api/v1/flow/city")
        .json(&json!({ "city": "Atlantis" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_questionnaire_before_city_is_conflict() {
    let server = logged_in_server().await;

    server
        .post("/api/v1/flow/questionnaire/open")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_toggle_labels_flips_map_type() {
    let server = logged_in_server().await;

    let first: Value = server.post("/api/v1/map/labels").await.json();
    let second: Value = server.post("/api/v1/map/labels").await.json();

    assert_ne!(first["show_labels"], second["show_labels"]);
    assert_ne!(first["map_type"], second["map_type"]);
}

#[tokio::test]
async fn test_merch_list() {
    let server = create_test_server().await;

    let response = server.get("/api/merch").await;

    response.assert_status_ok();
    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Canada Day T-Shirt");
    assert_eq!(items[1]["price"], 15.0);
}

#[tokio::test]
async fn test_venue_photos_are_served_without_exposing_the_key() {
    let server = logged_in_server().await;

    let loaded: Value = server
        .post("/api/v1/flow/city")
        .json(&json!({ "city": "Ottawa" }))
        .await
        .json();
    let photo_url = loaded["venues"]
        .as_array()
        .unwrap()
        .iter()
        .find_map(|v| v["photo_url"].as_str())
        .unwrap()
        .to_string();
    assert_eq!(photo_url, "/api/v1/photos/photo-r2");

    let response = server.get(&photo_url).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"jpeg-bytes");
    assert_eq!(response.headers()["content-type"], "image/jpeg");

    server
        .get("/api/v1/photos/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
