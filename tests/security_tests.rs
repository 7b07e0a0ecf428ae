//! Input hardening tests
//!
//! Validation limits on buyer input and the HTTP layer's handling of
//! oversized or hostile request bodies.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use sequence_fit::utils::validation::{
    validate_buyer_profile, validate_sequence_id, ValidationError, MAX_PIXEL_COUNT, MAX_PROPS,
    MAX_PROP_NAME_LENGTH, MAX_SEQUENCE_ID_LENGTH,
};
use sequence_fit::web::server::{build_app, AppState, MAX_BODY_SIZE};
use sequence_fit::{BuyerHardwareProfile, SequenceCatalog};

async fn post_rank(body: String) -> (StatusCode, Value) {
    let catalog = SequenceCatalog::load_embedded().expect("embedded catalog should load");
    let app = build_app(Arc::new(AppState::new(catalog)));

    let request = Request::builder()
        .method("POST")
        .uri("/api/compatibility/sequences")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Test prop count limit
#[test]
fn test_prop_count_limit() {
    let mut buyer = BuyerHardwareProfile::new(1000);
    for i in 0..MAX_PROPS {
        buyer = buyer.with_prop(format!("Prop {i}"), 1);
    }
    assert!(validate_buyer_profile(&buyer).is_ok());

    let buyer = buyer.with_prop("One Too Many", 1);
    assert_eq!(
        validate_buyer_profile(&buyer),
        Err(ValidationError::TooManyProps)
    );
}

/// Test prop name validation
#[test]
fn test_prop_name_validation() {
    let long_name = "x".repeat(MAX_PROP_NAME_LENGTH + 1);
    let cases = [
        ("", ValidationError::EmptyPropName),
        ("   ", ValidationError::EmptyPropName),
        (long_name.as_str(), ValidationError::PropNameTooLong),
        ("Mega\u{0}Tree", ValidationError::InvalidPropName),
        ("Arch\n", ValidationError::InvalidPropName),
    ];

    for (name, expected) in cases {
        let buyer = BuyerHardwareProfile::new(100).with_prop(name, 1);
        assert_eq!(
            validate_buyer_profile(&buyer),
            Err(expected),
            "prop name {name:?}"
        );
    }

    // Unicode names count characters, not bytes
    let unicode = "é".repeat(MAX_PROP_NAME_LENGTH);
    let buyer = BuyerHardwareProfile::new(100).with_prop(unicode, 1);
    assert!(validate_buyer_profile(&buyer).is_ok());
}

/// Test pixel count ceiling
#[test]
fn test_pixel_count_limit() {
    assert!(validate_buyer_profile(&BuyerHardwareProfile::new(MAX_PIXEL_COUNT)).is_ok());
    assert_eq!(
        validate_buyer_profile(&BuyerHardwareProfile::new(MAX_PIXEL_COUNT + 1)),
        Err(ValidationError::PixelCountTooLarge)
    );
}

/// Test sequence id validation against path and injection characters
#[test]
fn test_sequence_id_validation() {
    assert!(validate_sequence_id("thriller-full-house").is_ok());
    assert!(validate_sequence_id("  anthem_matrix  ").is_ok());

    let too_long = "a".repeat(MAX_SEQUENCE_ID_LENGTH + 1);
    let hostile = [
        "../catalog",
        "id; rm -rf /",
        "<script>",
        "seq%20id",
        "carol/of/the/bells",
    ];
    for id in hostile {
        assert_eq!(
            validate_sequence_id(id),
            Err(ValidationError::InvalidSequenceId),
            "id {id:?}"
        );
    }
    assert_eq!(
        validate_sequence_id(&too_long),
        Err(ValidationError::SequenceIdTooLong)
    );
    assert_eq!(
        validate_sequence_id(""),
        Err(ValidationError::EmptySequenceId)
    );
}

/// Test that oversized bodies are refused before parsing
#[tokio::test]
async fn test_body_size_limit() {
    let padding = "x".repeat(MAX_BODY_SIZE + 1);
    let body = format!(r#"{{"userInput": {{"pixelCount": 1, "props": [{{"name": "{padding}", "count": 1}}]}}}}"#);

    let (status, response) = post_rank(body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response["error_type"], "payload_too_large");
}

/// Test that validation failures surface as 400 with a machine-readable type
#[tokio::test]
async fn test_http_validation_errors() {
    let props: Vec<Value> = (0..=MAX_PROPS)
        .map(|i| json!({ "name": format!("Prop {i}"), "count": 1 }))
        .collect();
    let body = json!({ "userInput": { "props": props, "pixelCount": 100 } });
    let (status, response) = post_rank(body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error_type"], "too_many_props");

    let body = json!({ "userInput": { "props": [{ "name": " ", "count": 1 }], "pixelCount": 100 } });
    let (status, response) = post_rank(body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error_type"], "empty_prop_name");
}

/// Test that error responses never carry internal details
#[tokio::test]
async fn test_error_responses_hide_details() {
    let (status, response) = post_rank(r#"{"userInput": {"pixelCount": -5}}"#.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error_type"], "invalid_request");
    assert!(response["details"].is_null());
    let message = response["error"].as_str().unwrap_or_default();
    assert!(!message.contains("pixelCount"));
    assert!(!message.contains("line"));
}
