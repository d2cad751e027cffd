//! Integration tests for `POST /api/v1/stories/generate`.
//!
//! All scenarios run against the full router and middleware stack with
//! stubbed generation services; nothing touches the network or a database.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, illustrated_pipeline, post_json, text_only_pipeline, StubImages, StubStore,
    StubText,
};
use serde_json::json;
use tower::ServiceExt;

const GENERATE_URI: &str = "/api/v1/stories/generate";

const STORY_REPLY: &str = r#"{"title": "Mira and the Moon Cats",
    "content": "Mira loved cats more than anything.",
    "illustrations": [{"description": "Mira waving at a cat on the moon", "position": 20}]}"#;

fn valid_request() -> serde_json::Value {
    json!({
        "childName": "Mira",
        "childAge": 6,
        "readingLevel": "Kindergarten",
        "favoriteThings": ["cats"],
        "parentSummary": null,
        "customPrompt": null,
        "sourceIllustration": null,
        "physicalCharacteristics": null,
    })
}

// ---------------------------------------------------------------------------
// Scenario A: success without image credentials (degraded mode)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generates_story_without_image_credentials() {
    let text = StubText::new(STORY_REPLY);
    let app = common::build_test_app(common::test_state(Some(text_only_pipeline(
        std::sync::Arc::clone(&text),
    ))));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    assert_eq!(cache_control.as_deref(), Some("no-store"));

    let json = body_json(response).await;
    assert_eq!(json["title"], "Mira and the Moon Cats");
    assert_eq!(json["content"], "Mira loved cats more than anything.");

    let illustrations = json["illustrations"].as_array().unwrap();
    assert_eq!(illustrations.len(), 1);
    assert_eq!(
        illustrations[0]["description"],
        "Mira waving at a cat on the moon"
    );
    assert_eq!(illustrations[0]["position"], 20);
    // Degraded mode: the key is absent, not null.
    assert!(illustrations[0].get("imageUrl").is_none());
    assert!(json.get("warning").is_none());

    assert_eq!(text.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Scenario B: content-policy rejection surfaces as a warning
// ---------------------------------------------------------------------------

#[tokio::test]
async fn content_policy_rejection_keeps_story_and_sets_warning() {
    let text = StubText::new(STORY_REPLY);
    let images = StubImages::rejecting();
    let store = StubStore::new();
    let app = common::build_test_app(common::test_state(Some(illustrated_pipeline(
        text,
        images,
        std::sync::Arc::clone(&store),
    ))));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Mira and the Moon Cats");
    assert_eq!(json["warning"], "illustration_content_policy");

    let illustrations = json["illustrations"].as_array().unwrap();
    assert_eq!(illustrations.len(), 1);
    assert!(illustrations[0].get("imageUrl").is_none());

    // Nothing was uploaded for the rejected illustration.
    assert_eq!(store.puts.load(std::sync::atomic::Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Successful illustration rendering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolves_illustration_urls_when_configured() {
    let text = StubText::new(STORY_REPLY);
    let images = StubImages::succeeding();
    let store = StubStore::new();
    let app = common::build_test_app(common::test_state(Some(illustrated_pipeline(
        text, images, store,
    ))));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let illustrations = json["illustrations"].as_array().unwrap();
    let url = illustrations[0]["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("https://cdn.test/illustrations/"));
    assert!(url.ends_with(".png"));
    assert!(json.get("warning").is_none());
}

// ---------------------------------------------------------------------------
// Scenario C: missing required fields -> 400 before any upstream call
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_favorite_things_is_missing_required_fields() {
    let text = StubText::new(STORY_REPLY);
    let app = common::build_test_app(common::test_state(Some(text_only_pipeline(
        std::sync::Arc::clone(&text),
    ))));

    let mut body = valid_request();
    body["favoriteThings"] = json!([]);

    let response = post_json(app, GENERATE_URI, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required fields");

    // Validation happens before the text service is consulted.
    assert_eq!(text.call_count(), 0);
}

#[tokio::test]
async fn absent_and_zero_required_fields_are_rejected() {
    for patch in [
        json!({"childName": null}),
        json!({"childName": ""}),
        json!({"childAge": null}),
        json!({"childAge": 0}),
        json!({"readingLevel": null}),
        json!({"favoriteThings": null}),
    ] {
        let text = StubText::new(STORY_REPLY);
        let app = common::build_test_app(common::test_state(Some(text_only_pipeline(
            std::sync::Arc::clone(&text),
        ))));

        let mut body = valid_request();
        for (key, value) in patch.as_object().unwrap() {
            body[key] = value.clone();
        }

        let response = post_json(app, GENERATE_URI, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "patch: {patch}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(text.call_count(), 0);
    }
}

// ---------------------------------------------------------------------------
// Scenario D: unparseable model reply -> 500 with the contract message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prose_reply_without_json_is_parse_failure() {
    let text = StubText::new("Once upon a time, the model forgot the format.");
    let app = common::build_test_app(common::test_state(Some(text_only_pipeline(text))));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to parse story response");
}

#[tokio::test]
async fn reply_missing_title_is_invalid_format() {
    let text = StubText::new(r#"{"content": "a story with no title"}"#);
    let app = common::build_test_app(common::test_state(Some(text_only_pipeline(text))));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid story format");
}

// ---------------------------------------------------------------------------
// Missing credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_text_service_key_is_config_error() {
    let app = common::build_test_app(common::test_state(None));

    let response = post_json(app, GENERATE_URI, valid_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Anthropic API key not configured");
}

// ---------------------------------------------------------------------------
// Method handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_post_method_is_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let text = StubText::new(STORY_REPLY);
        let app = common::build_test_app(common::test_state(Some(text_only_pipeline(text))));

        let request = Request::builder()
            .method(method.clone())
            .uri(GENERATE_URI)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method: {method}"
        );
    }
}
