//! API Integration Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use decomp_api::create_router_for_testing;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// "We launch and drive growth for startups ." as annotated tokens
fn launch_and_drive_tokens() -> Value {
    json!([
        {"index": 0, "text": "We", "pos": "PRON", "tag": "PRP", "dep": "nsubj", "head": 1},
        {"index": 1, "text": "launch", "pos": "VERB", "tag": "VBP", "dep": "ROOT", "head": 1},
        {"index": 2, "text": "and", "pos": "CCONJ", "tag": "CC", "dep": "cc", "head": 1},
        {"index": 3, "text": "drive", "pos": "VERB", "tag": "VBP", "dep": "conj", "head": 1},
        {"index": 4, "text": "growth", "pos": "NOUN", "tag": "NN", "dep": "dobj", "head": 3},
        {"index": 5, "text": "for", "pos": "ADP", "tag": "IN", "dep": "prep", "head": 3},
        {"index": 6, "text": "startups", "pos": "NOUN", "tag": "NNS", "dep": "pobj", "head": 5},
        {"index": 7, "text": ".", "pos": "PUNCT", "tag": ".", "dep": "punct", "head": 1}
    ])
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_number());
}

// =============================================================================
// Decompose API Tests
// =============================================================================

#[tokio::test]
async fn test_decompose_action_keyword() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/decompose",
        Some(json!({
            "sentence": launch_and_drive_tokens(),
            "keywords": [
                {"found": "growth", "improved": "growth", "span": [4, 4, 4]}
            ],
            "preprocessing": {
                "verbsSubjects": {
                    "verbs": [
                        {"phraseStart": 1, "phraseEnd": 5, "headIndex": 1,
                         "passive": {"isPassive": false}}
                    ],
                    "subjects": [
                        {"subjectIndex": 0, "phraseStart": 0, "phraseEnd": 1}
                    ]
                }
            },
            "context": {"refId": "p1", "sentenceId": "s1"}
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["count"], 2);
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["whereFound"], "action");
    assert_eq!(records[0]["verb"], "launch");
    assert_eq!(records[1]["verb"], "drive");
    assert_eq!(records[0]["object"], "growth");
    assert_eq!(records[0]["subjectToken"], "We");
    assert_eq!(records[0]["subjectType"], "COMPANY");
    assert_eq!(records[0]["isPassive"], "false");
    assert_eq!(records[0]["sentenceId"], "s1");
}

#[tokio::test]
async fn test_decompose_expertise_keyword() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/decompose",
        Some(json!({
            "sentence": [
                {"index": 0, "text": "Skilled", "pos": "ADJ", "tag": "JJ", "dep": "ROOT", "head": 0},
                {"index": 1, "text": "in", "pos": "ADP", "tag": "IN", "dep": "prep", "head": 0},
                {"index": 2, "text": "project", "pos": "NOUN", "tag": "NN", "dep": "compound", "head": 3},
                {"index": 3, "text": "management", "pos": "NOUN", "tag": "NN", "dep": "pobj", "head": 1},
                {"index": 4, "text": "and", "pos": "CCONJ", "tag": "CC", "dep": "cc", "head": 3},
                {"index": 5, "text": "leadership", "pos": "NOUN", "tag": "NN", "dep": "conj", "head": 3},
                {"index": 6, "text": ".", "pos": "PUNCT", "tag": ".", "dep": "punct", "head": 0}
            ],
            "keywords": [
                {"found": "project management", "improved": "project management",
                 "span": [2, 2, 3]}
            ]
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["whereFound"], "expertise in");
    assert_eq!(json["records"][0]["foundKeyword"], "project management");
}

#[tokio::test]
async fn test_decompose_returns_every_schema_field() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/decompose",
        Some(json!({
            "sentence": launch_and_drive_tokens(),
            "keywords": [
                {"found": "growth", "improved": "growth", "span": [4, 4, 4]}
            ]
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    let json = response_json(response).await;

    let record = json["records"][0].as_object().unwrap();
    for field in [
        "foundKeyword",
        "improvedKeyword",
        "whereFound",
        "verb",
        "resultVerb",
        "meansVerb",
        "indirectVerb",
        "benefactive",
        "subjectToken",
        "subjectType",
        "isPassive",
        "agentInfo",
        "profile",
        "sentence",
        "sentenceId",
    ] {
        assert!(record.contains_key(field), "missing field {field}");
    }
}

#[tokio::test]
async fn test_decompose_empty_sentence_rejected() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/v1/decompose",
        Some(json!({
            "sentence": [],
            "keywords": []
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_decompose_malformed_body_rejected() {
    let app = create_router_for_testing();

    // No sentence / keywords at all
    let request = create_json_request("POST", "/api/v1/decompose", Some(json!({})));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_decompose_bad_keyword_does_not_abort_batch() {
    let app = create_router_for_testing();

    // The second keyword's span points far outside the sentence
    let request = create_json_request(
        "POST",
        "/api/v1/decompose",
        Some(json!({
            "sentence": launch_and_drive_tokens(),
            "keywords": [
                {"found": "growth", "improved": "growth", "span": [4, 4, 4]},
                {"found": "ghost", "improved": "ghost", "span": [90, 90, 99]}
            ]
        })),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    // The good keyword still produces its rows
    let records = json["records"].as_array().unwrap();
    assert!(records
        .iter()
        .any(|r| r["improvedKeyword"] == "growth" && r["whereFound"] == "action"));
}
