use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use studykit_llm::{Assistant, LlmBackend, LlmError, LlmRequest, LlmResponse};
use studykit_web::handlers::ai::{AssistAction, NOT_CONFIGURED};
use studykit_web::router::build_router;
use studykit_web::state::AppState;

enum Reply {
    Text(&'static str),
    Fail,
}

struct StubBackend {
    reply: Reply,
}

#[async_trait]
impl LlmBackend for StubBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        match self.reply {
            Reply::Text(text) => Ok(LlmResponse {
                content: text.to_string(),
                model: "stub".to_string(),
                prompt_tokens: 1,
                completion_tokens: 1,
            }),
            Reply::Fail => Err(LlmError::ApiError { status: 500, message: "upstream down".into() }),
        }
    }
    fn model_id(&self) -> &str { "stub" }
    fn name(&self) -> &str { "stub" }
}

fn app_with(reply: Option<Reply>) -> Router {
    let assistant = reply.map(|reply| Assistant::new(Arc::new(StubBackend { reply })));
    build_router(AppState::new(assistant, "does-not-exist"))
}

fn valid_body(action: AssistAction) -> Value {
    json!({ action.field(): "Photosynthesis converts light into chemical energy." })
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, req).await
}

// ── AI proxy ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_reports_configuration() {
    let (status, body) = get(app_with(None), "/api/ai/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "configured": false }));

    let (_, body) = get(app_with(Some(Reply::Text("ok"))), "/api/ai/status").await;
    assert_eq!(body, json!({ "configured": true }));
}

#[tokio::test]
async fn every_action_is_unavailable_without_credential() {
    for action in AssistAction::ALL {
        let (status, body) = post(app_with(None), action.path(), valid_body(action)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", action.path());
        assert_eq!(body["error"], NOT_CONFIGURED);
    }
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    for action in AssistAction::ALL {
        let (status, body) = post(app_with(Some(Reply::Text("ok"))), action.path(), json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", action.path());
        let expected = if action.field() == "topic" { "Topic is required" } else { "Text is required" };
        assert_eq!(body["error"], expected);
    }
}

#[tokio::test]
async fn non_string_field_is_bad_request() {
    let (status, body) = post(
        app_with(Some(Reply::Text("ok"))),
        "/api/ai/summarize",
        json!({ "text": ["not", "a", "string"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text is required");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/ai/paraphrase")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app_with(Some(Reply::Text("ok"))), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text is required");
}

#[tokio::test]
async fn oversized_field_is_bad_request() {
    for action in AssistAction::ALL {
        let too_long = "x".repeat(action.max_chars() + 1);
        let (status, body) = post(
            app_with(Some(Reply::Text("ok"))),
            action.path(),
            json!({ action.field(): too_long }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", action.path());
        assert!(body["error"].as_str().unwrap().contains("character limit"));
    }

    let (_, body) = post(
        app_with(Some(Reply::Text("ok"))),
        "/api/ai/summarize",
        json!({ "text": "x".repeat(10_001) }),
    )
    .await;
    assert_eq!(body["error"], "Text exceeds 10,000 character limit");
}

#[tokio::test]
async fn body_over_transport_limit_reports_field_limit() {
    // axum buffers at most 2 MB for the Json extractor
    let (status, body) = post(
        app_with(Some(Reply::Text("ok"))),
        "/api/ai/summarize",
        json!({ "text": "x".repeat(3_000_000) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text exceeds 10,000 character limit");

    let (status, body) = post(
        app_with(Some(Reply::Text("ok"))),
        "/api/ai/explain",
        json!({ "topic": "y".repeat(3_000_000) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Topic exceeds 200 character limit");
}

#[tokio::test]
async fn oversized_body_without_credential_is_still_unavailable() {
    let (status, _) = post(
        app_with(None),
        "/api/ai/summarize",
        json!({ "text": "x".repeat(3_000_000) }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn well_formed_requests_return_result() {
    for action in AssistAction::ALL.into_iter().filter(|a| *a != AssistAction::Grammar) {
        let (status, body) = post(
            app_with(Some(Reply::Text("Generated content."))),
            action.path(),
            valid_body(action),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", action.path());
        assert_eq!(body["result"], "Generated content.");
    }
}

#[tokio::test]
async fn optional_settings_are_lenient() {
    let (status, body) = post(
        app_with(Some(Reply::Text("Essay."))),
        "/api/ai/essay",
        json!({ "topic": "Renewable energy", "type": "persuasive", "paragraphs": "7" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Essay.");

    let (status, _) = post(
        app_with(Some(Reply::Text("Q1."))),
        "/api/ai/questions",
        json!({ "text": "Cells divide.", "type": "riddles", "count": -3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_model_output_uses_fallback() {
    let (status, body) = post(
        app_with(Some(Reply::Text(""))),
        "/api/ai/summarize",
        json!({ "text": "Some text" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Unable to generate summary.");
}

#[tokio::test]
async fn whitespace_model_output_is_returned_as_is() {
    let (status, body) = post(
        app_with(Some(Reply::Text("\n"))),
        "/api/ai/summarize",
        json!({ "text": "Some text" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "\n");
}

#[tokio::test]
async fn grammar_returns_report() {
    let reply = r#"{"corrected": "They're going home.", "issues": ["Changed their to they're"]}"#;
    let (status, body) = post(
        app_with(Some(Reply::Text(reply))),
        "/api/ai/grammar",
        json!({ "text": "Their going home." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["corrected"], "They're going home.");
    assert_eq!(body["issues"][0], "Changed their to they're");
}

#[tokio::test]
async fn grammar_unparseable_reply_falls_back() {
    let (status, body) = post(
        app_with(Some(Reply::Text("Looks fine to me."))),
        "/api/ai/grammar",
        json!({ "text": "Their going home." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["corrected"], "Their going home.");
    assert_eq!(body["issues"][0], "Unable to analyze grammar. Please try again.");
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    for action in AssistAction::ALL {
        let (status, body) = post(app_with(Some(Reply::Fail)), action.path(), valid_body(action)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", action.path());
        assert_eq!(body["error"], action.failure_message());
    }
}

// ── Tool catalog ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_search_lists_every_tool() {
    let (status, body) = get(app_with(None), "/api/tools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 39);
    assert_eq!(body["tools"].as_array().unwrap().len(), 39);
}

#[tokio::test]
async fn search_filters_case_insensitively() {
    let (_, upper) = get(app_with(None), "/api/tools?q=GRAMMAR").await;
    let (_, lower) = get(app_with(None), "/api/tools?q=grammar").await;
    assert_eq!(upper["tools"], lower["tools"]);
    assert_eq!(lower["total"], 1);
    assert_eq!(lower["tools"][0]["id"], "grammar-checker");
}

#[tokio::test]
async fn search_with_category_filter() {
    let (status, body) = get(app_with(None), "/api/tools?q=convert&category=image").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["jpg-to-png", "png-to-jpg", "image-grayscale"]);

    let (status, _) = get(app_with(None), "/api/tools?category=games").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tool_lookup_by_id() {
    let (status, body) = get(app_with(None), "/api/tools/pdf-merge").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "PDF Merge");
    assert_eq!(body["category"], "pdf");
    assert_eq!(body["path"], "/tools/pdf-merge");

    let (status, body) = get(app_with(None), "/api/tools/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tool not found: nope");
}

#[tokio::test]
async fn categories_carry_counts() {
    let (status, body) = get(app_with(None), "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let cats = body.as_array().unwrap();
    assert_eq!(cats.len(), 5);
    assert_eq!(cats[0]["id"], "calculators");
    assert_eq!(cats[0]["name"], "Calculators");
    assert_eq!(cats[0]["count"], 9);
    let total: u64 = cats.iter().map(|c| c["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 39);
}

// ── Client bundle ────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_paths_are_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>StudyKit</h1>").unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();

    let app = build_router(AppState::new(None, dir.path()));

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/assets/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"console.log(1)");

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>StudyKit</h1>");

    let res = app
        .oneshot(Request::builder().uri("/missing.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // API routes still win over the fallback
    let (status, body) = get(build_router(AppState::new(None, dir.path())), "/api/ai/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["configured"], false);
}
