//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use scrivener_core::NewGeneration;
use scrivener_database::InMemoryGenerationStore;
use scrivener_error::ProviderErrorKind;
use scrivener_interface::GenerationStore;
use scrivener_models::{ScriptedFailure, ScriptedGenerator};
use scrivener_server::{AppState, create_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(generator: &ScriptedGenerator, store: &InMemoryGenerationStore) -> Router {
    create_router(AppState::new(
        Arc::new(generator.clone()),
        Arc::new(store.clone()),
    ))
}

fn hello() -> ScriptedGenerator {
    ScriptedGenerator::new(["Hel", "lo, ", "world!"])
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(&hello(), &InMemoryGenerationStore::new())
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_generate_streams_fragments_in_order() {
    let generator = hello();
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello", "mode": "email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert_eq!(response.headers()[header::CONNECTION], "keep-alive");
    assert_eq!(body_text(response).await, "Hello, world!");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_generate_resolves_system_instruction() {
    let generator = hello();
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "A kettle", "mode": "product-description" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (system, prompt) = generator.last_request().unwrap();
    assert_eq!(system, "Write a persuasive product description for:");
    assert_eq!(prompt, "A kettle");
}

#[tokio::test]
async fn test_generate_without_mode_uses_default() {
    let generator = hello();
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (system, _) = generator.last_request().unwrap();
    assert_eq!(
        system,
        "Write a professional email based on the following requirements:"
    );
}

#[tokio::test]
async fn test_generate_unknown_mode_uses_default() {
    let generator = hello();
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello", "mode": "limerick" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (system, _) = generator.last_request().unwrap();
    assert!(system.starts_with("Write a professional email"));
}

#[tokio::test]
async fn test_generate_rejects_missing_or_empty_prompt() {
    for body in [json!({ "mode": "email" }), json!({ "prompt": "", "mode": "email" })] {
        let generator = hello();
        let response = app(&generator, &InMemoryGenerationStore::new())
            .oneshot(json_request("POST", "/api/generate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing required fields");
        assert_eq!(generator.calls(), 0);
    }
}

#[tokio::test]
async fn test_generate_invalid_json_is_server_error() {
    let generator = hello();
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error generating content");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_generate_setup_failure_is_server_error() {
    let generator = hello().with_failure(ScriptedFailure::OnOpen(ProviderErrorKind::MissingApiKey));
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error generating content");
}

#[tokio::test]
async fn test_generate_mid_stream_failure_errors_body() {
    let generator = hello().fail_after(2, "upstream reset");
    let response = app(&generator, &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(to_bytes(response.into_body(), usize::MAX).await.is_err());
}

#[tokio::test]
async fn test_generate_idle_timeout_errors_body() {
    let generator = ScriptedGenerator::new(["Hel"]).with_failure(ScriptedFailure::Stall);
    let state = AppState::new(
        Arc::new(generator.clone()),
        Arc::new(InMemoryGenerationStore::new()),
    )
    .with_fragment_timeout(Some(std::time::Duration::from_millis(50)));

    let response = create_router(state)
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "prompt": "Say hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(to_bytes(response.into_body(), usize::MAX).await.is_err());
}

#[tokio::test]
async fn test_generation_crud_flow() {
    let store = InMemoryGenerationStore::new();
    let generator = hello();

    let response = app(&generator, &store)
        .oneshot(json_request(
            "POST",
            "/api/generations",
            json!({ "mode": "email", "prompt": "p", "output": "o", "tokens_used": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["is_bookmarked"], json!(false));
    assert_eq!(created["tokens_used"], json!(1));
    let id = created["id"].as_str().unwrap().to_string();

    let response = app(&generator, &store)
        .oneshot(empty_request("GET", "/api/generations"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed[0]["id"], json!(id));

    let response = app(&generator, &store)
        .oneshot(json_request(
            "PATCH",
            &format!("/api/generations/{}", id),
            json!({ "is_bookmarked": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_bookmarked"], json!(true));

    let response = app(&generator, &store)
        .oneshot(empty_request("GET", "/api/generations?bookmarked=true"))
        .await
        .unwrap();
    let bookmarked = body_json(response).await;
    assert_eq!(bookmarked.as_array().unwrap().len(), 1);
    assert_eq!(bookmarked[0]["id"], json!(id));

    let response = app(&generator, &store)
        .oneshot(empty_request("DELETE", &format!("/api/generations/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let response = app(&generator, &store)
        .oneshot(empty_request("GET", "/api/generations"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_bookmark_filter_requires_literal_true() {
    let store = InMemoryGenerationStore::new();
    store
        .create(NewGeneration::estimated("email", "p", "o"))
        .await
        .unwrap();

    let response = app(&hello(), &store)
        .oneshot(empty_request("GET", "/api/generations?bookmarked=1"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app(&hello(), &store)
        .oneshot(empty_request("GET", "/api/generations?bookmarked=true"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_store_failures_are_generic_json_errors() {
    let store = InMemoryGenerationStore::new();
    store.set_unavailable(true);
    let id = uuid::Uuid::new_v4();

    let cases = [
        (
            json_request(
                "POST",
                "/api/generations",
                json!({ "mode": "email", "prompt": "p", "output": "o", "tokens_used": 1 }),
            ),
            "Failed to save generation",
        ),
        (
            empty_request("GET", "/api/generations"),
            "Failed to fetch generations",
        ),
        (
            json_request(
                "PATCH",
                &format!("/api/generations/{}", id),
                json!({ "is_bookmarked": true }),
            ),
            "Failed to update generation",
        ),
        (
            empty_request("DELETE", &format!("/api/generations/{}", id)),
            "Failed to delete generation",
        ),
    ];

    for (request, message) in cases {
        let response = app(&hello(), &store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_bookmark_unknown_id_is_server_error() {
    let response = app(&hello(), &InMemoryGenerationStore::new())
        .oneshot(json_request(
            "PATCH",
            &format!("/api/generations/{}", uuid::Uuid::new_v4()),
            json!({ "is_bookmarked": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to update generation" })
    );
}
