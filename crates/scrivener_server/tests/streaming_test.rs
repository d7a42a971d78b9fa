//! End-to-end streaming over a real socket.

use futures_util::StreamExt;
use scrivener_database::InMemoryGenerationStore;
use scrivener_models::ScriptedGenerator;
use scrivener_server::{AppState, create_router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_server(generator: &ScriptedGenerator) -> String {
    let app = create_router(AppState::new(
        Arc::new(generator.clone()),
        Arc::new(InMemoryGenerationStore::new()),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_clean_stream_ends_without_error() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(["Hel", "lo, ", "world!"]);
    let base = spawn_server(&generator).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hello", "mode": "email" }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let mut body = response.bytes_stream();
    let mut text = Vec::new();
    while let Some(chunk) = body.next().await {
        text.extend_from_slice(&chunk?);
    }
    assert_eq!(String::from_utf8(text)?, "Hello, world!");
    Ok(())
}

#[tokio::test]
async fn test_mid_stream_failure_is_abnormal_close() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(["Hel", "lo, ", "world!"]).fail_after(1, "reset");
    let base = spawn_server(&generator).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hello" }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let mut body = response.bytes_stream();
    let mut text = Vec::new();
    let mut failed = false;
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(chunk) => text.extend_from_slice(&chunk),
            Err(_) => {
                failed = true;
                break;
            }
        }
    }

    assert!(failed, "stream ended cleanly");
    assert_eq!(String::from_utf8(text)?, "Hel");
    Ok(())
}

#[tokio::test]
async fn test_mid_stream_failure_delivers_prefix_before_abort() -> anyhow::Result<()> {
    for _ in 0..20 {
        let generator =
            ScriptedGenerator::new(["Hel", "lo, ", "world!"]).fail_after(2, "reset");
        let base = spawn_server(&generator).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/generate", base))
            .json(&json!({ "prompt": "Say hello" }))
            .send()
            .await?;

        let mut body = response.bytes_stream();
        let mut text = Vec::new();
        let mut failed = false;
        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(chunk) => text.extend_from_slice(&chunk),
                Err(_) => {
                    failed = true;
                    break;
                }
            }
        }

        assert!(failed, "stream ended cleanly");
        assert_eq!(String::from_utf8(text)?, "Hello, ");
    }
    Ok(())
}

#[tokio::test]
async fn test_client_disconnect_releases_provider_stream() -> anyhow::Result<()> {
    let fragments: Vec<String> = (0..1000).map(|i| format!("chunk {} ", i)).collect();
    let generator = ScriptedGenerator::new(fragments).with_delay(Duration::from_millis(10));
    let base = spawn_server(&generator).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/generate", base))
        .json(&json!({ "prompt": "Say hello" }))
        .send()
        .await?;
    let mut body = response.bytes_stream();
    assert!(body.next().await.is_some());
    assert!(!generator.released());
    drop(body);

    let mut released = false;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if generator.released() {
            released = true;
            break;
        }
    }
    assert!(released, "provider stream still held after disconnect");
    Ok(())
}
