//! Smoke test of the re-exported surface: serve, generate, save, list.

use scrivener::{
    AppState, InMemoryGenerationStore, ScriptedGenerator, Workbench, WritingMode, create_router,
    resolve_system_prompt,
};
use std::sync::Arc;

#[tokio::test]
async fn test_generate_and_save_through_facade() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new(["Dear team, ", "the demo moved to Friday."]);
    let store = InMemoryGenerationStore::new();
    let app = create_router(AppState::new(
        Arc::new(generator.clone()),
        Arc::new(store.clone()),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move { axum_serve(listener, app).await });

    let workbench = Workbench::connect(&base)?;
    workbench.set_mode(WritingMode::Email).await;
    let run = workbench.generate("Demo moved to Friday", |_| {}).await?;
    assert_eq!(run.output(), "Dear team, the demo moved to Friday.");

    let (system, _) = generator.last_request().unwrap();
    assert_eq!(system, resolve_system_prompt("email"));

    workbench.save().await?;
    assert_eq!(store.len().await, 1);
    Ok(())
}

async fn axum_serve(listener: tokio::net::TcpListener, app: axum::Router) {
    let _ = axum::serve(listener, app).await;
}
