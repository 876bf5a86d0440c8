use alttext_generator::ai::OpenAiAltTextClient;
use alttext_generator::models::Config;
use alttext_generator::server::{router, AppState};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alttext_generator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Starting alt-text server (model: {})", config.alt_text_model);

    let vision = Arc::new(OpenAiAltTextClient::new(
        config.openai_api_key.clone(),
        config.alt_text_model.clone(),
        config.max_completion_tokens,
    ));

    let app = router(AppState { vision });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
