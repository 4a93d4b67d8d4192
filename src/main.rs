use anyhow::{Context, Result};
use law_school_site::alert::AlertBoard;
use law_school_site::backend::OpenAiBackend;
use law_school_site::config::Config;
use law_school_site::content::{ContentSetter, ContentStore};
use law_school_site::orchestrator::TranslationOrchestrator;
use law_school_site::server::{router, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("law_school_site=info".parse()?),
        )
        .init();

    info!("Starting law school site content service");

    // Load configuration from environment
    let config = Config::from_env()?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; language switches will fail until it is");
    }

    // English source content
    let content = Arc::new(ContentStore::load(&config.content_file)?);
    info!(
        "Loaded {} content sections from {}",
        content.sections().len(),
        config.content_file
    );

    let backend = OpenAiBackend::new(&config);
    info!("Translating with model {}", backend.model());

    let alerts = Arc::new(AlertBoard::new());
    let orchestrator =
        TranslationOrchestrator::new(backend, config.retry_config(), content.clone(), alerts.clone());

    let app = router(Arc::new(AppState {
        orchestrator,
        content,
        alerts,
    }));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
