//! Translate the content file into one language and print the result.
//!
//! Usage:
//!   cargo run --bin translate -- ko                 # priority section: home
//!   cargo run --bin translate -- es admissions      # priority section: Admissions
//!
//! Required environment variables:
//! - OPENAI_API_KEY
//!
//! Optional:
//! - CONTENT_FILE (defaults to data/content.json)
//! - OPENAI_MODEL, OPENAI_API_URL, TRANSLATION_* (see the server)

use anyhow::{bail, Context, Result};
use law_school_site::alert::AlertBoard;
use law_school_site::backend::OpenAiBackend;
use law_school_site::config::Config;
use law_school_site::content::ContentStore;
use law_school_site::i18n::Language;
use law_school_site::orchestrator::TranslationOrchestrator;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("law_school_site=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(code) = args.next() else {
        bail!("Usage: translate <language-code> [page]");
    };
    let page = args.next().unwrap_or_else(|| "home".to_string());
    let language = Language::parse(&code)?;

    let config = Config::from_env()?;
    let content = Arc::new(ContentStore::load(&config.content_file)?);
    let alerts = Arc::new(AlertBoard::new());
    let orchestrator = TranslationOrchestrator::new(
        OpenAiBackend::new(&config),
        config.retry_config(),
        content.clone(),
        alerts.clone(),
    );

    info!("Translating {} into {}", config.content_file, language);
    let outcome = orchestrator.switch(language, &page).await;
    if let Some(background) = outcome.into_background() {
        background.wait().await;
    }

    if let Some(alert) = alerts.current() {
        warn!("{}", alert.message);
    }

    let report = orchestrator.metrics().report();
    info!(
        "Done: {} of {} sections translated",
        report.sections_committed, report.api_calls
    );

    let json = serde_json::to_string_pretty(&content.snapshot())
        .context("Failed to serialize translated content")?;
    println!("{}", json);
    Ok(())
}
