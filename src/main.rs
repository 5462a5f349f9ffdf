use tracing_subscriber::EnvFilter;

use idea_match::api;
use idea_match::config::Config;
use idea_match::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // RUST_LOG wins over the debug flag
    let default_filter = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Idea store: {}", config.ideas_path.display());
    tracing::info!(
        "Model: {} ({})",
        config.matcher.model,
        config.matcher.base_url
    );
    if config.matcher.has_api_key() {
        tracing::info!("API key loaded from environment");
    } else {
        tracing::warn!(
            "No API key found, rankings will use fallback scores (fallback enabled: {})",
            config.matcher.use_fallback
        );
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
