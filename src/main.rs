use tokio::net::TcpListener;
use tracing::info;
use page_image_extractor::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    if config.firecrawl_api_key.is_none() {
        tracing::warn!("FIRECRAWL_API_KEY is not set; /images requests will fail until it is");
    }
    if config.describe_images && config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; image descriptions will be unavailable");
    }

    let app_state = AppState::new(config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
