pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod scrape;
pub mod vision;

use std::sync::Arc;
use reqwest::ClientBuilder;
use config::Config;
use error::{AppError, Result};
use scrape::ScrapeClient;
use vision::VisionClient;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scraper: ScrapeClient,
    pub vision: VisionClient,
}

impl AppState {
    /// Builds the outbound clients from `config`. Both share one connection pool.
    pub fn new(config: Config) -> Result<Self> {
        let http = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AppState {
            scraper: ScrapeClient::new(http.clone(), &config),
            vision: VisionClient::new(http, &config),
            config: Arc::new(config),
        })
    }
}
